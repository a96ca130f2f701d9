//! Presentation layer: write-only surfaces that reflect a [`DisplayState`].
//!
//! A surface shows three text regions (countdown, event label, place name)
//! plus one of exactly two backgrounds chosen by `is_day`. Surfaces keep no
//! state that affects what they show; rendering the same state twice gives
//! the same result.

pub mod terminal;

pub use terminal::TerminalSurface;

use anyhow::Result;
use serde::Serialize;

use crate::state::DisplayState;

/// The two preset background images.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Backgrounds {
    day: String,
    night: String,
}

impl Backgrounds {
    pub fn new(day: impl Into<String>, night: impl Into<String>) -> Self {
        Self {
            day: day.into(),
            night: night.into(),
        }
    }

    pub fn day(&self) -> &str {
        &self.day
    }

    pub fn night(&self) -> &str {
        &self.night
    }

    /// The background for the given half of the day.
    pub fn select(&self, is_day: bool) -> &str {
        if is_day { &self.day } else { &self.night }
    }
}

/// A write-only presentation target.
pub trait Surface {
    /// Reflect a full display state.
    fn render(&mut self, state: &DisplayState) -> Result<()>;

    /// Show a status message in the place-name region (before the countdown
    /// runs, or when it never will).
    fn show_status(&mut self, message: &str) -> Result<()>;
}
