//! The per-tick display state reflected by every surface.

use serde::{Deserialize, Serialize};

use crate::core::countdown::Countdown;

/// Everything a surface shows, recomputed on every tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayState {
    /// Remaining time as `HH:MM:SS`.
    pub countdown_text: String,
    /// `"Until Sunrise"` or `"Until Sunset"`.
    pub event_label: String,
    pub place_name: String,
    pub is_day: bool,
}

impl DisplayState {
    pub fn new(countdown: &Countdown, place_name: &str) -> Self {
        Self {
            countdown_text: countdown.text(),
            event_label: format!("Until {}", countdown.next.kind.label()),
            place_name: place_name.to_string(),
            is_day: countdown.is_day,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
