//! Test doubles shared by unit and integration tests.
//!
//! Only compiled for tests or with the `testing-support` feature.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;
use std::future::Future;
use std::sync::{Arc, Mutex};

use crate::display::Surface;
use crate::geo::geocode::{Address, LookupError};
use crate::geo::{PlaceNameResolver, Position, SolarCalculator, SolarTimes};
use crate::state::DisplayState;

/// Solar calculator with the same UTC sunrise and sunset every day.
#[derive(Debug, Clone, Copy)]
pub struct FixedSolarCalculator {
    sunrise: NaiveTime,
    sunset: NaiveTime,
}

impl FixedSolarCalculator {
    /// Sunrise and sunset as `(hour, minute)` in UTC.
    pub fn new(sunrise: (u32, u32), sunset: (u32, u32)) -> Self {
        Self {
            sunrise: NaiveTime::from_hms_opt(sunrise.0, sunrise.1, 0).unwrap_or(NaiveTime::MIN),
            sunset: NaiveTime::from_hms_opt(sunset.0, sunset.1, 0).unwrap_or(NaiveTime::MIN),
        }
    }
}

impl SolarCalculator for FixedSolarCalculator {
    fn solar_times(&self, date: NaiveDate, _position: &Position) -> SolarTimes {
        SolarTimes::new(
            date.and_time(self.sunrise).and_utc(),
            date.and_time(self.sunset).and_utc(),
        )
    }

    fn timezone(&self, _position: &Position) -> Tz {
        Tz::UTC
    }

    // Days here are UTC days, whatever the longitude.
    fn calendar_date(&self, instant: DateTime<Utc>, _position: &Position) -> NaiveDate {
        instant.date_naive()
    }
}

/// Everything a surface was asked to show, in order.
#[derive(Debug, Default, Clone)]
pub struct Recording {
    pub statuses: Vec<String>,
    pub frames: Vec<DisplayState>,
}

/// Surface that records instead of drawing.
///
/// Clones share one recording, so a test can keep a handle while the surface
/// is owned by the event loop.
#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    recording: Arc<Mutex<Recording>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recording(&self) -> Recording {
        self.recording
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

impl Surface for RecordingSurface {
    fn render(&mut self, state: &DisplayState) -> Result<()> {
        if let Ok(mut recording) = self.recording.lock() {
            recording.frames.push(state.clone());
        }
        Ok(())
    }

    fn show_status(&mut self, message: &str) -> Result<()> {
        if let Ok(mut recording) = self.recording.lock() {
            recording.statuses.push(message.to_string());
        }
        Ok(())
    }
}

/// Resolver answering every lookup with the same address, or failing.
#[derive(Debug, Clone)]
pub struct StaticResolver {
    answer: Result<Address, LookupError>,
}

impl StaticResolver {
    pub fn answering(address: Address) -> Self {
        Self {
            answer: Ok(address),
        }
    }

    pub fn failing(error: LookupError) -> Self {
        Self { answer: Err(error) }
    }
}

impl PlaceNameResolver for StaticResolver {
    fn lookup(&self, _position: Position) -> impl Future<Output = Result<Address, LookupError>> + Send {
        let answer = self.answer.clone();
        async move { answer }
    }
}
