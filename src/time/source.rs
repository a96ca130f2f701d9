//! Clock abstraction for real, fixed, and simulated time.
//!
//! The countdown never reads the system clock directly. Each session owns a
//! [`Clock`], which lets `daybreak simulate` run the live view at an
//! accelerated rate and lets tests pin "now" to an exact instant.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use std::time::Instant;

/// Source of the current instant.
pub trait Clock: Send + Sync {
    /// Get the current time.
    fn now(&self) -> DateTime<Utc>;

    /// Check if this is a simulated clock.
    fn is_simulated(&self) -> bool {
        false
    }
}

/// Real-time implementation that uses the system clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant.
///
/// Backs `daybreak status --at` and most tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }

    fn is_simulated(&self) -> bool {
        true
    }
}

/// Simulated clock with linear acceleration.
///
/// Time starts at `start` and advances `multiplier` simulated seconds per
/// real second, measured from the moment the clock was created.
#[derive(Debug, Clone)]
pub struct SimulatedClock {
    start: DateTime<Utc>,
    anchor: Instant,
    multiplier: f64,
}

impl SimulatedClock {
    /// Create a new simulated clock.
    ///
    /// Non-positive or non-finite multipliers fall back to real-time speed.
    pub fn new(start: DateTime<Utc>, multiplier: f64) -> Self {
        let multiplier = if multiplier.is_finite() && multiplier > 0.0 {
            multiplier
        } else {
            1.0
        };
        Self {
            start,
            anchor: Instant::now(),
            multiplier,
        }
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    fn at_elapsed(&self, real_secs: f64) -> DateTime<Utc> {
        let simulated_ms = (real_secs * self.multiplier * 1000.0) as i64;
        self.start + chrono::Duration::milliseconds(simulated_ms)
    }
}

impl Clock for SimulatedClock {
    fn now(&self) -> DateTime<Utc> {
        self.at_elapsed(self.anchor.elapsed().as_secs_f64())
    }

    fn is_simulated(&self) -> bool {
        true
    }
}

/// Parse a datetime string in the format "YYYY-MM-DD HH:MM:SS" as local time.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, String> {
    let naive = NaiveDateTime::parse_from_str(s.trim(), "%Y-%m-%d %H:%M:%S")
        .map_err(|e| format!("Invalid datetime format: {e}. Use YYYY-MM-DD HH:MM:SS"))?;

    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| "Invalid local time (skipped by a DST change)".to_string())
}

/// Parse a datetime string in the format "YYYY-MM-DD HH:MM:SS" in a specific timezone.
pub fn parse_datetime_in_tz(s: &str, tz: chrono_tz::Tz) -> Result<DateTime<Utc>, String> {
    let naive = NaiveDateTime::parse_from_str(s.trim(), "%Y-%m-%d %H:%M:%S")
        .map_err(|e| format!("Invalid datetime format: {e}. Use YYYY-MM-DD HH:MM:SS"))?;

    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| format!("Invalid time in timezone {tz}"))
}
