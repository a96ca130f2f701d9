//! Sunrise and sunset calculation for a calendar date and position.
//!
//! The astronomy itself is delegated to the `sunrise` crate. This module
//! decides *which* calendar date to ask about and keeps polar latitudes inside
//! the range where sunrise and sunset exist every day.
//!
//! The date is taken in local mean solar time, not in the civil timezone.
//! `sunrise` centres each date's events on solar noon at the position's
//! longitude, and civil zones such as Pacific/Apia (UTC+13 at 171°W) run a
//! whole day ahead of that.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use chrono_tz::Tz;
use once_cell::sync::Lazy;
use serde::Serialize;
use sunrise::{Coordinates, SolarDay, SolarEvent};
use tzf_rs::DefaultFinder;

use super::Position;
use crate::common::constants::MAXIMUM_SOLAR_LATITUDE;

static FINDER: Lazy<DefaultFinder> = Lazy::new(DefaultFinder::new);

/// Sunrise and sunset instants for one calendar date at one position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SolarTimes {
    pub sunrise: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
}

impl SolarTimes {
    pub fn new(sunrise: DateTime<Utc>, sunset: DateTime<Utc>) -> Self {
        Self { sunrise, sunset }
    }

    /// Whether `instant` lies in `[sunrise, sunset)`.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.sunrise <= instant && instant < self.sunset
    }

    pub fn day_length(&self) -> chrono::Duration {
        self.sunset - self.sunrise
    }
}

/// Source of solar event times.
///
/// The countdown engine only talks to this trait, so tests can substitute
/// fixed times for the astronomical model.
pub trait SolarCalculator: Send + Sync {
    /// Sunrise and sunset for `date` at `position`.
    fn solar_times(&self, date: NaiveDate, position: &Position) -> SolarTimes;

    /// Civil timezone at `position`, for parsing and showing wall-clock times.
    fn timezone(&self, position: &Position) -> Tz {
        determine_timezone_from_coordinates(position.latitude(), position.longitude())
    }

    /// The solar calendar date of `instant` at `position`.
    ///
    /// This is the date in local mean solar time, so the `[sunrise, sunset)`
    /// interval of the returned date is the one around the nearest solar noon.
    fn calendar_date(&self, instant: DateTime<Utc>, position: &Position) -> NaiveDate {
        (instant + mean_solar_offset(position.longitude())).date_naive()
    }
}

/// Standard astronomical sunrise/sunset (sun's upper limb at the horizon).
#[derive(Debug, Default, Clone, Copy)]
pub struct AstronomicalCalculator;

impl SolarCalculator for AstronomicalCalculator {
    fn solar_times(&self, date: NaiveDate, position: &Position) -> SolarTimes {
        let latitude = clamp_latitude(position.latitude());
        // Both components are range-checked by Position and the clamp above
        let coord = Coordinates::new(latitude, position.longitude())
            .unwrap_or_else(|| unreachable!("validated coordinates rejected"));

        let solar_day = SolarDay::new(coord, date);
        SolarTimes {
            sunrise: solar_day.event_time(SolarEvent::Sunrise),
            sunset: solar_day.event_time(SolarEvent::Sunset),
        }
    }
}

/// Keep latitudes where the sun rises and sets every day of the year.
pub fn clamp_latitude(latitude: f64) -> f64 {
    latitude.clamp(-MAXIMUM_SOLAR_LATITUDE, MAXIMUM_SOLAR_LATITUDE)
}

/// Offset of local mean solar time from UTC: four minutes per degree east.
pub fn mean_solar_offset(longitude: f64) -> Duration {
    Duration::seconds((longitude * 240.0).round() as i64)
}

/// Determine the timezone for given coordinates using timezone boundary data.
///
/// Ocean coordinates resolve to `Etc/GMT±N` zones; anything that fails to
/// parse falls back to UTC.
pub fn determine_timezone_from_coordinates(latitude: f64, longitude: f64) -> Tz {
    // tzf-rs uses (longitude, latitude) order
    let tz_name = FINDER.get_tz_name(longitude, latitude);
    tz_name.parse::<Tz>().unwrap_or(Tz::UTC)
}
