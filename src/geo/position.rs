//! Geographic position captured once per session.

use serde::Serialize;
use std::fmt;

/// A validated latitude/longitude pair in degrees.
/// Only built through [`Position::new`], so it is serialized but never deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    latitude: f64,
    longitude: f64,
}

impl Position {
    /// Create a position, rejecting out-of-range or non-finite coordinates.
    pub fn new(latitude: f64, longitude: f64) -> anyhow::Result<Self> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            anyhow::bail!(
                "Invalid latitude: {}. Must be between -90 and 90 degrees",
                latitude
            );
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            anyhow::bail!(
                "Invalid longitude: {}. Must be between -180 and 180 degrees",
                longitude
            );
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Coordinates rounded to two decimals with degree symbols, e.g. `51.51°, -0.13°`.
    ///
    /// This is the place-name fallback when reverse geocoding fails.
    pub fn format_coordinates(&self) -> String {
        format!(
            "{:.2}°, {:.2}°",
            round_hundredths(self.latitude),
            round_hundredths(self.longitude)
        )
    }

    /// Parse `"LAT,LON"` as given to `--coords`.
    pub fn parse_pair(s: &str) -> anyhow::Result<Self> {
        let (lat, lon) = s
            .split_once(',')
            .ok_or_else(|| anyhow::anyhow!("Expected coordinates as LAT,LON (got '{s}')"))?;
        let lat: f64 = lat
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid latitude '{}'", lat.trim()))?;
        let lon: f64 = lon
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid longitude '{}'", lon.trim()))?;
        Self::new(lat, lon)
    }
}

/// Round half away from zero; `{:.2}` alone rounds exact ties to even.
fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.4}°{}, {:.4}°{}",
            self.latitude.abs(),
            if self.latitude >= 0.0 { "N" } else { "S" },
            self.longitude.abs(),
            if self.longitude >= 0.0 { "E" } else { "W" }
        )
    }
}
