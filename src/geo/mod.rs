//! Geographic functionality: positions, solar times, and location lookups.
//!
//! ## Module Structure
//!
//! - [`position`]: validated latitude/longitude pair
//! - [`solar`]: sunrise/sunset for a calendar date via the `sunrise` crate
//! - [`geolocation`]: one-shot, permission-gated position acquisition
//! - [`geocode`]: reverse geocoding into a human-readable place name
//! - [`display`]: formatting of solar information for the terminal

pub mod display;
pub mod geocode;
pub mod geolocation;
pub mod position;
pub mod solar;

pub use geocode::{NominatimClient, PlaceNameResolver, resolve_place_name};
pub use geolocation::{GeolocationError, Geolocator, Locator, acquire_location};
pub use position::Position;
pub use solar::{AstronomicalCalculator, SolarCalculator, SolarTimes};

#[cfg(test)]
mod tests;

use anyhow::{Context, Result};
use std::time::Duration;

use crate::config::Config;

/// Build the HTTP client shared by the location and place-name lookups.
///
/// Nominatim's usage policy requires an identifying User-Agent.
pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(concat!("daybreak/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()
        .context("Failed to build HTTP client")
}

/// Location provider and place-name resolver selected by the configuration.
///
/// The resolver is `None` when reverse geocoding is disabled.
pub fn build_lookups(config: &Config) -> Result<(Locator, Option<NominatimClient>)> {
    let client = build_http_client(config.lookup_timeout())?;
    let locator = Locator::from_config(config, client.clone());
    log_debug!("Location provider: {}", locator.describe());

    let resolver = config.reverse_geocoding().then(|| {
        log_debug!("Reverse geocoding via {}", config.geocoding_url());
        NominatimClient::new(client, config.geocoding_url())
    });
    Ok((locator, resolver))
}
