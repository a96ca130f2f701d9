//! Configuration validation functionality.

use anyhow::Result;

use super::{Config, LocationProvider};
use crate::common::constants::*;

/// Reject configurations that cannot work or contradict themselves.
pub fn validate_config(config: &Config) -> Result<()> {
    if let Some(lat) = config.latitude
        && !(-90.0..=90.0).contains(&lat)
    {
        anyhow::bail!("latitude must be between -90 and 90 degrees (got {})", lat);
    }

    if let Some(lon) = config.longitude
        && !(-180.0..=180.0).contains(&lon)
    {
        anyhow::bail!(
            "longitude must be between -180 and 180 degrees (got {})",
            lon
        );
    }

    if config.latitude.is_some() != config.longitude.is_some() {
        anyhow::bail!("latitude and longitude must be configured together");
    }

    if config.location_provider() == LocationProvider::Manual && config.latitude.is_none() {
        anyhow::bail!("provider = \"manual\" requires latitude and longitude");
    }

    if let Some(timeout) = config.lookup_timeout
        && !(MINIMUM_LOOKUP_TIMEOUT..=MAXIMUM_LOOKUP_TIMEOUT).contains(&timeout)
    {
        anyhow::bail!(
            "lookup_timeout ({} s) must be between {} and {} seconds",
            timeout,
            MINIMUM_LOOKUP_TIMEOUT,
            MAXIMUM_LOOKUP_TIMEOUT
        );
    }

    for (name, value) in [
        ("geocoding_url", &config.geocoding_url),
        ("network_location_url", &config.network_location_url),
    ] {
        if let Some(url) = value
            && !(url.starts_with("http://") || url.starts_with("https://"))
        {
            anyhow::bail!("{name} must be an http:// or https:// URL (got '{url}')");
        }
    }

    for (name, value) in [
        ("day_background", &config.day_background),
        ("night_background", &config.night_background),
    ] {
        if let Some(background) = value
            && background.trim().is_empty()
        {
            anyhow::bail!("{name} cannot be empty");
        }
    }

    Ok(())
}
