//! Configuration system for daybreak.
//!
//! Settings live in `daybreak.toml`, searched in:
//! 1. the directory passed with `--config`
//! 2. **XDG_CONFIG_HOME**/daybreak/daybreak.toml (created with defaults when missing)
//!
//! Coordinates may also be kept in a sibling `geo.toml`, which overrides the
//! main file. This lets the main settings be shared or version controlled while
//! the location stays private.
//!
//! ```toml
//! #[Location]
//! provider = "auto"        # "auto", "manual", "network", "off"
//! allow_network = false    # Permit IP-based location lookup
//! latitude = 51.5074       # Geographic latitude (-90 to 90)
//! longitude = -0.1278      # Geographic longitude (-180 to 180)
//!
//! #[Place names]
//! reverse_geocoding = true # Look up a place name for the position
//! geocoding_url = "https://nominatim.openstreetmap.org/reverse"
//! network_location_url = "http://ip-api.com/json/?fields=status,message,lat,lon"
//! lookup_timeout = 10      # Seconds before a lookup is abandoned (1-60)
//!
//! #[Backgrounds]
//! day_background = "https://..."
//! night_background = "https://..."
//! ```

pub mod builder;
pub mod loading;
pub mod validation;

use serde::Deserialize;
use std::time::Duration;

use crate::common::constants::*;
use crate::display::Backgrounds;
use crate::geo::Position;

pub use builder::create_default_config;
pub use loading::{get_config_path, load, load_from_path, set_config_dir};


/// Where the session's position comes from.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LocationProvider {
    /// Configured coordinates when present, otherwise the network lookup.
    Auto,
    /// Configured coordinates only.
    Manual,
    /// IP-based lookup, subject to `allow_network`.
    Network,
    /// No geolocation capability.
    Off,
}

impl LocationProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationProvider::Auto => "auto",
            LocationProvider::Manual => "manual",
            LocationProvider::Network => "network",
            LocationProvider::Off => "off",
        }
    }
}

/// Geographic configuration stored separately in `geo.toml`.
#[derive(Debug, Deserialize, Clone)]
pub(crate) struct GeoConfig {
    pub(crate) latitude: Option<f64>,
    pub(crate) longitude: Option<f64>,
}

/// Configuration structure for daybreak settings.
///
/// Every field is optional; accessors apply the defaults from
/// [`crate::common::constants`].
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct Config {
    pub provider: Option<LocationProvider>,
    /// Permission for the network location provider.
    pub allow_network: Option<bool>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,

    pub reverse_geocoding: Option<bool>,
    pub geocoding_url: Option<String>,
    pub network_location_url: Option<String>,
    pub lookup_timeout: Option<u64>, // seconds

    pub day_background: Option<String>,
    pub night_background: Option<String>,
}

impl Config {
    pub fn location_provider(&self) -> LocationProvider {
        self.provider.unwrap_or(LocationProvider::Auto)
    }

    pub fn allow_network(&self) -> bool {
        self.allow_network.unwrap_or(DEFAULT_ALLOW_NETWORK)
    }

    /// Configured coordinates, if both are present and in range.
    pub fn position(&self) -> Option<Position> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Position::new(lat, lon).ok(),
            _ => None,
        }
    }

    pub fn reverse_geocoding(&self) -> bool {
        self.reverse_geocoding.unwrap_or(DEFAULT_REVERSE_GEOCODING)
    }

    pub fn geocoding_url(&self) -> &str {
        self.geocoding_url.as_deref().unwrap_or(DEFAULT_GEOCODING_URL)
    }

    pub fn network_location_url(&self) -> &str {
        self.network_location_url
            .as_deref()
            .unwrap_or(DEFAULT_NETWORK_LOCATION_URL)
    }

    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_secs(self.lookup_timeout.unwrap_or(DEFAULT_LOOKUP_TIMEOUT))
    }

    pub fn backgrounds(&self) -> Backgrounds {
        Backgrounds::new(
            self.day_background
                .as_deref()
                .unwrap_or(DEFAULT_DAY_BACKGROUND),
            self.night_background
                .as_deref()
                .unwrap_or(DEFAULT_NIGHT_BACKGROUND),
        )
    }

    /// Override the configured coordinates (the `--coords` flag).
    ///
    /// The provider becomes `manual` so the override is always used.
    pub fn with_position(mut self, position: Position) -> Self {
        self.latitude = Some(position.latitude());
        self.longitude = Some(position.longitude());
        self.provider = Some(LocationProvider::Manual);
        self
    }

    /// Log the effective configuration.
    pub fn log_config(&self) {
        log_block_start!("Loaded configuration");
        log_indented!("Location provider: {}", self.location_provider().as_str());

        match self.position() {
            Some(position) => log_indented!("Coordinates: {position}"),
            None => log_indented!("Coordinates: not configured"),
        }

        if matches!(
            self.location_provider(),
            LocationProvider::Auto | LocationProvider::Network
        ) {
            log_indented!(
                "Network location: {}",
                if self.allow_network() {
                    "allowed"
                } else {
                    "not allowed"
                }
            );
        }

        log_indented!(
            "Reverse geocoding: {}",
            if self.reverse_geocoding() {
                "enabled"
            } else {
                "disabled"
            }
        );
        log_indented!("Lookup timeout: {}s", self.lookup_timeout().as_secs());
    }
}
