//! Application-wide constants and defaults.
//!
//! Defaults are applied when the configuration file leaves a field unset;
//! the MINIMUM_/MAXIMUM_ pairs bound what validation accepts.

use std::time::Duration;

// # Application Defaults

/// Interval between countdown recomputations.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Background art shown between sunrise and sunset.
pub const DEFAULT_DAY_BACKGROUND: &str = "https://images.unsplash.com/photo-1506744038136-46273834b3fb?auto=format&fit=crop&w=1920&q=80";

/// Background art shown between sunset and sunrise.
pub const DEFAULT_NIGHT_BACKGROUND: &str = "https://images.unsplash.com/photo-1490730141103-6cac27aaab94?auto=format&fit=crop&w=1920&q=80";

pub const DEFAULT_LOCATION_PROVIDER: &str = "auto";
pub const DEFAULT_ALLOW_NETWORK: bool = false;
pub const DEFAULT_REVERSE_GEOCODING: bool = true;

/// Nominatim-compatible reverse geocoding endpoint.
pub const DEFAULT_GEOCODING_URL: &str = "https://nominatim.openstreetmap.org/reverse";

/// ip-api compatible endpoint returning `status`, `lat` and `lon`.
pub const DEFAULT_NETWORK_LOCATION_URL: &str =
    "http://ip-api.com/json/?fields=status,message,lat,lon";

/// Seconds before a location or place-name request is abandoned.
pub const DEFAULT_LOOKUP_TIMEOUT: u64 = 10;
pub const MINIMUM_LOOKUP_TIMEOUT: u64 = 1;
pub const MAXIMUM_LOOKUP_TIMEOUT: u64 = 60;

/// Seconds of simulated time per real second for `daybreak simulate`.
pub const DEFAULT_SIMULATION_MULTIPLIER: f64 = 60.0;

// # Solar Calculation

/// Latitudes beyond this are clamped before solar calculations.
///
/// Past the polar circles the sun may not rise or set at all, and the
/// astronomical formulas stop producing usable instants.
pub const MAXIMUM_SOLAR_LATITUDE: f64 = 65.0;

/// Days searched past today when rolling the next event forward.
pub const ROLLOVER_LOOKAHEAD_DAYS: u32 = 3;

// # Place Names

/// Address fields consulted for a place name, most specific first.
pub const PLACE_NAME_FIELDS: [&str; 9] = [
    "city", "town", "village", "hamlet", "suburb", "district", "county", "state", "country",
];

// # User-facing Messages

pub const MESSAGE_LOCATING: &str = "Locating...";
pub const MESSAGE_UNSUPPORTED: &str = "Geolocation is not supported on this system";
pub const MESSAGE_UNAVAILABLE: &str = "Unable to retrieve your location";

// # Files

pub const CONFIG_DIR_NAME: &str = "daybreak";
pub const CONFIG_FILE_NAME: &str = "daybreak.toml";

// # Exit Codes

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
