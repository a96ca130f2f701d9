//! One-shot position acquisition behind a permission gate.
//!
//! A [`Geolocator`] is asked exactly once per session. Providers:
//!
//! - [`FixedLocator`]: coordinates from the config file or `--coords`
//! - [`NetworkLocator`]: IP-based lookup over HTTP, only when the user has
//!   granted permission with `allow_network = true`
//! - [`Locator::Unsupported`]: no capability at all (`provider = "off"`, or
//!   nothing usable configured)

use serde::Deserialize;
use std::fmt;
use std::future::Future;

use super::Position;
use crate::common::constants::{MESSAGE_UNAVAILABLE, MESSAGE_UNSUPPORTED};
use crate::config::{Config, LocationProvider};

/// Ways position acquisition can fail.
#[derive(Debug, Clone, PartialEq)]
pub enum GeolocationError {
    /// No geolocation capability is available on this system.
    Unsupported,
    /// The user has not allowed location lookups.
    PermissionDenied,
    /// The provider answered but could not produce a position.
    PositionUnavailable(String),
    /// The provider did not answer in time.
    Timeout,
}

impl fmt::Display for GeolocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeolocationError::Unsupported => write!(f, "geolocation is not supported"),
            GeolocationError::PermissionDenied => write!(f, "permission to look up location denied"),
            GeolocationError::PositionUnavailable(reason) => {
                write!(f, "position unavailable: {reason}")
            }
            GeolocationError::Timeout => write!(f, "location request timed out"),
        }
    }
}

impl std::error::Error for GeolocationError {}

impl GeolocationError {
    /// The message shown in place of the place name.
    pub fn user_message(&self) -> &'static str {
        match self {
            GeolocationError::Unsupported => MESSAGE_UNSUPPORTED,
            _ => MESSAGE_UNAVAILABLE,
        }
    }
}

/// A single-shot, permission-gated position source.
pub trait Geolocator {
    /// Feature detection: whether this provider can ever produce a position.
    fn is_supported(&self) -> bool;

    /// Resolve the current position once.
    fn current_position(&self) -> impl Future<Output = Result<Position, GeolocationError>> + Send;
}

/// Acquire the position, checking support before asking.
pub async fn acquire_location<G: Geolocator>(locator: &G) -> Result<Position, GeolocationError> {
    if !locator.is_supported() {
        return Err(GeolocationError::Unsupported);
    }
    locator.current_position().await
}

/// Coordinates known up front.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocator {
    position: Position,
}

impl FixedLocator {
    pub fn new(position: Position) -> Self {
        Self { position }
    }
}

impl Geolocator for FixedLocator {
    fn is_supported(&self) -> bool {
        true
    }

    fn current_position(&self) -> impl Future<Output = Result<Position, GeolocationError>> + Send {
        let position = self.position;
        async move { Ok(position) }
    }
}

/// Response body of an ip-api compatible endpoint.
#[derive(Debug, Deserialize)]
struct NetworkLocationResponse {
    status: String,
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

/// IP-based geolocation over HTTP.
#[derive(Debug, Clone)]
pub struct NetworkLocator {
    client: reqwest::Client,
    url: String,
    allowed: bool,
}

impl NetworkLocator {
    pub fn new(client: reqwest::Client, url: impl Into<String>, allowed: bool) -> Self {
        Self {
            client,
            url: url.into(),
            allowed,
        }
    }
}

impl Geolocator for NetworkLocator {
    fn is_supported(&self) -> bool {
        true
    }

    fn current_position(&self) -> impl Future<Output = Result<Position, GeolocationError>> + Send {
        let client = self.client.clone();
        let url = self.url.clone();
        let allowed = self.allowed;

        async move {
            if !allowed {
                return Err(GeolocationError::PermissionDenied);
            }

            log_debug!("Requesting network location from {url}");
            let response = client.get(&url).send().await.map_err(request_error)?;
            if !response.status().is_success() {
                return Err(GeolocationError::PositionUnavailable(format!(
                    "HTTP {}",
                    response.status()
                )));
            }

            let body: NetworkLocationResponse =
                response.json().await.map_err(request_error)?;
            position_from_response(body)
        }
    }
}

fn request_error(e: reqwest::Error) -> GeolocationError {
    if e.is_timeout() {
        GeolocationError::Timeout
    } else {
        GeolocationError::PositionUnavailable(e.to_string())
    }
}

fn position_from_response(body: NetworkLocationResponse) -> Result<Position, GeolocationError> {
    if body.status != "success" {
        let reason = body.message.unwrap_or(body.status);
        return Err(GeolocationError::PositionUnavailable(reason));
    }
    match (body.lat, body.lon) {
        (Some(lat), Some(lon)) => Position::new(lat, lon)
            .map_err(|e| GeolocationError::PositionUnavailable(e.to_string())),
        _ => Err(GeolocationError::PositionUnavailable(
            "response did not include coordinates".to_string(),
        )),
    }
}

/// The provider selected from configuration.
#[derive(Debug, Clone)]
pub enum Locator {
    Fixed(FixedLocator),
    Network(NetworkLocator),
    Unsupported,
}

impl Locator {
    /// Select a provider following `provider` in the config.
    ///
    /// `auto` prefers configured coordinates and falls back to the network
    /// provider, which still honours `allow_network`.
    pub fn from_config(config: &Config, client: reqwest::Client) -> Self {
        let fixed = config.position().map(FixedLocator::new);
        let network = || {
            NetworkLocator::new(
                client.clone(),
                config.network_location_url(),
                config.allow_network(),
            )
        };

        match config.location_provider() {
            LocationProvider::Off => Locator::Unsupported,
            LocationProvider::Manual => fixed.map_or(Locator::Unsupported, Locator::Fixed),
            LocationProvider::Network => Locator::Network(network()),
            LocationProvider::Auto => match fixed {
                Some(fixed) => Locator::Fixed(fixed),
                None => Locator::Network(network()),
            },
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Locator::Fixed(_) => "configured coordinates",
            Locator::Network(_) => "network lookup",
            Locator::Unsupported => "none",
        }
    }
}

impl Geolocator for Locator {
    fn is_supported(&self) -> bool {
        match self {
            Locator::Fixed(inner) => inner.is_supported(),
            Locator::Network(inner) => inner.is_supported(),
            Locator::Unsupported => false,
        }
    }

    fn current_position(&self) -> impl Future<Output = Result<Position, GeolocationError>> + Send {
        let locator = self.clone();
        async move {
            match &locator {
                Locator::Fixed(inner) => inner.current_position().await,
                Locator::Network(inner) => inner.current_position().await,
                Locator::Unsupported => Err(GeolocationError::Unsupported),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: &str, lat: Option<f64>, lon: Option<f64>) -> NetworkLocationResponse {
        NetworkLocationResponse {
            status: status.to_string(),
            message: None,
            lat,
            lon,
        }
    }

    #[test]
    fn test_success_response_yields_position() {
        let position = position_from_response(response("success", Some(48.85), Some(2.35)))
            .expect("position");
        assert_eq!(position.latitude(), 48.85);
        assert_eq!(position.longitude(), 2.35);
    }

    #[test]
    fn test_failed_status_reports_message() {
        let mut body = response("fail", None, None);
        body.message = Some("reserved range".to_string());
        assert_eq!(
            position_from_response(body),
            Err(GeolocationError::PositionUnavailable(
                "reserved range".to_string()
            ))
        );
    }

    #[test]
    fn test_missing_coordinates_are_unavailable() {
        assert!(matches!(
            position_from_response(response("success", Some(1.0), None)),
            Err(GeolocationError::PositionUnavailable(_))
        ));
    }

    #[test]
    fn test_out_of_range_coordinates_are_unavailable() {
        assert!(matches!(
            position_from_response(response("success", Some(123.0), Some(0.0))),
            Err(GeolocationError::PositionUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_unsupported_locator_is_feature_detected() {
        assert_eq!(
            acquire_location(&Locator::Unsupported).await,
            Err(GeolocationError::Unsupported)
        );
    }

    #[tokio::test]
    async fn test_denied_permission_skips_network() {
        // Unroutable URL: reaching the network would fail differently
        let locator = NetworkLocator::new(reqwest::Client::new(), "http://0.0.0.0:9/", false);
        assert_eq!(
            acquire_location(&locator).await,
            Err(GeolocationError::PermissionDenied)
        );
    }

    #[tokio::test]
    async fn test_fixed_locator_returns_its_position() {
        let position = Position::new(51.5, -0.12).expect("valid");
        let locator = FixedLocator::new(position);
        assert_eq!(acquire_location(&locator).await, Ok(position));
    }
}
