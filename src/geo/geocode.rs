//! Best-effort reverse geocoding of a position into a place name.
//!
//! The remote lookup is Nominatim-compatible:
//! `GET {url}?format=json&lat=<lat>&lon=<lon>` returning an object with an
//! `address` member. Any failure along the way degrades to showing the
//! coordinates themselves, so callers always get something to display.

use serde::Deserialize;
use std::fmt;
use std::future::Future;

use super::Position;
use crate::common::constants::PLACE_NAME_FIELDS;

/// Locality fields of a reverse geocoding `address` object.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct Address {
    pub city: Option<String>,
    pub town: Option<String>,
    pub village: Option<String>,
    pub hamlet: Option<String>,
    pub suburb: Option<String>,
    pub district: Option<String>,
    pub county: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}

impl Address {
    fn field(&self, name: &str) -> Option<&str> {
        let value = match name {
            "city" => &self.city,
            "town" => &self.town,
            "village" => &self.village,
            "hamlet" => &self.hamlet,
            "suburb" => &self.suburb,
            "district" => &self.district,
            "county" => &self.county,
            "state" => &self.state,
            "country" => &self.country,
            _ => return None,
        };
        value.as_deref()
    }

    /// The most specific locality present, skipping blank values.
    pub fn place_name(&self) -> Option<&str> {
        PLACE_NAME_FIELDS
            .iter()
            .filter_map(|name| self.field(name))
            .map(str::trim)
            .find(|value| !value.is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct ReverseGeocodeResponse {
    address: Option<Address>,
}

/// Why a place-name lookup produced nothing usable.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupError {
    /// Transport failure (DNS, connection, TLS, ...).
    Http(String),
    /// The service answered with a non-success status code.
    Status(u16),
    /// The service answered in time but the body was not a usable document.
    Malformed(String),
    /// The address carried none of the locality fields.
    NoPlaceName,
    Timeout,
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupError::Http(e) => write!(f, "request failed: {e}"),
            LookupError::Status(code) => write!(f, "service returned HTTP {code}"),
            LookupError::Malformed(e) => write!(f, "malformed response: {e}"),
            LookupError::NoPlaceName => write!(f, "no locality in address"),
            LookupError::Timeout => write!(f, "lookup timed out"),
        }
    }
}

impl std::error::Error for LookupError {}

/// A remote lookup turning a position into a structured address.
pub trait PlaceNameResolver {
    fn lookup(&self, position: Position) -> impl Future<Output = Result<Address, LookupError>> + Send;
}

/// Client for a Nominatim-compatible `/reverse` endpoint.
#[derive(Debug, Clone)]
pub struct NominatimClient {
    client: reqwest::Client,
    url: String,
}

impl NominatimClient {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

impl PlaceNameResolver for NominatimClient {
    fn lookup(&self, position: Position) -> impl Future<Output = Result<Address, LookupError>> + Send {
        let client = self.client.clone();
        let url = self.url.clone();

        async move {
            log_debug!("Reverse geocoding {} via {url}", position.format_coordinates());
            let response = client
                .get(&url)
                .query(&[
                    ("format", "json".to_string()),
                    ("lat", position.latitude().to_string()),
                    ("lon", position.longitude().to_string()),
                ])
                .send()
                .await
                .map_err(lookup_error)?;

            let status = response.status();
            if !status.is_success() {
                return Err(LookupError::Status(status.as_u16()));
            }

            let body = response.text().await.map_err(lookup_error)?;
            parse_address(&body)
        }
    }
}

fn lookup_error(e: reqwest::Error) -> LookupError {
    if e.is_timeout() {
        LookupError::Timeout
    } else {
        LookupError::Http(e.to_string())
    }
}

/// Extract the `address` object from a reverse geocoding response body.
pub fn parse_address(body: &str) -> Result<Address, LookupError> {
    let response: ReverseGeocodeResponse =
        serde_json::from_str(body).map_err(|e| LookupError::Malformed(e.to_string()))?;
    response
        .address
        .ok_or_else(|| LookupError::Malformed("missing address".to_string()))
}

/// Look up a place name, falling back to rounded coordinates on any failure.
pub async fn resolve_place_name<R: PlaceNameResolver>(resolver: &R, position: Position) -> String {
    let resolved = resolver.lookup(position).await.and_then(|address| {
        address
            .place_name()
            .map(str::to_string)
            .ok_or(LookupError::NoPlaceName)
    });

    match resolved {
        Ok(name) => {
            log_debug!("Resolved place name: {name}");
            name
        }
        Err(e) => {
            log_debug!("Place name lookup failed ({e}), showing coordinates");
            position.format_coordinates()
        }
    }
}
