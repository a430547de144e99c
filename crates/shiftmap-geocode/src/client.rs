//! HTTP client for Nominatim's reverse-geocoding endpoint.
//!
//! Nominatim's usage policy requires an identifying `User-Agent`, so the
//! client always sends one.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use shiftmap_core::Coordinate;

use crate::error::GeocodeError;
use crate::types::ReverseResponse;

const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org/";

/// Returned when the response names no city, town, village, or region.
pub const UNKNOWN_CITY: &str = "unknown";

/// Resolves a coordinate to a display city name.
#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    async fn city_name(&self, coordinate: Coordinate, language: &str)
        -> Result<String, GeocodeError>;
}

pub struct GeocodeClient {
    client: Client,
    base_url: Url,
}

impl GeocodeClient {
    /// Creates a client pointed at the public Nominatim instance.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Network`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, GeocodeError> {
        Self::with_base_url(DEFAULT_BASE_URL, timeout_secs, user_agent)
    }

    /// Creates a client with a custom base URL (self-hosted instance or a mock
    /// server in tests).
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Network`] if the `reqwest::Client` cannot be
    /// constructed, or [`GeocodeError::InvalidBaseUrl`] if `base_url` does not
    /// parse.
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // A trailing slash makes `join("reverse")` append instead of replacing
        // the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| GeocodeError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, base_url })
    }

    /// Looks up the address for `coordinate` with labels in `language`.
    ///
    /// # Errors
    ///
    /// - [`GeocodeError::HttpStatus`] on a non-2xx response.
    /// - [`GeocodeError::UnexpectedFormat`] if the response is not JSON.
    /// - [`GeocodeError::Malformed`] if the JSON does not match the expected shape.
    /// - [`GeocodeError::Network`] on transport failure or timeout.
    pub async fn reverse(
        &self,
        coordinate: Coordinate,
        language: &str,
    ) -> Result<ReverseResponse, GeocodeError> {
        let url = self.reverse_url(coordinate, language)?;
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_owned();
        if !content_type.to_ascii_lowercase().contains("json") {
            return Err(GeocodeError::UnexpectedFormat { content_type });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| GeocodeError::Malformed {
            context: format!("reverse({coordinate})"),
            source: e,
        })
    }

    fn reverse_url(&self, coordinate: Coordinate, language: &str) -> Result<Url, GeocodeError> {
        let mut url = self
            .base_url
            .join("reverse")
            .map_err(|e| GeocodeError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        url.query_pairs_mut()
            .append_pair("format", "json")
            .append_pair("lat", &coordinate.latitude().to_string())
            .append_pair("lon", &coordinate.longitude().to_string())
            .append_pair("accept-language", language);
        Ok(url)
    }
}

#[async_trait]
impl ReverseGeocoder for GeocodeClient {
    async fn city_name(
        &self,
        coordinate: Coordinate,
        language: &str,
    ) -> Result<String, GeocodeError> {
        let response = self.reverse(coordinate, language).await?;
        Ok(city_from_address(&response))
    }
}

/// Picks the most specific settlement name: city, then town, then village,
/// then region. Blank values are skipped.
#[must_use]
pub fn city_from_address(response: &ReverseResponse) -> String {
    response
        .address
        .as_ref()
        .and_then(|address| {
            [
                &address.city,
                &address.town,
                &address.village,
                &address.region,
            ]
            .into_iter()
            .flatten()
            .map(|name| name.trim())
            .find(|name| !name.is_empty())
        })
        .unwrap_or(UNKNOWN_CITY)
        .to_owned()
}
