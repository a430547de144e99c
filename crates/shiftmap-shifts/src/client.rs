//! HTTP client for the public shift-listing endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use shiftmap_core::{Coordinate, Shift};

use crate::error::ShiftsError;

const DEFAULT_BASE_URL: &str = "https://mobile.handswork.pro/api/";
const MAP_LIST_PATH: &str = "shifts/map-list-unauthorized";

/// Envelope returned by `map-list-unauthorized`. `data` may be absent or `null`
/// when nothing is nearby.
#[derive(Debug, Deserialize)]
struct MapListResponse {
    #[serde(default)]
    data: Option<Vec<Shift>>,
}

/// Anything that can list shifts near a coordinate.
#[async_trait]
pub trait ShiftSource: Send + Sync {
    async fn shifts_near(&self, coordinate: Coordinate) -> Result<Vec<Shift>, ShiftsError>;
}

/// Client for `GET /shifts/map-list-unauthorized`.
///
/// One attempt per call: there is no retry layer, the user re-triggers
/// (refresh) to try again.
pub struct ShiftsClient {
    client: Client,
    base_url: Url,
}

impl ShiftsClient {
    /// Creates a client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`ShiftsError::Network`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ShiftsError> {
        Self::with_base_url(DEFAULT_BASE_URL, timeout_secs, user_agent)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ShiftsError::Network`] if the `reqwest::Client` cannot be
    /// constructed, or [`ShiftsError::InvalidBaseUrl`] if `base_url` does not
    /// parse.
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ShiftsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ShiftsError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, base_url })
    }

    fn map_list_url(&self, coordinate: Coordinate) -> Result<Url, ShiftsError> {
        let mut url = self
            .base_url
            .join(MAP_LIST_PATH)
            .map_err(|e| ShiftsError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        url.query_pairs_mut()
            .append_pair("latitude", &coordinate.latitude().to_string())
            .append_pair("longitude", &coordinate.longitude().to_string());
        Ok(url)
    }
}

#[async_trait]
impl ShiftSource for ShiftsClient {
    /// Fetches shifts near `coordinate` in server order.
    ///
    /// # Errors
    ///
    /// - [`ShiftsError::HttpStatus`] on any non-2xx response.
    /// - [`ShiftsError::Malformed`] if the body is not the expected envelope.
    /// - [`ShiftsError::Network`] on transport failure or timeout.
    async fn shifts_near(&self, coordinate: Coordinate) -> Result<Vec<Shift>, ShiftsError> {
        let url = self.map_list_url(coordinate)?;
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ShiftsError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        let envelope: MapListResponse =
            serde_json::from_str(&body).map_err(|e| ShiftsError::Malformed {
                context: format!("map-list({coordinate})"),
                source: e,
            })?;

        Ok(envelope.data.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> ShiftsClient {
        ShiftsClient::with_base_url(base_url, 5, "shiftmap-test/0.1")
            .expect("client construction should not fail")
    }

    #[test]
    fn map_list_url_carries_coordinate() {
        let client = test_client("https://mobile.example.com/api");
        let url = client
            .map_list_url(Coordinate::new(55.75, 37.62).unwrap())
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://mobile.example.com/api/shifts/map-list-unauthorized?latitude=55.75&longitude=37.62"
        );
    }

    #[test]
    fn map_list_url_strips_trailing_slash() {
        let client = test_client("https://mobile.example.com/api/");
        let url = client
            .map_list_url(Coordinate::new(-33.87, 151.21).unwrap())
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://mobile.example.com/api/shifts/map-list-unauthorized?latitude=-33.87&longitude=151.21"
        );
    }

    #[test]
    fn null_data_is_empty_list() {
        let envelope: MapListResponse = serde_json::from_str(r#"{"data": null}"#).unwrap();
        assert!(envelope.data.unwrap_or_default().is_empty());

        let envelope: MapListResponse = serde_json::from_str("{}").unwrap();
        assert!(envelope.data.is_none());
    }
}
