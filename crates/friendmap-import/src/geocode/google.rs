//! HTTP client for the Google Geocoding REST API.
//!
//! Wraps `reqwest` with API key management and typed response
//! deserialization. The JSON envelope's `"status"` field decides the
//! outcome: `OK` yields the first candidate, `ZERO_RESULTS` yields no match,
//! anything else surfaces as [`GeocodeError::ProviderStatus`].

use std::time::Duration;

use async_trait::async_trait;
use friendmap_core::Coordinates;
use reqwest::{Client, Url};
use serde::Deserialize;

use super::GeocodeProvider;
use crate::error::GeocodeError;

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";
const DEFAULT_USER_AGENT: &str = "friendmap/0.1 (contact-import)";

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeCandidate>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeCandidate {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

/// Client for the Google Geocoding API.
///
/// Use [`GoogleGeocodingClient::new`] for production or
/// [`GoogleGeocodingClient::with_base_url`] to point at a mock server in tests.
pub struct GoogleGeocodingClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl std::fmt::Debug for GoogleGeocodingClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleGeocodingClient")
            .field("api_key", &"[redacted]")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl GoogleGeocodingClient {
    /// Creates a new client pointed at the production Geocoding API.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, GeocodeError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_USER_AGENT, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom endpoint URL.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`GeocodeError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.min(5)))
            .user_agent(user_agent)
            .build()?;

        let base_url = Url::parse(base_url).map_err(|e| GeocodeError::InvalidBaseUrl {
            base_url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Looks up `address` and returns the first candidate's coordinates.
    ///
    /// # Errors
    ///
    /// - [`GeocodeError::ProviderStatus`] if the API reports anything other
    ///   than `OK` or `ZERO_RESULTS`.
    /// - [`GeocodeError::Http`] on network failure or non-2xx HTTP status.
    /// - [`GeocodeError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn geocode_address(&self, address: &str) -> Result<Option<Coordinates>, GeocodeError> {
        let url = self.build_url(address);
        let GeocodeResponse {
            status,
            results,
            error_message,
        } = self.request(&url).await?;

        if status == "OK" {
            Ok(results.into_iter().next().map(|candidate| {
                let location = candidate.geometry.location;
                Coordinates {
                    lat: location.lat,
                    lng: location.lng,
                }
            }))
        } else if status == "ZERO_RESULTS" {
            Ok(None)
        } else {
            Err(GeocodeError::ProviderStatus {
                status,
                message: error_message.unwrap_or_else(|| "no error message".to_string()),
            })
        }
    }

    /// Builds the request URL with percent-encoded `address` and `key`
    /// query parameters.
    fn build_url(&self, address: &str) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("address", address)
            .append_pair("key", &self.api_key);
        url
    }

    /// Sends the request. HTTP errors have their URL stripped, since it
    /// carries the address and the API key.
    async fn request(&self, url: &Url) -> Result<GeocodeResponse, GeocodeError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;
        let response = response
            .error_for_status()
            .map_err(reqwest::Error::without_url)?;
        let body = response.text().await.map_err(reqwest::Error::without_url)?;
        serde_json::from_str(&body).map_err(|e| GeocodeError::Deserialize {
            context: format!("geocode response from {}", self.base_url),
            source: e,
        })
    }
}

#[async_trait]
impl GeocodeProvider for GoogleGeocodingClient {
    async fn lookup(&self, address: &str) -> Result<Option<Coordinates>, GeocodeError> {
        self.geocode_address(address).await
    }
}

#[cfg(test)]
#[path = "google_test.rs"]
mod tests;
