//! Address geocoding with a jittered fallback.
//!
//! [`Geocoder::geocode`] never fails: when no provider is configured, or the
//! provider errors, times out, or finds nothing, it returns coordinates
//! scattered around the geographic center of the contiguous United States
//! and flags them with `is_fallback`.

mod google;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use friendmap_core::{AppConfig, Coordinates, GeocodeResult};
use rand::Rng;

use crate::error::GeocodeError;

pub use google::GoogleGeocodingClient;

/// Center of the contiguous United States.
pub const FALLBACK_CENTER: Coordinates = Coordinates {
    lat: 39.828_3,
    lng: -98.579_5,
};
/// Maximum latitude offset from [`FALLBACK_CENTER`], in degrees.
pub const FALLBACK_LAT_JITTER: f64 = 5.0;
/// Maximum longitude offset from [`FALLBACK_CENTER`], in degrees.
pub const FALLBACK_LNG_JITTER: f64 = 10.0;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(8);

/// An external address lookup.
///
/// Returns `Ok(None)` when the provider answered but found no match.
#[async_trait]
pub trait GeocodeProvider: Send + Sync {
    async fn lookup(&self, address: &str) -> Result<Option<Coordinates>, GeocodeError>;
}

/// Applies the single-attempt, fallback-on-anything policy around an
/// optional provider.
#[derive(Clone)]
pub struct Geocoder {
    provider: Option<Arc<dyn GeocodeProvider>>,
    timeout: Duration,
}

impl std::fmt::Debug for Geocoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Geocoder")
            .field("provider", &self.provider.as_ref().map(|_| "configured"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Geocoder {
    /// A geocoder with no provider; every lookup returns fallback coordinates.
    #[must_use]
    pub fn offline() -> Self {
        Self {
            provider: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_provider(provider: Arc<dyn GeocodeProvider>, timeout: Duration) -> Self {
        Self {
            provider: Some(provider),
            timeout,
        }
    }

    /// Build a geocoder from application config: the Google client when an
    /// API key is present, offline otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError`] if the HTTP client cannot be constructed or
    /// the configured base URL is invalid.
    pub fn from_config(config: &AppConfig) -> Result<Self, GeocodeError> {
        if !config.geocoding_enabled() {
            tracing::info!("no geocoding API key configured; using fallback coordinates");
            return Ok(Self::offline());
        }
        let api_key = config.google_maps_api_key.as_deref().unwrap_or_default();

        let client = GoogleGeocodingClient::with_base_url(
            api_key.trim(),
            config.geocoder_timeout_secs,
            &config.geocoder_user_agent,
            &config.geocoder_base_url,
        )?;
        Ok(Self::with_provider(
            Arc::new(client),
            Duration::from_secs(config.geocoder_timeout_secs),
        ))
    }

    #[must_use]
    pub fn is_online(&self) -> bool {
        self.provider.is_some()
    }

    /// Geocode `address`, falling back to jittered coordinates on any failure.
    ///
    /// Makes at most one provider call. A timeout is treated the same as a
    /// provider that found no match.
    pub async fn geocode(&self, address: &str) -> GeocodeResult {
        let Some(provider) = &self.provider else {
            return fallback_result();
        };

        let outcome = match tokio::time::timeout(self.timeout, provider.lookup(address)).await {
            Ok(result) => result,
            Err(_) => Err(GeocodeError::Timeout {
                timeout_secs: self.timeout.as_secs(),
            }),
        };

        match outcome {
            Ok(Some(coords)) => GeocodeResult::from_provider(coords),
            Ok(None) => {
                tracing::debug!(address, "no geocoding match");
                tracing::warn!("geocoding found no match; using fallback coordinates");
                fallback_result()
            }
            Err(err) => {
                tracing::debug!(address, error = %err, "geocoding failed");
                tracing::warn!(error = %err, "geocoding failed; using fallback coordinates");
                fallback_result()
            }
        }
    }
}

/// Fallback coordinates drawn from the thread-local RNG.
#[must_use]
pub fn fallback_result() -> GeocodeResult {
    fallback_result_with(&mut rand::rng())
}

/// Fallback coordinates drawn from `rng`: uniform within
/// [`FALLBACK_LAT_JITTER`] / [`FALLBACK_LNG_JITTER`] degrees of
/// [`FALLBACK_CENTER`].
pub fn fallback_result_with<R: Rng>(rng: &mut R) -> GeocodeResult {
    let lat = FALLBACK_CENTER.lat + rng.random_range(-FALLBACK_LAT_JITTER..=FALLBACK_LAT_JITTER);
    let lng = FALLBACK_CENTER.lng + rng.random_range(-FALLBACK_LNG_JITTER..=FALLBACK_LNG_JITTER);
    GeocodeResult::fallback(Coordinates { lat, lng })
}
