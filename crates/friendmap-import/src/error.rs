use thiserror::Error;

/// Errors raised by a geocoding provider.
///
/// These never escape an import: [`crate::Geocoder`] turns every one of them
/// into fallback coordinates. They surface only to callers that talk to a
/// provider directly.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// Network or TLS failure, or a non-2xx HTTP status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The provider answered with a status other than a match or an empty result.
    #[error("geocoding provider returned {status}: {message}")]
    ProviderStatus { status: String, message: String },

    #[error("invalid geocoder base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    #[error("geocoding request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },
}
