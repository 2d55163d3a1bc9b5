#[derive(Clone)]
pub struct AppConfig {
    pub log_level: String,
    /// Google Geocoding API key. `None` runs every import in offline mode.
    pub google_maps_api_key: Option<String>,
    pub geocoder_base_url: String,
    pub geocoder_timeout_secs: u64,
    pub geocoder_user_agent: String,
}

impl AppConfig {
    /// Returns `true` when an external geocoding provider can be built.
    #[must_use]
    pub fn geocoding_enabled(&self) -> bool {
        self.google_maps_api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field(
                "google_maps_api_key",
                &self.google_maps_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("geocoder_base_url", &self.geocoder_base_url)
            .field("geocoder_timeout_secs", &self.geocoder_timeout_secs)
            .field("geocoder_user_agent", &self.geocoder_user_agent)
            .finish()
    }
}
