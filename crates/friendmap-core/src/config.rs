use crate::app_config::AppConfig;
use crate::ConfigError;

const DEFAULT_GEOCODER_BASE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";
const MAX_GEOCODER_TIMEOUT_SECS: u64 = 60;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default, so an empty environment yields a valid
/// offline configuration.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let log_level = or_default("FRIENDMAP_LOG_LEVEL", "info");

    let google_maps_api_key = lookup("GOOGLE_MAPS_API_KEY")
        .ok()
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty());

    let geocoder_base_url = or_default("FRIENDMAP_GEOCODER_BASE_URL", DEFAULT_GEOCODER_BASE_URL);
    if !geocoder_base_url.starts_with("http://") && !geocoder_base_url.starts_with("https://") {
        return Err(ConfigError::InvalidEnvVar {
            var: "FRIENDMAP_GEOCODER_BASE_URL".to_string(),
            reason: format!("expected an http(s) URL, got '{geocoder_base_url}'"),
        });
    }

    let geocoder_timeout_secs = parse_u64("FRIENDMAP_GEOCODER_TIMEOUT_SECS", "8")?;
    if geocoder_timeout_secs == 0 || geocoder_timeout_secs > MAX_GEOCODER_TIMEOUT_SECS {
        return Err(ConfigError::InvalidEnvVar {
            var: "FRIENDMAP_GEOCODER_TIMEOUT_SECS".to_string(),
            reason: format!(
                "must be between 1 and {MAX_GEOCODER_TIMEOUT_SECS}, got {geocoder_timeout_secs}"
            ),
        });
    }

    let geocoder_user_agent = or_default(
        "FRIENDMAP_GEOCODER_USER_AGENT",
        "friendmap/0.1 (contact-import)",
    );

    Ok(AppConfig {
        log_level,
        google_maps_api_key,
        geocoder_base_url,
        geocoder_timeout_secs,
        geocoder_user_agent,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
