pub mod app_config;
pub mod config;
pub mod contacts;
pub mod format;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use contacts::{ContactRecord, Coordinates, ExtractedFields, FieldKey, GeocodeResult};
pub use format::ContactFormat;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown contact format: {0} (expected \"vcard\" or \"csv\")")]
    UnknownFormat(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
