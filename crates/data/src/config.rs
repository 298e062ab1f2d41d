//! Data-layer configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `MONGOMART_DATABASE_URL` - MongoDB connection string
//!   (`mongodb://...` or `mongodb+srv://...`)
//!
//! ## Optional
//! - `MONGOMART_DATABASE_NAME` - Database name (default: `mongomart`)

use secrecy::SecretString;
use thiserror::Error;

const DATABASE_URL_VAR: &str = "MONGOMART_DATABASE_URL";
const DATABASE_NAME_VAR: &str = "MONGOMART_DATABASE_NAME";
const DEFAULT_DATABASE_NAME: &str = "mongomart";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Data-layer configuration.
#[derive(Debug, Clone)]
pub struct DataConfig {
    /// MongoDB connection string (may contain credentials)
    pub database_url: SecretString,
    /// Database holding the `item` and `cart` collections
    pub database_name: String,
}

impl DataConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if `MONGOMART_DATABASE_URL` is
    /// unset, or `ConfigError::InvalidEnvVar` if a variable fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through a variable-lookup function.
    ///
    /// Split out from [`Self::from_env`] so tests can inject variables
    /// without mutating the process environment.
    ///
    /// # Errors
    ///
    /// Same as [`Self::from_env`].
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let database_url = lookup(DATABASE_URL_VAR)
            .ok_or_else(|| ConfigError::MissingEnvVar(DATABASE_URL_VAR.to_owned()))?;

        if !database_url.starts_with("mongodb://") && !database_url.starts_with("mongodb+srv://") {
            return Err(ConfigError::InvalidEnvVar(
                DATABASE_URL_VAR.to_owned(),
                "must start with mongodb:// or mongodb+srv://".to_owned(),
            ));
        }

        let database_name =
            lookup(DATABASE_NAME_VAR).unwrap_or_else(|| DEFAULT_DATABASE_NAME.to_owned());

        if database_name.is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                DATABASE_NAME_VAR.to_owned(),
                "must not be empty".to_owned(),
            ));
        }

        Ok(Self {
            database_url: SecretString::from(database_url),
            database_name,
        })
    }
}
