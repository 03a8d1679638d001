//! # Configuration Structures
//!
//! This module defines the configuration structures for the ZMesh client.
//!
//! All configuration structures:
//! - Use `serde` for serialization/deserialization
//! - Use `validator` for input validation
//! - Fall back to defaults for every omitted field

use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// Message reported for any missing connection setting.
pub const MISSING_CREDENTIALS_MESSAGE: &str = "invalid host or credentials received.";

/// Main configuration structure for the ZMesh client.
///
/// ## Usage
/// ```rust,no_run
/// use config::ZmeshConfig;
///
/// let config = ZmeshConfig::default();
/// println!("Catalog host: {}", config.provider.host);
/// ```
///
/// ## Fields
/// - `provider`: where the catalog API lives and how to log in
/// - `observability`: logging settings
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default, PartialEq, Eq)]
pub struct ZmeshConfig {
    /// Catalog API connection and credentials
    #[serde(default)]
    #[validate(nested)]
    pub provider: ProviderConfig,

    /// Logging configuration
    #[serde(default)]
    #[validate(nested)]
    pub observability: ObservabilityConfig
}

/// Catalog API connection settings.
///
/// ## Validation
/// - `host`, `organisationname`, `email`, `password`: required
/// - `email`: must look like an e-mail address
/// - `timeout_seconds`: 1-600
#[derive(Clone, Serialize, Deserialize, Validate, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Base URL of the catalog API, e.g. `https://mesh.example.com`
    #[serde(default)]
    #[validate(length(min = 1, message = "invalid host or credentials received."))]
    pub host: String,

    /// Organisation the principal logs in to
    #[serde(default)]
    #[validate(length(min = 1, message = "invalid host or credentials received."))]
    pub organisationname: String,

    /// Login e-mail
    #[serde(default)]
    #[validate(
        length(min = 1, message = "invalid host or credentials received."),
        email
    )]
    pub email: String,

    /// Login password
    #[serde(default)]
    #[validate(length(min = 1, message = "invalid host or credentials received."))]
    pub password: String,

    /// HTTP request timeout in seconds
    #[serde(default = "default_provider_timeout_seconds")]
    #[validate(range(min = 1, max = 600))]
    pub timeout_seconds: u64
}

fn default_provider_timeout_seconds() -> u64 {
    120
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            organisationname: String::new(),
            email: String::new(),
            password: String::new(),
            timeout_seconds: default_provider_timeout_seconds()
        }
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("host", &self.host)
            .field("organisationname", &self.organisationname)
            .field("email", &self.email)
            .field("password", &"***")
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq, Eq)]
pub struct ObservabilityConfig {
    /// Logging level
    #[serde(default = "default_observability_logging_level")]
    #[validate(custom(function = "validate_logging_level"))]
    pub logging_level: String
}

fn default_observability_logging_level() -> String {
    "info".to_string()
}

fn validate_logging_level(value: &str) -> Result<(), validator::ValidationError> {
    match value {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(validator::ValidationError::new("Invalid logging level"))
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            logging_level: default_observability_logging_level()
        }
    }
}
