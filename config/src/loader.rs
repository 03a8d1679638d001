//! # Environment Variable Loader
//!
//! Loads configuration overrides from environment variables following
//! 12-factor app principles.
//!
//! # Naming Convention
//! All variables carry the `ZMESH_` prefix.

use crate::precedence::ConfigOverrides;
use std::env;

pub const ENV_HOST: &str = "ZMESH_HOST";
pub const ENV_ORGANISATION_NAME: &str = "ZMESH_ORGANISATION_NAME";
pub const ENV_EMAIL: &str = "ZMESH_EMAIL";
pub const ENV_PASSWORD: &str = "ZMESH_PASSWORD";
pub const ENV_TIMEOUT_SECONDS: &str = "ZMESH_TIMEOUT_SECONDS";
pub const ENV_LOG_LEVEL: &str = "ZMESH_LOG_LEVEL";

/// Environment loading error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigEnvError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String }
}

/// Load configuration overrides from environment variables.
///
/// ## Usage
/// ```rust,no_run
/// use config::load_from_env;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let overrides = load_from_env()?;
///     println!("Host from env: {:?}", overrides.host);
///     Ok(())
/// }
/// ```
///
/// ## Environment Variables
/// - `ZMESH_HOST`: Catalog API base URL
/// - `ZMESH_ORGANISATION_NAME`: Organisation to log in to
/// - `ZMESH_EMAIL`: Login e-mail
/// - `ZMESH_PASSWORD`: Login password
/// - `ZMESH_TIMEOUT_SECONDS`: HTTP timeout in seconds
/// - `ZMESH_LOG_LEVEL`: Logging level (trace/debug/info/warn/error)
///
/// Unset and empty variables are treated alike: they override nothing.
pub fn load_from_env() -> Result<ConfigOverrides, ConfigEnvError> {
    Ok(ConfigOverrides {
        host: read_env(ENV_HOST),
        organisationname: read_env(ENV_ORGANISATION_NAME),
        email: read_env(ENV_EMAIL),
        password: read_env(ENV_PASSWORD),
        timeout_seconds: parse_env(ENV_TIMEOUT_SECONDS)?,
        logging_level: read_env(ENV_LOG_LEVEL)
    })
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Result<Option<T>, ConfigEnvError> {
    match read_env(key) {
        Some(value) => value
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigEnvError::InvalidValue {
                key: key.to_string(),
                value
            }),
        None => Ok(None)
    }
}
