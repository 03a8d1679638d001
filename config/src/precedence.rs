//! # Configuration Precedence
//!
//! Merges configuration from multiple sources with precedence rules.
//!
//! # Precedence Order
//! 1. CLI arguments (highest priority)
//! 2. Environment variables
//! 3. Configuration file
//! 4. Default values (lowest priority)

use crate::config::ZmeshConfig;

/// A partial configuration: only the settings one source actually supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub host: Option<String>,
    pub organisationname: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub logging_level: Option<String>
}

impl ConfigOverrides {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Merge configuration sources with precedence.
///
/// ## Usage
/// ```rust,no_run
/// use config::{ZmeshConfig, ConfigOverrides, merge_configs, load_from_file, load_from_env};
/// use std::path::Path;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let from_file = load_from_file(Path::new("zmesh.toml"))?;
///     let from_env = load_from_env()?;
///
///     let _config = merge_configs(from_file, from_env, "env", ConfigOverrides::default(), "cli");
///     Ok(())
/// }
/// ```
///
/// `base` is the file configuration, or [`ZmeshConfig::default`] when there
/// is no file; serde fills omitted file fields with defaults.
pub fn merge_configs(
    base: ZmeshConfig,
    env_overrides: ConfigOverrides,
    env_source_name: &str,
    cli_overrides: ConfigOverrides,
    cli_source_name: &str
) -> ZmeshConfig {
    let config = merge_with_logging(base, &env_overrides, env_source_name);
    merge_with_logging(config, &cli_overrides, cli_source_name)
}

fn merge_with_logging(mut base: ZmeshConfig, overrides: &ConfigOverrides, source_name: &str) -> ZmeshConfig {
    let mut changes = Vec::new();
    let provider = &mut base.provider;

    if let Some(host) = &overrides.host {
        changes.push(format!("provider.host = {}", host));
        provider.host.clone_from(host);
    }
    if let Some(organisation) = &overrides.organisationname {
        changes.push(format!("provider.organisationname = {}", organisation));
        provider.organisationname.clone_from(organisation);
    }
    if let Some(email) = &overrides.email {
        changes.push(format!("provider.email = {}", email));
        provider.email.clone_from(email);
    }
    if let Some(password) = &overrides.password {
        changes.push("provider.password = ***".to_string());
        provider.password.clone_from(password);
    }
    if let Some(timeout) = overrides.timeout_seconds {
        changes.push(format!("provider.timeout_seconds = {}", timeout));
        provider.timeout_seconds = timeout;
    }
    if let Some(level) = &overrides.logging_level {
        changes.push(format!("observability.logging_level = {}", level));
        base.observability.logging_level.clone_from(level);
    }

    if !changes.is_empty() {
        tracing::info!("Configuration from {}: {:?}", source_name, changes);
    }

    base
}
