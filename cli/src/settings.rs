//! Resolves the effective configuration: file, then `ZMESH_*` environment
//! variables, then command-line flags.

use crate::commands::GlobalArgs;
use anyhow::{Context, Result, bail};
use config::{
    ConfigOverrides, MISSING_CREDENTIALS_MESSAGE, ZmeshConfig, is_missing_credentials,
    load_from_env, load_from_file, merge_configs, validate
};

/// Sources read but not yet merged, so logging can be set up before the
/// merge reports what it overrode.
pub struct ConfigSources {
    file: ZmeshConfig,
    env: ConfigOverrides,
    cli: ConfigOverrides
}

impl ConfigSources {
    pub fn load(args: &GlobalArgs) -> Result<Self> {
        let file = match &args.config {
            Some(path) => load_from_file(path)
                .with_context(|| format!("Failed to load config file {}", path.display()))?,
            None => ZmeshConfig::default()
        };
        let env = load_from_env().context("Invalid environment configuration")?;

        Ok(Self {
            file,
            env,
            cli: cli_overrides(args)
        })
    }

    /// Highest-precedence logging level across the sources.
    pub fn logging_level(&self) -> &str {
        self.cli
            .logging_level
            .as_deref()
            .or(self.env.logging_level.as_deref())
            .unwrap_or(self.file.observability.logging_level.as_str())
    }

    pub fn resolve(self) -> Result<ZmeshConfig> {
        let config = merge_configs(self.file, self.env, "env", self.cli, "cli");

        if let Err(errors) = validate(&config) {
            if is_missing_credentials(&errors) {
                bail!(MISSING_CREDENTIALS_MESSAGE);
            }
            bail!("Invalid configuration: {}", errors);
        }
        Ok(config)
    }
}

fn cli_overrides(args: &GlobalArgs) -> ConfigOverrides {
    ConfigOverrides {
        host: args.host.clone(),
        organisationname: args.organisation.clone(),
        email: args.email.clone(),
        password: None,
        timeout_seconds: args.timeout,
        logging_level: args.log_level.clone()
    }
}
