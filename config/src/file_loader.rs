//! Config files: TOML or YAML, picked by extension.

use crate::config::ZmeshConfig;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error
    },

    #[error("Failed to parse TOML in {}: {source}", path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error
    },

    #[error("Failed to parse YAML in {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error
    },

    #[error("Config file has no extension")]
    NoExtension,

    #[error("Unsupported config file format: {0}")]
    UnsupportedFormat(String)
}

/// On-disk formats accepted for [`ZmeshConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Yaml
}

impl ConfigFormat {
    /// `.toml`, `.yaml` or `.yml`, case-insensitive.
    pub fn from_path(path: &Path) -> Result<Self, ConfigFileError> {
        let extension = path
            .extension()
            .and_then(|s| s.to_str())
            .ok_or(ConfigFileError::NoExtension)?;

        match extension.to_lowercase().as_str() {
            "toml" => Ok(Self::Toml),
            "yaml" | "yml" => Ok(Self::Yaml),
            other => Err(ConfigFileError::UnsupportedFormat(other.to_string()))
        }
    }

    pub fn parse(self, path: &Path, contents: &str) -> Result<ZmeshConfig, ConfigFileError> {
        match self {
            Self::Toml => toml::from_str(contents).map_err(|source| ConfigFileError::Toml {
                path: path.to_path_buf(),
                source
            }),
            Self::Yaml => serde_yaml::from_str(contents).map_err(|source| ConfigFileError::Yaml {
                path: path.to_path_buf(),
                source
            })
        }
    }
}

fn read(path: &Path) -> Result<String, ConfigFileError> {
    std::fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => ConfigFileError::NotFound(path.to_path_buf()),
        _ => ConfigFileError::Read {
            path: path.to_path_buf(),
            source
        }
    })
}

/// Load configuration from a TOML file regardless of its extension.
///
/// ## Usage
/// ```rust,no_run
/// use config::load_from_toml;
/// use std::path::Path;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = load_from_toml(Path::new("zmesh.toml"))?;
///     println!("Catalog host: {}", config.provider.host);
///     Ok(())
/// }
/// ```
pub fn load_from_toml(path: &Path) -> Result<ZmeshConfig, ConfigFileError> {
    ConfigFormat::Toml.parse(path, &read(path)?)
}

/// Load configuration from a YAML file regardless of its extension.
pub fn load_from_yaml(path: &Path) -> Result<ZmeshConfig, ConfigFileError> {
    ConfigFormat::Yaml.parse(path, &read(path)?)
}

/// Load configuration with the format taken from the extension.
pub fn load_from_file(path: &Path) -> Result<ZmeshConfig, ConfigFileError> {
    let format = ConfigFormat::from_path(path)?;
    format.parse(path, &read(path)?)
}
