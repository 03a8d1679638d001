//! # Configuration System
//!
//! Configuration management for the ZMesh catalog client.
//!
//! This crate provides:
//! - Configuration structures for the catalog connection and logging
//! - Environment variable loading (12-factor app principles)
//! - Configuration file loading (TOML/YAML)
//! - Configuration precedence (CLI > env > file > defaults)
//! - Configuration validation

pub mod config;
pub mod file_loader;
pub mod loader;
pub mod precedence;
pub mod validation;

pub use config::{MISSING_CREDENTIALS_MESSAGE, ObservabilityConfig, ProviderConfig, ZmeshConfig};
pub use file_loader::{ConfigFileError, ConfigFormat, load_from_file, load_from_toml, load_from_yaml};
pub use loader::{ConfigEnvError, load_from_env};
pub use precedence::{ConfigOverrides, merge_configs};
pub use validation::{is_missing_credentials, validate};
pub use validator::Validate;
