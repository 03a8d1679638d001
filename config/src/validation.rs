//! # Configuration Validation
//!
//! Validates the merged configuration using the `validator` crate.

use crate::config::{MISSING_CREDENTIALS_MESSAGE, ZmeshConfig};
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

/// Validate configuration structure.
///
/// ## Validation Rules
/// ### Provider
/// - `host`, `organisationname`, `email`, `password`: required
/// - `email`: e-mail shaped
/// - `timeout_seconds`: 1-600
///
/// ### Observability
/// - `logging_level`: must be "trace", "debug", "info", "warn", or "error"
pub fn validate(config: &ZmeshConfig) -> Result<(), ValidationErrors> {
    config.validate()
}

/// True when validation failed only because a connection setting is missing.
/// Callers surface these with [`MISSING_CREDENTIALS_MESSAGE`].
pub fn is_missing_credentials(errors: &ValidationErrors) -> bool {
    let Some(ValidationErrorsKind::Struct(provider)) = errors.errors().get("provider") else {
        return false;
    };
    provider.field_errors().values().any(|field| {
        field
            .iter()
            .any(|e| e.message.as_deref() == Some(MISSING_CREDENTIALS_MESSAGE))
    })
}
