// SPDX-FileCopyrightText: 2026 Larder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as valid bind addresses and non-empty store paths.

use crate::model::LarderConfig;

/// A configuration error: either a parse failure from Figment or a semantic
/// validation failure.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML/env parse or merge failure.
    #[error("config parse error: {0}")]
    Parse(#[from] figment::Error),

    /// Semantic validation failure.
    #[error("config validation error: {message}")]
    Validation { message: String },
}

/// Render collected configuration errors to stderr, one per line.
pub fn render_errors(errors: &[ConfigError]) {
    for error in errors {
        eprintln!("larder: {error}");
    }
}

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &LarderConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let host = config.gateway.host.trim();
    if host.is_empty() {
        errors.push(ConfigError::Validation {
            message: "gateway.host must not be empty".to_string(),
        });
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!("gateway.host `{host}` is not a valid IP address or hostname"),
            });
        }
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if config.storage.image_base_location.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.image_base_location must not be empty".to_string(),
        });
    }

    if let Some(key) = &config.openai.api_key {
        if key.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: "openai.api_key is set but empty; unset it or provide a key".to_string(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
