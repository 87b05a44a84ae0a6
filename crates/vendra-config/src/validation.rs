// SPDX-FileCopyrightText: 2026 Vendra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as well-formed URLs, non-empty paths, and positive caps.

use crate::diagnostic::ConfigError;
use crate::model::VendraConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &VendraConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.client.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "client.log_level `{}` is not one of trace, debug, info, warn, error",
                config.client.log_level
            ),
        });
    }

    if let Some(ref url) = config.remote.url {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            errors.push(ConfigError::Validation {
                message: format!("remote.url `{url}` must start with http:// or https://"),
            });
        }
    }

    // A configured URL without any key leaves both client variants unusable.
    if config.remote.url.is_some()
        && config.remote.anon_key.is_none()
        && config.remote.service_role_key.is_none()
    {
        errors.push(ConfigError::Validation {
            message: "remote.url is set but neither remote.anon_key nor remote.service_role_key is configured".to_string(),
        });
    }

    if config.shadow.path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "shadow.path must not be empty".to_string(),
        });
    }

    if config.shadow.max_tracked == 0 {
        errors.push(ConfigError::Validation {
            message: "shadow.max_tracked must be at least 1".to_string(),
        });
    }

    if config.sync.op_timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "sync.op_timeout_secs must be at least 1".to_string(),
        });
    }

    if config.sync.remediation_fn.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "sync.remediation_fn must not be empty".to_string(),
        });
    }

    if config.media.bucket.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "media.bucket must not be empty".to_string(),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
