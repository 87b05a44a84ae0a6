// SPDX-FileCopyrightText: 2026 Vendra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration error diagnostics.
//!
//! Converts Figment deserialization errors into miette diagnostics so config
//! mistakes render with a code and help text instead of a bare parse dump.

use miette::Diagnostic;
use thiserror::Error;

/// A configuration error with diagnostic information.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// The TOML/env input could not be deserialized into the config model.
    #[error("configuration parse error: {message}")]
    #[diagnostic(
        code(vendra::config::parse),
        help("check vendra.toml against the documented sections: client, remote, shadow, sync, media")
    )]
    Parse {
        /// Figment's description of the failure, including the offending key.
        message: String,
    },

    /// A semantic constraint failed after deserialization.
    #[error("configuration validation error: {message}")]
    #[diagnostic(code(vendra::config::validation))]
    Validation { message: String },
}

/// Convert a figment error (which may aggregate several failures) into one
/// diagnostic per failure.
pub fn figment_to_config_errors(err: figment::Error) -> Vec<ConfigError> {
    err.into_iter()
        .map(|e| ConfigError::Parse {
            message: e.to_string(),
        })
        .collect()
}

/// Render a list of config errors for terminal display, one per line.
pub fn render_errors(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(|e| format!("error: {e}"))
        .collect::<Vec<_>>()
        .join("\n")
}
