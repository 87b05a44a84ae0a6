// SPDX-FileCopyrightText: 2026 Vendra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Vendra sync engine.

use thiserror::Error;

use crate::fault::FaultClass;

/// The primary error type used across all Vendra adapter traits and sync operations.
#[derive(Debug, Error)]
pub enum VendraError {
    /// No session is available. Fetch and mutation operations short-circuit
    /// before any remote call is attempted.
    #[error("not authenticated")]
    NotAuthenticated,

    /// The remote platform rejected or failed an operation. The message is
    /// the remote client's verbatim text; `fault` is its classification.
    #[error("remote error: {message}")]
    Remote {
        message: String,
        fault: FaultClass,
    },

    /// Malformed local input, rejected before any remote call.
    #[error("invalid {field}: {message}")]
    Validation { field: String, message: String },

    /// Media/bucket storage errors, already rewritten into user-facing text.
    #[error("{message}")]
    Media { message: String },

    /// Operation exceeded its hard timeout.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Local read-state shadow persistence errors.
    #[error("shadow store error: {message}")]
    Shadow { message: String },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl VendraError {
    /// Build a [`VendraError::Remote`] with the fault class derived from the message.
    pub fn remote(message: impl Into<String>) -> Self {
        let message = message.into();
        let fault = crate::fault::classify(&message);
        VendraError::Remote { message, fault }
    }

    /// Build a field-scoped validation error.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        VendraError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// The fault class, for errors that carry one.
    pub fn fault(&self) -> Option<FaultClass> {
        match self {
            VendraError::Remote { fault, .. } => Some(*fault),
            _ => None,
        }
    }
}
