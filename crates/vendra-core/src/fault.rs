// SPDX-FileCopyrightText: 2026 Vendra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Classification of remote error messages into fault classes.
//!
//! The remote platform reports failures as free-form message strings. A small
//! set of known signatures drives automatic handling: policy-recursion faults
//! trigger a remediation RPC plus one retry, permission faults may do the same
//! (config-gated), and oversized-payload faults are rewritten into clearer
//! user-facing text. Everything else is surfaced as-is.

use strum::Display;

/// Fault class derived from a remote error message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum FaultClass {
    /// Row-level-security policy recursion ("infinite recursion" signature).
    /// A schema-side bug; always eligible for automatic remediation.
    PolicyRecursion,
    /// Authorization gap ("permission" signature). Remediation is optional,
    /// since this may be a genuine access denial rather than a policy bug.
    Permission,
    /// Oversized request body, typically an over-large encoded image.
    Payload,
    /// Anything else: network faults, constraint violations, unknown errors.
    Transient,
}

/// Oversized-payload signatures seen from the platform's HTTP layer.
const PAYLOAD_SIGNATURES: &[&str] = &[
    "payload too large",
    "request entity too large",
    "exceeded the maximum allowed size",
];

/// Classify a remote error message by its known signatures.
///
/// Recursion wins over permission when a message matches both, because the
/// recursion text is the more specific signature.
pub fn classify(message: &str) -> FaultClass {
    let lower = message.to_lowercase();
    if lower.contains("infinite recursion") {
        return FaultClass::PolicyRecursion;
    }
    if lower.contains("permission") {
        return FaultClass::Permission;
    }
    if PAYLOAD_SIGNATURES.iter().any(|sig| lower.contains(sig)) {
        return FaultClass::Payload;
    }
    FaultClass::Transient
}
