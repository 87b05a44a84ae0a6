// SPDX-FileCopyrightText: 2026 Vendra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Local key-value persistence trait.

use crate::error::VendraError;

/// Durable, browser-localStorage-shaped key-value persistence.
///
/// The read-state shadow is the only consumer. Operations are synchronous and
/// read-modify-write is not atomic across processes; a lost update between two
/// concurrent writers is an accepted limitation.
pub trait LocalStore: Send + Sync {
    /// Read the value stored under a key, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Store a value under a key, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), VendraError>;

    /// Remove a key and its value.
    fn remove(&self, key: &str) -> Result<(), VendraError>;
}
