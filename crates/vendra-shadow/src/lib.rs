// SPDX-FileCopyrightText: 2026 Vendra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Local read-state shadow for the Vendra sync engine.
//!
//! Guarantees that once a notification has been marked read by this client it
//! is never displayed as unread again, even when the remote fetch returns a
//! stale flag. The shadow is a small capped ID set persisted through the
//! [`LocalStore`](vendra_core::traits::LocalStore) seam, so it works over any
//! key-value persistence, not just one runtime's storage primitive.

pub mod file;
pub mod shadow;

pub use file::FileStore;
pub use shadow::{apply_local_read_status, DEFAULT_MAX_TRACKED, READ_SHADOW_KEY, ReadShadow};
