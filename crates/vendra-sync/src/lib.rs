// SPDX-FileCopyrightText: 2026 Vendra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The Vendra synchronization engine.
//!
//! Owns the client-side cached copy of the remote store: a snapshot of the
//! twelve synchronized collections, a sequential fetch pass that survives
//! per-collection failures, optimistic mutations with rollback, and a
//! realtime listener that reconciles pushed changes while preserving the
//! monotonic notification read invariant.

pub mod engine;
pub mod media;
pub mod mutations;
pub mod optimistic;
pub mod realtime;
pub mod snapshot;

pub use engine::SyncEngine;
pub use media::MediaUploader;
pub use realtime::{merge_change, NotificationListener, SubscriptionState};
pub use snapshot::{Collection, CollectionStatus, Snapshot};
