// SPDX-FileCopyrightText: 2026 Vendra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The read-state shadow: a bounded, persisted set of notification IDs this
//! client has marked read.
//!
//! The remote store can return stale `read = false` flags under
//! read-your-own-write inconsistency. The shadow overrides them: once an ID
//! is recorded here, [`ReadShadow::apply`] forces that notification's read
//! flag to true on every fetch, page reload, and realtime push. The set is
//! capped (oldest evicted first) and self-healing against corrupted storage.

use std::collections::HashSet;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use vendra_core::model::Notification;
use vendra_core::traits::LocalStore;
use vendra_core::VendraError;

/// Storage key holding the JSON array of read notification IDs.
pub const READ_SHADOW_KEY: &str = "vendra.notifications.read";

/// Default cap on tracked IDs; oldest entries are evicted first.
pub const DEFAULT_MAX_TRACKED: usize = 500;

/// Persisted overlay guaranteeing monotonic notification read state.
pub struct ReadShadow {
    store: Arc<dyn LocalStore>,
    max_tracked: usize,
}

impl ReadShadow {
    pub fn new(store: Arc<dyn LocalStore>, max_tracked: usize) -> Self {
        Self { store, max_tracked }
    }

    pub fn with_default_cap(store: Arc<dyn LocalStore>) -> Self {
        Self::new(store, DEFAULT_MAX_TRACKED)
    }

    /// Load the tracked IDs, oldest first.
    ///
    /// Defensive against corruption: a missing key yields an empty list; a
    /// non-array value is discarded and the key rewritten empty; entries that
    /// are not canonical UUIDs are dropped and the valid subset rewritten.
    pub fn load(&self) -> Vec<String> {
        let Some(raw) = self.store.get(READ_SHADOW_KEY) else {
            return Vec::new();
        };

        let parsed: Value = match serde_json::from_str(&raw) {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "read shadow is corrupt, resetting");
                self.persist(&[]);
                return Vec::new();
            }
        };

        let Value::Array(entries) = parsed else {
            warn!("read shadow is not an array, resetting");
            self.persist(&[]);
            return Vec::new();
        };

        let total = entries.len();
        let valid: Vec<String> = entries
            .into_iter()
            .filter_map(|entry| match entry {
                Value::String(s) if uuid::Uuid::parse_str(&s).is_ok() => Some(s),
                other => {
                    debug!(entry = %other, "dropping non-canonical shadow entry");
                    None
                }
            })
            .collect();

        if valid.len() < total {
            warn!(
                dropped = total - valid.len(),
                kept = valid.len(),
                "read shadow contained invalid entries, rewriting valid subset"
            );
            self.persist(&valid);
        }

        valid
    }

    /// The tracked IDs as a set, for merge lookups.
    pub fn ids(&self) -> HashSet<String> {
        self.load().into_iter().collect()
    }

    /// Record IDs as read, persisting through the cap.
    ///
    /// Re-marking an existing ID moves it to the newest position. When the
    /// set exceeds the cap the oldest entries are evicted.
    pub fn mark_read<I, S>(&self, ids: I) -> Result<(), VendraError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tracked = self.load();
        for id in ids {
            let id = id.into();
            tracked.retain(|existing| existing != &id);
            tracked.push(id);
        }
        if tracked.len() > self.max_tracked {
            let excess = tracked.len() - self.max_tracked;
            tracked.drain(..excess);
        }
        let encoded = serde_json::to_string(&tracked)
            .map_err(|e| VendraError::Shadow {
                message: format!("failed to encode shadow: {e}"),
            })?;
        self.store.set(READ_SHADOW_KEY, &encoded)
    }

    /// Force `read = true` for every notification whose ID is tracked.
    /// Notifications absent from the shadow are untouched.
    pub fn apply(&self, notifications: &mut [Notification]) {
        apply_local_read_status(notifications, &self.ids());
    }

    /// Best-effort rewrite used by the self-healing load path.
    fn persist(&self, ids: &[String]) {
        match serde_json::to_string(ids) {
            Ok(encoded) => {
                if let Err(e) = self.store.set(READ_SHADOW_KEY, &encoded) {
                    warn!(error = %e, "failed to rewrite read shadow");
                }
            }
            Err(e) => warn!(error = %e, "failed to encode read shadow"),
        }
    }
}

/// Pure overlay merge: force the read flag for tracked IDs.
pub fn apply_local_read_status(notifications: &mut [Notification], read_ids: &HashSet<String>) {
    for notification in notifications {
        if read_ids.contains(&notification.id) {
            notification.read = true;
        }
    }
}
