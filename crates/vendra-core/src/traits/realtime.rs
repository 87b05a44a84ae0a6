// SPDX-FileCopyrightText: 2026 Vendra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Realtime change feed trait.

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::mpsc;

use crate::error::VendraError;
use crate::types::ChangeEvent;

/// Push channel delivering row change events for a named collection.
///
/// Events arrive one at a time in delivery order; consumers must not assume
/// batching or coalescing. At most one subscription per table is expected --
/// re-subscribing tears down the previous channel first.
#[async_trait]
pub trait RealtimeFeed: Send + Sync {
    /// Subscribe to change events for a table. The receiver closes when the
    /// subscription ends.
    async fn subscribe(
        &self,
        table: &str,
    ) -> Result<mpsc::Receiver<ChangeEvent<Value>>, VendraError>;

    /// Tear down the subscription for a table. Best-effort; callers log and
    /// move on when this fails.
    async fn unsubscribe(&self, table: &str) -> Result<(), VendraError>;
}
