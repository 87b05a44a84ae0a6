// SPDX-FileCopyrightText: 2026 Vendra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory [`RealtimeFeed`] fake that lets tests push change events.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::mpsc;

use vendra_core::traits::RealtimeFeed;
use vendra_core::types::ChangeEvent;
use vendra_core::VendraError;

/// Fake realtime feed. Each `subscribe` opens a fresh channel; tests inject
/// events with [`MockFeed::push`].
#[derive(Default)]
pub struct MockFeed {
    senders: Mutex<HashMap<String, mpsc::Sender<ChangeEvent<Value>>>>,
    subscribe_count: Mutex<HashMap<String, usize>>,
    unsubscribe_count: Mutex<HashMap<String, usize>>,
    fail_unsubscribe: Mutex<bool>,
}

impl MockFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver an event to the current subscriber of a table, if any.
    pub async fn push(&self, table: &str, event: ChangeEvent<Value>) {
        let sender = self.senders.lock().unwrap().get(table).cloned();
        if let Some(sender) = sender {
            let _ = sender.send(event).await;
        }
    }

    /// Times `subscribe` was called for a table.
    pub fn subscribe_count(&self, table: &str) -> usize {
        *self.subscribe_count.lock().unwrap().get(table).unwrap_or(&0)
    }

    /// Times `unsubscribe` was called for a table.
    pub fn unsubscribe_count(&self, table: &str) -> usize {
        *self
            .unsubscribe_count
            .lock()
            .unwrap()
            .get(table)
            .unwrap_or(&0)
    }

    /// Make subsequent unsubscribes fail, for best-effort-teardown tests.
    pub fn set_fail_unsubscribe(&self, fail: bool) {
        *self.fail_unsubscribe.lock().unwrap() = fail;
    }
}

#[async_trait]
impl RealtimeFeed for MockFeed {
    async fn subscribe(
        &self,
        table: &str,
    ) -> Result<mpsc::Receiver<ChangeEvent<Value>>, VendraError> {
        let (tx, rx) = mpsc::channel(64);
        self.senders.lock().unwrap().insert(table.to_string(), tx);
        *self
            .subscribe_count
            .lock()
            .unwrap()
            .entry(table.to_string())
            .or_default() += 1;
        Ok(rx)
    }

    async fn unsubscribe(&self, table: &str) -> Result<(), VendraError> {
        *self
            .unsubscribe_count
            .lock()
            .unwrap()
            .entry(table.to_string())
            .or_default() += 1;
        if *self.fail_unsubscribe.lock().unwrap() {
            return Err(VendraError::remote("channel teardown failed"));
        }
        self.senders.lock().unwrap().remove(table);
        Ok(())
    }
}
