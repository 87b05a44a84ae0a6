// SPDX-FileCopyrightText: 2026 Vendra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Realtime reconciliation: a listener task that folds pushed change events
//! into the snapshot's notification list.
//!
//! The merge itself is a pure function over (rows, event, shadow set), so the
//! invariant behavior is testable without any transport. The listener is
//! plumbing: one subscription per table, one event at a time, teardown via
//! cancellation token.

use std::collections::HashSet;
use std::sync::Arc;

use serde_json::Value;
use strum::Display;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use vendra_core::model::Notification;
use vendra_core::traits::RealtimeFeed;
use vendra_core::types::{ChangeEvent, ChangeKind};
use vendra_core::VendraError;

use crate::engine::SyncEngine;

/// Lifecycle of a table subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum SubscriptionState {
    Unsubscribed,
    Subscribing,
    Subscribed,
}

const NOTIFICATIONS_TABLE: &str = "notifications";

/// Listens to the notifications change feed and reconciles events into the
/// engine's snapshot.
pub struct NotificationListener {
    feed: Arc<dyn RealtimeFeed>,
    engine: Arc<SyncEngine>,
    state: Mutex<SubscriptionState>,
    cancel: Mutex<Option<CancellationToken>>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl NotificationListener {
    pub fn new(feed: Arc<dyn RealtimeFeed>, engine: Arc<SyncEngine>) -> Self {
        Self {
            feed,
            engine,
            state: Mutex::new(SubscriptionState::Unsubscribed),
            cancel: Mutex::new(None),
            task: Mutex::new(None),
        }
    }

    pub async fn state(&self) -> SubscriptionState {
        *self.state.lock().await
    }

    /// Subscribe and start the consumer task. An existing subscription is
    /// torn down first, so at most one is ever active.
    pub async fn start(&self) -> Result<(), VendraError> {
        if *self.state.lock().await != SubscriptionState::Unsubscribed {
            self.stop().await;
        }

        *self.state.lock().await = SubscriptionState::Subscribing;
        let mut rx = match self.feed.subscribe(NOTIFICATIONS_TABLE).await {
            Ok(rx) => rx,
            Err(err) => {
                *self.state.lock().await = SubscriptionState::Unsubscribed;
                return Err(err);
            }
        };
        *self.state.lock().await = SubscriptionState::Subscribed;

        let token = CancellationToken::new();
        let child = token.child_token();
        *self.cancel.lock().await = Some(token);

        let engine = Arc::clone(&self.engine);
        let handle = tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = child.cancelled() => break,
                    event = rx.recv() => {
                        let Some(event) = event else {
                            debug!("notification feed closed");
                            break;
                        };
                        engine.apply_notification_change(event).await;
                    }
                }
            }
        });
        *self.task.lock().await = Some(handle);

        info!(table = NOTIFICATIONS_TABLE, "realtime subscription active");
        Ok(())
    }

    /// Cancel the consumer task and tear down the subscription.
    /// Unsubscribe is best-effort: a failure is logged, not retried.
    pub async fn stop(&self) {
        if let Some(token) = self.cancel.lock().await.take() {
            token.cancel();
        }
        if let Some(handle) = self.task.lock().await.take() {
            if let Err(e) = handle.await {
                warn!(error = %e, "listener task join failed");
            }
        }
        if let Err(e) = self.feed.unsubscribe(NOTIFICATIONS_TABLE).await {
            warn!(error = %e, "unsubscribe failed, abandoning channel");
        }
        *self.state.lock().await = SubscriptionState::Unsubscribed;
    }
}

impl SyncEngine {
    /// Fold one pushed change into the snapshot's notifications.
    pub async fn apply_notification_change(&self, event: ChangeEvent<Value>) {
        let read_ids = self.shadow.ids();
        let mut snap = self.snapshot.write().await;
        merge_change(&mut snap.notifications, event, &read_ids);
    }
}

/// Pure merge of one change event into a notification list.
///
/// Inserts prepend (newest first); an ID already in the shadow arrives
/// pre-read. Updates replace the matching row, except a read true-to-false
/// flip, which is overridden back to true and logged rather than applied.
/// Deletes remove the matching row, matching on whichever payload carries
/// the ID.
pub fn merge_change(
    notifications: &mut Vec<Notification>,
    event: ChangeEvent<Value>,
    read_ids: &HashSet<String>,
) {
    match event.kind {
        ChangeKind::Insert => {
            let Some(mut incoming) = decode_payload(event.new) else {
                return;
            };
            if read_ids.contains(&incoming.id) {
                incoming.read = true;
            }
            notifications.insert(0, incoming);
        }
        ChangeKind::Update => {
            let Some(mut incoming) = decode_payload(event.new) else {
                return;
            };
            let Some(existing) = notifications.iter_mut().find(|n| n.id == incoming.id) else {
                debug!(id = %incoming.id, "update for unknown notification ignored");
                return;
            };
            if existing.read && !incoming.read {
                warn!(id = %incoming.id, "refusing read regression from remote update");
                incoming.read = true;
            }
            if read_ids.contains(&incoming.id) {
                incoming.read = true;
            }
            *existing = incoming;
        }
        ChangeKind::Delete => {
            let Some(id) = event.row_id().map(str::to_owned) else {
                debug!("delete event without row id ignored");
                return;
            };
            notifications.retain(|n| n.id != id);
        }
    }
}

fn decode_payload(payload: Option<Value>) -> Option<Notification> {
    let payload = payload?;
    match serde_json::from_value(payload) {
        Ok(notification) => Some(notification),
        Err(e) => {
            debug!(error = %e, "change payload failed shape check, ignoring");
            None
        }
    }
}
