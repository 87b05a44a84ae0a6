// SPDX-FileCopyrightText: 2026 Vendra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Listener lifecycle and end-to-end reconciliation through the feed.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};

use vendra_config::model::SyncConfig;
use vendra_core::types::{ChangeEvent, ChangeKind};
use vendra_core::LocalStore;
use vendra_shadow::ReadShadow;
use vendra_sync::{NotificationListener, SubscriptionState, SyncEngine};
use vendra_test_utils::{customer_session, MemoryStore, MockFeed, MockRemote};

fn note_payload(id: &str, read: bool) -> Value {
    json!({
        "id": id,
        "user_id": "u1",
        "title": "t",
        "message": "m",
        "read": read,
        "created_at": "2026-08-01T00:00:00Z",
    })
}

fn engine_with_store(store: Arc<MemoryStore>) -> Arc<SyncEngine> {
    let shadow = ReadShadow::with_default_cap(store as Arc<dyn LocalStore>);
    let engine = Arc::new(SyncEngine::new(
        Arc::new(MockRemote::new()),
        None,
        shadow,
        SyncConfig::default(),
    ));
    engine.set_session(Some(customer_session()));
    engine
}

/// Wait for the listener task to drain the channel.
async fn settle() {
    tokio::time::sleep(Duration::from_millis(50)).await;
}

#[tokio::test]
async fn listener_lifecycle() {
    let feed = Arc::new(MockFeed::new());
    let engine = engine_with_store(Arc::new(MemoryStore::new()));
    let listener = NotificationListener::new(Arc::clone(&feed) as _, engine);

    assert_eq!(listener.state().await, SubscriptionState::Unsubscribed);
    listener.start().await.unwrap();
    assert_eq!(listener.state().await, SubscriptionState::Subscribed);
    assert_eq!(feed.subscribe_count("notifications"), 1);

    listener.stop().await;
    assert_eq!(listener.state().await, SubscriptionState::Unsubscribed);
    assert_eq!(feed.unsubscribe_count("notifications"), 1);
}

#[tokio::test]
async fn restart_tears_down_previous_subscription() {
    let feed = Arc::new(MockFeed::new());
    let engine = engine_with_store(Arc::new(MemoryStore::new()));
    let listener = NotificationListener::new(Arc::clone(&feed) as _, engine);

    listener.start().await.unwrap();
    listener.start().await.unwrap();

    assert_eq!(feed.subscribe_count("notifications"), 2);
    assert_eq!(feed.unsubscribe_count("notifications"), 1);
    assert_eq!(listener.state().await, SubscriptionState::Subscribed);
}

#[tokio::test]
async fn failed_unsubscribe_is_tolerated() {
    let feed = Arc::new(MockFeed::new());
    let engine = engine_with_store(Arc::new(MemoryStore::new()));
    let listener = NotificationListener::new(Arc::clone(&feed) as _, engine);

    listener.start().await.unwrap();
    feed.set_fail_unsubscribe(true);
    listener.stop().await;
    assert_eq!(listener.state().await, SubscriptionState::Unsubscribed);
}

#[tokio::test]
async fn pushed_insert_lands_in_snapshot() {
    let feed = Arc::new(MockFeed::new());
    let engine = engine_with_store(Arc::new(MemoryStore::new()));
    let listener = NotificationListener::new(Arc::clone(&feed) as _, Arc::clone(&engine));
    listener.start().await.unwrap();

    feed.push(
        "notifications",
        ChangeEvent {
            kind: ChangeKind::Insert,
            new: Some(note_payload("n1", false)),
            old: None,
        },
    )
    .await;
    settle().await;

    let snap = engine.snapshot().await;
    assert_eq!(snap.notifications.len(), 1);
    assert_eq!(snap.notifications[0].id, "n1");
    drop(snap);
    listener.stop().await;
}

#[tokio::test]
async fn pushed_update_cannot_regress_read_state() {
    let read_id = uuid::Uuid::from_u128(21).to_string();
    let store = Arc::new(MemoryStore::new());
    let shadow = ReadShadow::with_default_cap(Arc::clone(&store) as Arc<dyn LocalStore>);
    shadow.mark_read([read_id.as_str()]).unwrap();

    let feed = Arc::new(MockFeed::new());
    let engine = engine_with_store(store);
    let listener = NotificationListener::new(Arc::clone(&feed) as _, Arc::clone(&engine));
    listener.start().await.unwrap();

    // Arrives already read because the shadow tracks it.
    feed.push(
        "notifications",
        ChangeEvent {
            kind: ChangeKind::Insert,
            new: Some(note_payload(&read_id, false)),
            old: None,
        },
    )
    .await;
    // A stale remote update tries to flip it back to unread.
    feed.push(
        "notifications",
        ChangeEvent {
            kind: ChangeKind::Update,
            new: Some(note_payload(&read_id, false)),
            old: Some(note_payload(&read_id, true)),
        },
    )
    .await;
    settle().await;

    let snap = engine.snapshot().await;
    assert_eq!(snap.notifications.len(), 1);
    assert!(snap.notifications[0].read, "read state must stay monotonic");
    drop(snap);
    listener.stop().await;
}

#[tokio::test]
async fn pushed_delete_removes_row() {
    let feed = Arc::new(MockFeed::new());
    let engine = engine_with_store(Arc::new(MemoryStore::new()));
    let listener = NotificationListener::new(Arc::clone(&feed) as _, Arc::clone(&engine));
    listener.start().await.unwrap();

    feed.push(
        "notifications",
        ChangeEvent {
            kind: ChangeKind::Insert,
            new: Some(note_payload("n1", false)),
            old: None,
        },
    )
    .await;
    feed.push(
        "notifications",
        ChangeEvent {
            kind: ChangeKind::Delete,
            new: None,
            old: Some(json!({ "id": "n1" })),
        },
    )
    .await;
    settle().await;

    assert!(engine.snapshot().await.notifications.is_empty());
    listener.stop().await;
}
