// SPDX-FileCopyrightText: 2026 Vendra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mutation behavior: optimistic rollback, idempotent adds, notification
//! read state write-through, and the hard operation timeout.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use vendra_config::model::SyncConfig;
use vendra_core::model::OrderStatus;
use vendra_core::traits::RemoteStore;
use vendra_core::types::{Filter, SelectQuery};
use vendra_core::{LocalStore, VendraError};
use vendra_shadow::ReadShadow;
use vendra_sync::SyncEngine;
use vendra_test_utils::{admin_session, customer_session, MemoryStore, MockRemote, Op};

fn engine_over(remote: Arc<MockRemote>) -> SyncEngine {
    let shadow = ReadShadow::with_default_cap(Arc::new(MemoryStore::new()));
    SyncEngine::new(remote, None, shadow, SyncConfig::default())
}

fn order(id: &str, user_id: &str, status: &str) -> Value {
    json!({
        "id": id,
        "user_id": user_id,
        "total_amount": 20.0,
        "status": status,
        "created_at": "2026-08-01T00:00:00Z",
    })
}

async fn seeded_engine(remote: &Arc<MockRemote>) -> SyncEngine {
    let engine = engine_over(Arc::clone(remote));
    engine.set_session(Some(admin_session()));
    engine.fetch_all().await.unwrap();
    engine
}

#[tokio::test]
async fn status_update_requires_known_status() {
    let remote = Arc::new(MockRemote::new());
    let engine = engine_over(Arc::clone(&remote));
    engine.set_session(Some(admin_session()));

    let err = engine.update_order_status("o1", "refunded").await.unwrap_err();
    assert!(matches!(err, VendraError::Validation { ref field, .. } if field == "status"));
    // Rejected before any remote call.
    assert!(remote.rows("orders").is_empty());
}

#[tokio::test]
async fn status_update_writes_remote_and_notifies() {
    let remote = Arc::new(MockRemote::new());
    remote.seed("orders", vec![order("o1", "u1", "pending")]);
    let engine = seeded_engine(&remote).await;

    let report = engine.update_order_status("o1", "shipped").await.unwrap();
    assert_eq!(report.id.as_deref(), Some("o1"));

    let snap = engine.snapshot().await;
    assert_eq!(snap.order("o1").unwrap().status, OrderStatus::Shipped);
    assert!(!snap.saving);
    drop(snap);

    assert_eq!(remote.rows("orders")[0]["status"], "shipped");
    let notes = remote.rows("notifications");
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0]["title"], "Order Shipped");
    assert_eq!(notes[0]["user_id"], "u1");
}

#[tokio::test]
async fn status_update_rolls_back_on_remote_failure() {
    let remote = Arc::new(MockRemote::new());
    remote.seed("orders", vec![order("o1", "u1", "pending")]);
    let engine = seeded_engine(&remote).await;
    remote.fail(Op::Update, "orders", "row-level security violation", 1);

    let err = engine.update_order_status("o1", "delivered").await.unwrap_err();
    assert!(matches!(err, VendraError::Remote { .. }));

    let snap = engine.snapshot().await;
    assert_eq!(snap.order("o1").unwrap().status, OrderStatus::Pending);
    assert!(!snap.saving);
    assert!(remote.rows("notifications").is_empty());
}

#[tokio::test]
async fn status_update_survives_notification_insert_failure() {
    let remote = Arc::new(MockRemote::new());
    remote.seed("orders", vec![order("o1", "u1", "pending")]);
    let engine = seeded_engine(&remote).await;
    remote.fail(Op::Insert, "notifications", "permission denied", 1);

    engine.update_order_status("o1", "shipped").await.unwrap();

    let snap = engine.snapshot().await;
    assert_eq!(snap.order("o1").unwrap().status, OrderStatus::Shipped);
    assert!(remote.rows("notifications").is_empty());
}

#[tokio::test]
async fn delete_order_removes_items_first() {
    let remote = Arc::new(MockRemote::new());
    remote.seed("orders", vec![order("o1", "u1", "pending")]);
    remote.seed(
        "order_items",
        vec![json!({
            "id": "i1",
            "order_id": "o1",
            "product_id": "p1",
            "quantity": 2,
            "unit_price": 10.0,
        })],
    );
    let engine = seeded_engine(&remote).await;

    engine.delete_order("o1").await.unwrap();

    assert!(remote.rows("order_items").is_empty());
    assert!(remote.rows("orders").is_empty());
    let snap = engine.snapshot().await;
    assert!(snap.orders.is_empty());
    assert!(snap.order_items.is_empty());
    assert!(!snap.deleting);
}

#[tokio::test]
async fn wishlist_add_is_idempotent() {
    let remote = Arc::new(MockRemote::new());
    remote.seed(
        "wishlists",
        vec![json!({ "id": "w1", "user_id": "u1", "product_id": "p1" })],
    );
    let engine = seeded_engine(&remote).await;

    let report = engine.add_to_wishlist("u1", "p1").await.unwrap();
    assert_eq!(report.id.as_deref(), Some("w1"));
    assert_eq!(report.info.as_deref(), Some("already in wishlist"));
    assert_eq!(remote.rows("wishlists").len(), 1);

    let report = engine.add_to_wishlist("u1", "p2").await.unwrap();
    assert!(report.info.is_none());
    assert_eq!(remote.rows("wishlists").len(), 2);
    assert_eq!(engine.snapshot().await.wishlists.len(), 2);
}

#[tokio::test]
async fn wishlist_remove_drops_local_and_remote_rows() {
    let remote = Arc::new(MockRemote::new());
    remote.seed(
        "wishlists",
        vec![json!({ "id": "w1", "user_id": "u1", "product_id": "p1" })],
    );
    let engine = seeded_engine(&remote).await;

    let report = engine.remove_from_wishlist("u1", "p1").await.unwrap();
    assert_eq!(report.id.as_deref(), Some("w1"));
    assert!(remote.rows("wishlists").is_empty());
    assert!(engine.snapshot().await.wishlists.is_empty());
}

#[tokio::test]
async fn cart_add_accumulates_quantity_on_one_row() {
    let remote = Arc::new(MockRemote::new());
    remote.seed(
        "cart_items",
        vec![json!({ "id": "c1", "user_id": "u1", "product_id": "p1", "quantity": 2 })],
    );
    let engine = seeded_engine(&remote).await;

    let report = engine.add_to_cart("u1", "p1", 3).await.unwrap();
    assert_eq!(report.id.as_deref(), Some("c1"));

    let rows = remote.rows("cart_items");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["quantity"], 5);

    let snap = engine.snapshot().await;
    assert_eq!(snap.cart_items.len(), 1);
    assert_eq!(snap.cart_items[0].quantity, 5);
}

#[tokio::test]
async fn cart_add_rejects_zero_quantity() {
    let remote = Arc::new(MockRemote::new());
    let engine = engine_over(Arc::clone(&remote));
    engine.set_session(Some(customer_session()));

    let err = engine.add_to_cart("u1", "p1", 0).await.unwrap_err();
    assert!(matches!(err, VendraError::Validation { ref field, .. } if field == "quantity"));
}

#[tokio::test]
async fn cart_add_creates_row_for_new_pair() {
    let remote = Arc::new(MockRemote::new());
    let engine = seeded_engine(&remote).await;

    let report = engine.add_to_cart("u1", "p9", 1).await.unwrap();
    assert!(report.id.is_some());
    assert_eq!(remote.rows("cart_items").len(), 1);
    assert_eq!(engine.snapshot().await.cart_items.len(), 1);
}

#[tokio::test]
async fn mark_read_writes_through_to_shadow() {
    let note_id = uuid::Uuid::from_u128(11).to_string();
    let remote = Arc::new(MockRemote::new());
    remote.seed(
        "notifications",
        vec![json!({
            "id": note_id,
            "user_id": "u1",
            "title": "t",
            "message": "m",
            "read": false,
            "created_at": "2026-08-01T00:00:00Z",
        })],
    );

    let store = Arc::new(MemoryStore::new());
    let shadow = ReadShadow::with_default_cap(Arc::clone(&store) as Arc<dyn LocalStore>);
    let engine = SyncEngine::new(Arc::clone(&remote) as Arc<dyn RemoteStore>, None, shadow, SyncConfig::default());
    engine.set_session(Some(customer_session()));
    engine.fetch_all().await.unwrap();

    engine.mark_notification_read(&note_id).await.unwrap();

    assert_eq!(remote.rows("notifications")[0]["read"], true);
    assert!(engine.snapshot().await.notification(&note_id).unwrap().read);
    // The shadow persisted the id, so a later stale refetch stays read.
    let verify = ReadShadow::with_default_cap(store as Arc<dyn LocalStore>);
    assert!(verify.ids().contains(&note_id));
}

#[tokio::test]
async fn mark_all_covers_only_that_user() {
    let a = uuid::Uuid::from_u128(1).to_string();
    let b = uuid::Uuid::from_u128(2).to_string();
    let other = uuid::Uuid::from_u128(3).to_string();
    let note = |id: &str, user: &str| {
        json!({
            "id": id,
            "user_id": user,
            "title": "t",
            "message": "m",
            "read": false,
            "created_at": "2026-08-01T00:00:00Z",
        })
    };
    let remote = Arc::new(MockRemote::new());
    remote.seed(
        "notifications",
        vec![note(&a, "u1"), note(&b, "u1"), note(&other, "u2")],
    );
    let engine = seeded_engine(&remote).await;

    let report = engine.mark_all_notifications_read("u1").await.unwrap();
    assert_eq!(report.info.as_deref(), Some("marked 2 notifications read"));

    let snap = engine.snapshot().await;
    assert!(snap.notification(&a).unwrap().read);
    assert!(snap.notification(&b).unwrap().read);
    assert!(!snap.notification(&other).unwrap().read);
}

#[tokio::test]
async fn delete_notification_removes_row() {
    let id = uuid::Uuid::from_u128(5).to_string();
    let remote = Arc::new(MockRemote::new());
    remote.seed(
        "notifications",
        vec![json!({
            "id": id,
            "user_id": "u1",
            "title": "t",
            "message": "m",
            "read": false,
            "created_at": "2026-08-01T00:00:00Z",
        })],
    );
    let engine = seeded_engine(&remote).await;

    engine.delete_notification(&id).await.unwrap();
    assert!(remote.rows("notifications").is_empty());
    assert!(engine.snapshot().await.notifications.is_empty());
}

#[tokio::test]
async fn mutations_require_a_session() {
    let remote = Arc::new(MockRemote::new());
    let engine = engine_over(remote);

    let err = engine.add_to_cart("u1", "p1", 1).await.unwrap_err();
    assert!(matches!(err, VendraError::NotAuthenticated));
}

/// Remote store whose updates never resolve, for timeout coverage.
struct HangingRemote;

#[async_trait]
impl RemoteStore for HangingRemote {
    async fn select(&self, _table: &str, _query: SelectQuery) -> Result<Vec<Value>, VendraError> {
        Ok(Vec::new())
    }

    async fn insert(&self, _table: &str, row: Value) -> Result<Value, VendraError> {
        Ok(row)
    }

    async fn update(
        &self,
        _table: &str,
        _filter: Filter,
        _patch: Value,
    ) -> Result<Vec<Value>, VendraError> {
        std::future::pending().await
    }

    async fn delete(&self, _table: &str, _filter: Filter) -> Result<(), VendraError> {
        Ok(())
    }

    async fn rpc(&self, _function: &str, _args: Value) -> Result<Value, VendraError> {
        Ok(Value::Null)
    }
}

#[tokio::test(start_paused = true)]
async fn stalled_remote_write_times_out() {
    let shadow = ReadShadow::with_default_cap(Arc::new(MemoryStore::new()));
    let engine = SyncEngine::new(Arc::new(HangingRemote), None, shadow, SyncConfig::default());
    engine.set_session(Some(customer_session()));

    let err = engine
        .mark_notification_read("00000000-0000-0000-0000-000000000001")
        .await
        .unwrap_err();
    assert!(matches!(err, VendraError::Timeout { .. }));
    // The operation flag is cleared even on the timeout path.
    assert!(!engine.snapshot().await.saving);
}
