// SPDX-FileCopyrightText: 2026 Vendra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mutation operations on the engine.
//!
//! Every operation requires a session, runs under a hard timeout so callers
//! can always re-enable their controls, and returns a
//! [`MutationReport`](vendra_core::MutationReport) on success. Unless noted,
//! a failed operation leaves the snapshot untouched.

use std::str::FromStr;
use std::time::Duration;

use chrono::Utc;
use serde_json::json;
use tracing::{debug, warn};

use vendra_core::model::{CartItem, OrderStatus, WishlistItem};
use vendra_core::types::Filter;
use vendra_core::{MutationReport, VendraError};

use crate::engine::SyncEngine;
use crate::optimistic;

impl SyncEngine {
    /// Enforce the configured per-operation hard timeout.
    async fn with_timeout<T>(
        &self,
        op: impl Future<Output = Result<T, VendraError>>,
    ) -> Result<T, VendraError> {
        let duration = Duration::from_secs(self.config.op_timeout_secs);
        match tokio::time::timeout(duration, op).await {
            Ok(result) => result,
            Err(_) => Err(VendraError::Timeout { duration }),
        }
    }

    async fn set_saving(&self, saving: bool) {
        self.snapshot.write().await.saving = saving;
    }

    async fn set_deleting(&self, deleting: bool) {
        self.snapshot.write().await.deleting = deleting;
    }

    /// Change an order's status, optimistically.
    ///
    /// The status string is validated against the five known statuses before
    /// anything else runs. The local row is updated first and rolled back if
    /// the remote write fails. On success a notification row for the order's
    /// user is inserted best-effort; its failure is logged and never fails
    /// the operation.
    pub async fn update_order_status(
        &self,
        order_id: &str,
        status: &str,
    ) -> Result<MutationReport, VendraError> {
        let status = OrderStatus::from_str(status).map_err(|_| {
            VendraError::validation("status", format!("unknown order status {status:?}"))
        })?;
        let session = self.require_session()?;
        let client = self.client_for(session.user.role);

        self.set_saving(true).await;
        let result = self
            .with_timeout(async {
                let order_user = self
                    .snapshot
                    .read()
                    .await
                    .order(order_id)
                    .map(|o| o.user_id.clone());

                optimistic::commit_or_revert(
                    &self.snapshot,
                    |snap| {
                        snap.orders.iter_mut().find(|o| o.id == order_id).map(|o| {
                            let prior = o.status;
                            o.status = status;
                            prior
                        })
                    },
                    |snap, prior| {
                        if let Some(order) = snap.orders.iter_mut().find(|o| o.id == order_id) {
                            order.status = prior;
                        }
                    },
                    async {
                        client
                            .update(
                                "orders",
                                Filter::new().eq("id", order_id),
                                json!({ "status": status.to_string() }),
                            )
                            .await?;
                        Ok(())
                    },
                )
                .await?;

                match order_user {
                    Some(user_id) => {
                        let note = json!({
                            "user_id": user_id,
                            "title": status.notification_title(),
                            "message": format!("Your order is now {status}."),
                            "kind": "order",
                            "read": false,
                            "created_at": Utc::now().to_rfc3339(),
                        });
                        if let Err(e) = client.insert("notifications", note).await {
                            warn!(order_id, error = %e, "status notification insert failed");
                        }
                    }
                    None => debug!(order_id, "order not in snapshot, skipping notification"),
                }

                Ok(MutationReport::of(order_id))
            })
            .await;
        self.set_saving(false).await;
        result
    }

    /// Delete an order and its items, items first so the order row never
    /// outlives a successful pass with orphans left behind.
    pub async fn delete_order(&self, order_id: &str) -> Result<MutationReport, VendraError> {
        let session = self.require_session()?;
        let client = self.client_for(session.user.role);

        self.set_deleting(true).await;
        let result = self
            .with_timeout(async {
                client
                    .delete("order_items", Filter::new().eq("order_id", order_id))
                    .await?;
                client
                    .delete("orders", Filter::new().eq("id", order_id))
                    .await?;

                let mut snap = self.snapshot.write().await;
                snap.order_items.retain(|item| item.order_id != order_id);
                snap.orders.retain(|order| order.id != order_id);
                Ok(MutationReport::of(order_id))
            })
            .await;
        self.set_deleting(false).await;
        result
    }

    /// Add a product to a user's wishlist. Idempotent: an existing pair
    /// reports success with the existing row's ID.
    pub async fn add_to_wishlist(
        &self,
        user_id: &str,
        product_id: &str,
    ) -> Result<MutationReport, VendraError> {
        let session = self.require_session()?;
        let client = self.client_for(session.user.role);

        self.set_saving(true).await;
        let result = self
            .with_timeout(async {
                let existing = self
                    .snapshot
                    .read()
                    .await
                    .wishlists
                    .iter()
                    .find(|w| w.user_id == user_id && w.product_id == product_id)
                    .map(|w| w.id.clone());
                if let Some(id) = existing {
                    return Ok(MutationReport::noted(id, "already in wishlist"));
                }

                let stored = client
                    .insert(
                        "wishlists",
                        json!({ "user_id": user_id, "product_id": product_id }),
                    )
                    .await?;
                let item: WishlistItem = serde_json::from_value(stored)
                    .map_err(|e| VendraError::Internal(format!("malformed wishlist row: {e}")))?;
                let id = item.id.clone();
                self.snapshot.write().await.wishlists.push(item);
                Ok(MutationReport::of(id))
            })
            .await;
        self.set_saving(false).await;
        result
    }

    pub async fn remove_from_wishlist(
        &self,
        user_id: &str,
        product_id: &str,
    ) -> Result<MutationReport, VendraError> {
        let session = self.require_session()?;
        let client = self.client_for(session.user.role);

        self.set_saving(true).await;
        let result = self
            .with_timeout(async {
                client
                    .delete(
                        "wishlists",
                        Filter::new().eq("user_id", user_id).eq("product_id", product_id),
                    )
                    .await?;

                let mut snap = self.snapshot.write().await;
                let removed = snap
                    .wishlists
                    .iter()
                    .find(|w| w.user_id == user_id && w.product_id == product_id)
                    .map(|w| w.id.clone());
                snap.wishlists
                    .retain(|w| !(w.user_id == user_id && w.product_id == product_id));
                Ok(MutationReport {
                    id: removed,
                    info: None,
                })
            })
            .await;
        self.set_saving(false).await;
        result
    }

    /// Add a product to a user's cart. Idempotent on (user, product):
    /// a duplicate add accumulates quantity on the one existing row.
    pub async fn add_to_cart(
        &self,
        user_id: &str,
        product_id: &str,
        quantity: u32,
    ) -> Result<MutationReport, VendraError> {
        if quantity == 0 {
            return Err(VendraError::validation("quantity", "must be at least 1"));
        }
        let session = self.require_session()?;
        let client = self.client_for(session.user.role);

        self.set_saving(true).await;
        let result = self
            .with_timeout(async {
                let existing = self
                    .snapshot
                    .read()
                    .await
                    .cart_items
                    .iter()
                    .find(|c| c.user_id == user_id && c.product_id == product_id)
                    .map(|c| (c.id.clone(), c.quantity));

                if let Some((id, current)) = existing {
                    let total = current + quantity;
                    client
                        .update(
                            "cart_items",
                            Filter::new().eq("id", id.as_str()),
                            json!({ "quantity": total }),
                        )
                        .await?;
                    let mut snap = self.snapshot.write().await;
                    if let Some(item) = snap.cart_items.iter_mut().find(|c| c.id == id) {
                        item.quantity = total;
                    }
                    return Ok(MutationReport::of(id));
                }

                let stored = client
                    .insert(
                        "cart_items",
                        json!({
                            "user_id": user_id,
                            "product_id": product_id,
                            "quantity": quantity,
                        }),
                    )
                    .await?;
                let item: CartItem = serde_json::from_value(stored)
                    .map_err(|e| VendraError::Internal(format!("malformed cart row: {e}")))?;
                let id = item.id.clone();
                self.snapshot.write().await.cart_items.push(item);
                Ok(MutationReport::of(id))
            })
            .await;
        self.set_saving(false).await;
        result
    }

    /// Mark one notification read: remote write, local row, and shadow
    /// write-through, so the flag survives stale refetches.
    pub async fn mark_notification_read(&self, id: &str) -> Result<MutationReport, VendraError> {
        let session = self.require_session()?;
        let client = self.client_for(session.user.role);

        self.set_saving(true).await;
        let result = self
            .with_timeout(async {
                client
                    .update(
                        "notifications",
                        Filter::new().eq("id", id),
                        json!({ "read": true }),
                    )
                    .await?;

                {
                    let mut snap = self.snapshot.write().await;
                    if let Some(n) = snap.notifications.iter_mut().find(|n| n.id == id) {
                        n.read = true;
                    }
                }
                self.shadow.mark_read([id])?;
                Ok(MutationReport::of(id))
            })
            .await;
        self.set_saving(false).await;
        result
    }

    /// Mark every notification of a user read, in one remote write.
    pub async fn mark_all_notifications_read(
        &self,
        user_id: &str,
    ) -> Result<MutationReport, VendraError> {
        let session = self.require_session()?;
        let client = self.client_for(session.user.role);

        self.set_saving(true).await;
        let result = self
            .with_timeout(async {
                client
                    .update(
                        "notifications",
                        Filter::new().eq("user_id", user_id),
                        json!({ "read": true }),
                    )
                    .await?;

                let ids: Vec<String> = {
                    let mut snap = self.snapshot.write().await;
                    snap.notifications
                        .iter_mut()
                        .filter(|n| n.user_id == user_id)
                        .map(|n| {
                            n.read = true;
                            n.id.clone()
                        })
                        .collect()
                };
                let count = ids.len();
                self.shadow.mark_read(ids)?;
                Ok(MutationReport {
                    id: None,
                    info: Some(format!("marked {count} notifications read")),
                })
            })
            .await;
        self.set_saving(false).await;
        result
    }

    /// Delete a notification. Its shadow entry, if any, is left to age out of
    /// the cap; a tracked ID with no matching row is harmless.
    pub async fn delete_notification(&self, id: &str) -> Result<MutationReport, VendraError> {
        let session = self.require_session()?;
        let client = self.client_for(session.user.role);

        self.set_deleting(true).await;
        let result = self
            .with_timeout(async {
                client
                    .delete("notifications", Filter::new().eq("id", id))
                    .await?;
                self.snapshot
                    .write()
                    .await
                    .notifications
                    .retain(|n| n.id != id);
                Ok(MutationReport::of(id))
            })
            .await;
        self.set_deleting(false).await;
        result
    }
}
