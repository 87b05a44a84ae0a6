// SPDX-FileCopyrightText: 2026 Vendra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain entities mirrored from the remote relational store.
//!
//! None of these are owned by the client: the in-memory copies are created on
//! fetch, mutated by optimistic updates or realtime pushes, and discarded on
//! full refresh. Rows travel as JSON and are decoded individually; rows that
//! fail to decode are dropped rather than failing the whole collection (the
//! minimal-shape filter -- e.g. an [`Offer`] without title, code, and discount
//! never reaches the snapshot).

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{Display, EnumString};
use tracing::debug;

use crate::types::Role;

/// Order lifecycle status. Transitions are not validated client-side beyond
/// enum membership.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Title used for the best-effort notification emitted on a status change.
    pub fn notification_title(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Order Pending",
            OrderStatus::Processing => "Order Processing",
            OrderStatus::Shipped => "Order Shipped",
            OrderStatus::Delivered => "Order Delivered",
            OrderStatus::Cancelled => "Order Cancelled",
        }
    }
}

/// A catalog product. `images` may be empty; price non-negativity is a remote
/// invariant, not re-checked here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub in_stock: bool,
    #[serde(default)]
    pub discount: Option<f64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A category in the self-referential category tree. Cycle freedom is not
/// enforced client-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub parent_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub user_id: String,
    pub total_amount: f64,
    pub status: OrderStatus,
    #[serde(default)]
    pub applied_coupon_id: Option<String>,
    #[serde(default)]
    pub delivery_fee: f64,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub estimated_delivery: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: String,
    pub order_id: String,
    pub product_id: String,
    pub quantity: u32,
    pub unit_price: f64,
}

impl OrderItem {
    /// Derived, never stored.
    pub fn subtotal(&self) -> f64 {
        f64::from(self.quantity) * self.unit_price
    }
}

/// A discount offer/coupon. `title`, `code`, and `discount` are required;
/// rows missing them are dropped by [`decode_rows`]. `valid_until` stays a
/// raw string because unparseable dates are a meaningful state ("Invalid")
/// rather than a decode failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    pub id: String,
    pub title: String,
    pub code: String,
    pub discount: f64,
    #[serde(default)]
    pub valid_until: Option<String>,
    #[serde(default)]
    pub usage_limit: Option<u32>,
    #[serde(default)]
    pub used_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    pub role: Role,
    pub updated_at: DateTime<Utc>,
}

/// A user-facing notification. The `read` flag is monotonic: once observed
/// true by this client it must never be observed false again for the same ID.
/// That invariant is enforced by the shadow overlay and the realtime merge,
/// not by this struct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WishlistItem {
    pub id: String,
    pub user_id: String,
    pub product_id: String,
}

/// Cart rows are unique per (user, product); duplicate adds accumulate
/// quantity instead of creating a second row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: String,
    pub user_id: String,
    pub product_id: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub id: String,
    pub user_id: String,
    pub line1: String,
    #[serde(default)]
    pub line2: Option<String>,
    pub city: String,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub is_default: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub id: String,
    pub user_id: String,
    pub label: String,
    #[serde(default)]
    pub is_default: bool,
}

/// Singleton settings blob. The first row returned is canonical; the engine
/// creates one with these defaults when none exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSettings {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default = "default_store_name")]
    pub store_name: String,
    #[serde(default)]
    pub delivery_fee: f64,
    #[serde(default)]
    pub support_email: Option<String>,
    #[serde(default)]
    pub maintenance_mode: bool,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            id: None,
            store_name: default_store_name(),
            delivery_fee: 0.0,
            support_email: None,
            maintenance_mode: false,
        }
    }
}

fn default_store_name() -> String {
    "Vendra Store".to_string()
}

/// Decode a collection of JSON rows, dropping rows that fail the shape check.
///
/// Dropped rows are logged at debug with the decode error; the collection
/// itself never fails on a malformed row.
pub fn decode_rows<T: DeserializeOwned>(table: &str, rows: Vec<Value>) -> Vec<T> {
    let total = rows.len();
    let decoded: Vec<T> = rows
        .into_iter()
        .filter_map(|row| match serde_json::from_value(row) {
            Ok(entity) => Some(entity),
            Err(e) => {
                debug!(table, error = %e, "dropping row failing shape check");
                None
            }
        })
        .collect();
    if decoded.len() < total {
        debug!(table, dropped = total - decoded.len(), kept = decoded.len(), "rows dropped during decode");
    }
    decoded
}
