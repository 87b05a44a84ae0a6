// SPDX-FileCopyrightText: 2026 Vendra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The in-memory snapshot: a cached, eventually-consistent copy of the remote
//! collections, plus per-collection fetch status and the operation flags the
//! UI layer watches.

use std::collections::HashMap;

use strum::{Display, EnumIter};

use vendra_core::model::{
    Address, CartItem, Category, Notification, Offer, Order, OrderItem, PaymentMethod, Product,
    Profile, StoreSettings, WishlistItem,
};

/// The named collections the engine synchronizes, in fetch order.
///
/// Variant order is the fetch sequence: catalog first, then transactional
/// collections, then per-user collections, settings last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Collection {
    Products,
    Categories,
    Orders,
    Offers,
    Profiles,
    Wishlists,
    OrderItems,
    Addresses,
    PaymentMethods,
    Notifications,
    CartItems,
    Settings,
}

impl Collection {
    /// The remote table name backing this collection.
    pub fn table_name(self) -> &'static str {
        match self {
            Collection::Products => "products",
            Collection::Categories => "categories",
            Collection::Orders => "orders",
            Collection::Offers => "offers",
            Collection::Profiles => "profiles",
            Collection::Wishlists => "wishlists",
            Collection::OrderItems => "order_items",
            Collection::Addresses => "addresses",
            Collection::PaymentMethods => "payment_methods",
            Collection::Notifications => "notifications",
            Collection::CartItems => "cart_items",
            Collection::Settings => "settings",
        }
    }
}

/// Fetch status of one collection.
///
/// Replaces the original single shared error string, which could not say
/// which collection failed; [`Snapshot::last_error`] remains as a summary.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CollectionStatus {
    /// Never fetched.
    #[default]
    Pending,
    /// A fetch pass is in flight for this collection.
    Loading,
    /// Last fetch succeeded; rows are current as of that pass.
    Ready,
    /// Last fetch failed, including its one remediation retry.
    Failed(String),
}

/// The full cached state. Mutated only through [`SyncEngine`] methods holding
/// the write lock; readers get a consistent view per lock acquisition.
///
/// [`SyncEngine`]: crate::engine::SyncEngine
#[derive(Default)]
pub struct Snapshot {
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
    pub orders: Vec<Order>,
    pub offers: Vec<Offer>,
    pub profiles: Vec<Profile>,
    pub wishlists: Vec<WishlistItem>,
    pub order_items: Vec<OrderItem>,
    pub addresses: Vec<Address>,
    pub payment_methods: Vec<PaymentMethod>,
    pub notifications: Vec<Notification>,
    pub cart_items: Vec<CartItem>,
    pub settings: StoreSettings,

    /// A full fetch pass is in flight. Set before the pass, cleared
    /// unconditionally after, even when collections failed.
    pub loading: bool,
    /// A mutation is writing. The UI disables its save controls while set.
    pub saving: bool,
    /// A deletion is in flight.
    pub deleting: bool,
    /// Most recent collection fetch error, as a convenience summary.
    pub last_error: Option<String>,

    status: HashMap<Collection, CollectionStatus>,
}

impl Snapshot {
    /// Fetch status of a collection. Never-fetched collections are Pending.
    pub fn status(&self, collection: Collection) -> &CollectionStatus {
        self.status
            .get(&collection)
            .unwrap_or(&CollectionStatus::Pending)
    }

    pub fn set_status(&mut self, collection: Collection, status: CollectionStatus) {
        self.status.insert(collection, status);
    }

    /// Look up an order by ID.
    pub fn order(&self, order_id: &str) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == order_id)
    }

    /// Look up a notification by ID.
    pub fn notification(&self, id: &str) -> Option<&Notification> {
        self.notifications.iter().find(|n| n.id == id)
    }
}
