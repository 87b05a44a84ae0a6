// SPDX-FileCopyrightText: 2026 Vendra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dashboard statistics aggregation.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

use vendra_core::model::{Order, OrderStatus, Product, Profile};

/// Window within which a profile counts as "active" -- a presentation-only
/// derivation from `updated_at`, not an authoritative account status.
const ACTIVE_WINDOW_DAYS: i64 = 30;

/// Aggregated dashboard view model.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardStats {
    pub total_orders: usize,
    /// Revenue over non-cancelled orders, delivery fees included.
    pub total_revenue: f64,
    pub orders_by_status: HashMap<OrderStatus, usize>,
    pub total_users: usize,
    pub active_users: usize,
    pub total_products: usize,
    pub out_of_stock: usize,
}

/// Aggregate the synchronized collections into dashboard stats.
pub fn dashboard_stats(
    orders: &[Order],
    profiles: &[Profile],
    products: &[Product],
    now: DateTime<Utc>,
) -> DashboardStats {
    let mut orders_by_status: HashMap<OrderStatus, usize> = HashMap::new();
    let mut total_revenue = 0.0;
    for order in orders {
        *orders_by_status.entry(order.status).or_default() += 1;
        if order.status != OrderStatus::Cancelled {
            total_revenue += order.total_amount;
        }
    }

    let active_cutoff = now - Duration::days(ACTIVE_WINDOW_DAYS);
    let active_users = profiles
        .iter()
        .filter(|p| p.updated_at > active_cutoff)
        .count();

    DashboardStats {
        total_orders: orders.len(),
        total_revenue,
        orders_by_status,
        total_users: profiles.len(),
        active_users,
        total_products: products.len(),
        out_of_stock: products.iter().filter(|p| !p.in_stock).count(),
    }
}
