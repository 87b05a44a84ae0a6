// SPDX-FileCopyrightText: 2026 Vendra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Badge mapping and relative-time phrasing.

use chrono::{DateTime, Utc};

use vendra_core::model::OrderStatus;

/// A status badge view model: display label plus a color token understood by
/// the UI theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Badge {
    pub label: &'static str,
    pub color: &'static str,
}

/// Map an order status to its badge.
pub fn status_badge(status: OrderStatus) -> Badge {
    match status {
        OrderStatus::Pending => Badge {
            label: "Pending",
            color: "amber",
        },
        OrderStatus::Processing => Badge {
            label: "Processing",
            color: "blue",
        },
        OrderStatus::Shipped => Badge {
            label: "Shipped",
            color: "indigo",
        },
        OrderStatus::Delivered => Badge {
            label: "Delivered",
            color: "green",
        },
        OrderStatus::Cancelled => Badge {
            label: "Cancelled",
            color: "red",
        },
    }
}

/// Coarse relative-time phrasing for timestamps.
///
/// Future timestamps and sub-minute ages both read "just now"; beyond thirty
/// days the phrasing falls back to a plain date.
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(then);
    let minutes = elapsed.num_minutes();
    if minutes < 1 {
        return "just now".to_string();
    }
    if minutes < 60 {
        return plural(minutes, "minute");
    }
    let hours = elapsed.num_hours();
    if hours < 24 {
        return plural(hours, "hour");
    }
    let days = elapsed.num_days();
    if days <= 30 {
        return plural(days, "day");
    }
    then.format("%b %-d, %Y").to_string()
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{n} {unit}s ago")
    }
}
