// SPDX-FileCopyrightText: 2026 Vendra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Order status timeline derivation.
//!
//! Five fixed milestones whose completion is a set-membership check of the
//! order's current status against each milestone's trailing status set.
//! Intermediate timestamps are interpolated proportionally between order
//! creation and estimated delivery when not independently known -- a
//! presentation approximation, not authoritative data.

use chrono::{DateTime, Duration, Utc};

use vendra_core::model::{Order, OrderStatus};

/// One entry in the order tracking timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Milestone {
    pub label: &'static str,
    pub completed: bool,
    /// Known or interpolated instant; `None` when no estimate exists.
    pub timestamp: Option<DateTime<Utc>>,
}

/// Milestone labels and their trailing status sets, in display order.
///
/// A cancelled order completes only "Order Placed"; no trailing set contains
/// `Cancelled` beyond the first.
const MILESTONES: [(&str, &[OrderStatus]); 5] = [
    (
        "Order Placed",
        &[
            OrderStatus::Pending,
            OrderStatus::Processing,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ],
    ),
    (
        "Order Confirmed",
        &[
            OrderStatus::Processing,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
        ],
    ),
    (
        "Preparing Your Order",
        &[
            OrderStatus::Processing,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
        ],
    ),
    (
        "Out for Delivery",
        &[OrderStatus::Shipped, OrderStatus::Delivered],
    ),
    ("Delivered", &[OrderStatus::Delivered]),
];

/// Build the five-milestone tracking timeline for an order.
pub fn order_timeline(order: &Order) -> Vec<Milestone> {
    let span = order
        .estimated_delivery
        .map(|eta| eta.signed_duration_since(order.created_at));

    MILESTONES
        .iter()
        .enumerate()
        .map(|(index, (label, trailing))| Milestone {
            label,
            completed: trailing.contains(&order.status),
            timestamp: interpolate(order.created_at, span, index),
        })
        .collect()
}

/// Proportional timestamp for milestone `index` of 5: creation time for the
/// first, estimated delivery for the last, quarters in between.
fn interpolate(
    created_at: DateTime<Utc>,
    span: Option<Duration>,
    index: usize,
) -> Option<DateTime<Utc>> {
    if index == 0 {
        return Some(created_at);
    }
    let span = span?;
    if span < Duration::zero() {
        return None;
    }
    let fraction_ms = span.num_milliseconds() * index as i64 / (MILESTONES.len() - 1) as i64;
    Some(created_at + Duration::milliseconds(fraction_ms))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn order(status: OrderStatus, eta: Option<DateTime<Utc>>) -> Order {
        Order {
            id: "o1".into(),
            user_id: "u1".into(),
            total_amount: 50.0,
            status,
            applied_coupon_id: None,
            delivery_fee: 5.0,
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            estimated_delivery: eta,
        }
    }

    #[test]
    fn pending_completes_only_placed() {
        let timeline = order_timeline(&order(OrderStatus::Pending, None));
        let completed: Vec<bool> = timeline.iter().map(|m| m.completed).collect();
        assert_eq!(completed, vec![true, false, false, false, false]);
    }

    #[test]
    fn processing_completes_through_preparing() {
        let timeline = order_timeline(&order(OrderStatus::Processing, None));
        let completed: Vec<bool> = timeline.iter().map(|m| m.completed).collect();
        assert_eq!(completed, vec![true, true, true, false, false]);
    }

    #[test]
    fn shipped_completes_through_out_for_delivery() {
        let timeline = order_timeline(&order(OrderStatus::Shipped, None));
        let completed: Vec<bool> = timeline.iter().map(|m| m.completed).collect();
        assert_eq!(completed, vec![true, true, true, true, false]);
    }

    #[test]
    fn delivered_completes_everything() {
        let timeline = order_timeline(&order(OrderStatus::Delivered, None));
        assert!(timeline.iter().all(|m| m.completed));
    }

    #[test]
    fn cancelled_completes_only_placed() {
        let timeline = order_timeline(&order(OrderStatus::Cancelled, None));
        let completed: Vec<bool> = timeline.iter().map(|m| m.completed).collect();
        assert_eq!(completed, vec![true, false, false, false, false]);
    }

    #[test]
    fn timestamps_interpolate_between_creation_and_eta() {
        let eta = Utc.with_ymd_and_hms(2026, 1, 5, 0, 0, 0).unwrap();
        let timeline = order_timeline(&order(OrderStatus::Shipped, Some(eta)));

        let created = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(timeline[0].timestamp, Some(created));
        assert_eq!(
            timeline[1].timestamp,
            Some(Utc.with_ymd_and_hms(2026, 1, 2, 0, 0, 0).unwrap())
        );
        assert_eq!(
            timeline[2].timestamp,
            Some(Utc.with_ymd_and_hms(2026, 1, 3, 0, 0, 0).unwrap())
        );
        assert_eq!(
            timeline[3].timestamp,
            Some(Utc.with_ymd_and_hms(2026, 1, 4, 0, 0, 0).unwrap())
        );
        assert_eq!(timeline[4].timestamp, Some(eta));
    }

    #[test]
    fn missing_eta_leaves_intermediate_timestamps_empty() {
        let timeline = order_timeline(&order(OrderStatus::Pending, None));
        assert!(timeline[0].timestamp.is_some(), "placed uses creation time");
        assert!(timeline[1..].iter().all(|m| m.timestamp.is_none()));
    }

    #[test]
    fn eta_before_creation_yields_no_interpolation() {
        let eta = Utc.with_ymd_and_hms(2025, 12, 1, 0, 0, 0).unwrap();
        let timeline = order_timeline(&order(OrderStatus::Pending, Some(eta)));
        assert!(timeline[1..].iter().all(|m| m.timestamp.is_none()));
    }
}
