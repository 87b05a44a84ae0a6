// SPDX-FileCopyrightText: 2026 Vendra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pure presentation derivations over synchronized state.
//!
//! Everything in this crate is a stateless transform: given the same input
//! rows and the same wall-clock instant it produces the same output. Nothing
//! here persists state or talks to the remote platform.

pub mod format;
pub mod offers;
pub mod stats;
pub mod timeline;

pub use format::{status_badge, time_ago, Badge};
pub use offers::{classify_expiry, classify_offer, OfferState};
pub use stats::{dashboard_stats, DashboardStats};
pub use timeline::{order_timeline, Milestone};
