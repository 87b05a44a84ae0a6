// SPDX-FileCopyrightText: 2026 Vendra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Offer expiry classification.

use chrono::{DateTime, NaiveDate, Utc};

use vendra_core::model::Offer;

/// Three-way offer classification. There is no fourth state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfferState {
    /// `valid_until` parses to a date in the future.
    Active,
    /// `valid_until` parses to a date in the past.
    Expired,
    /// `valid_until` is missing or unparseable.
    Invalid,
}

impl std::fmt::Display for OfferState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OfferState::Active => write!(f, "Active"),
            OfferState::Expired => write!(f, "Expired"),
            OfferState::Invalid => write!(f, "Invalid"),
        }
    }
}

/// Classify a raw expiry string against `now`.
///
/// Accepts RFC 3339 timestamps or bare `YYYY-MM-DD` dates; a bare date is
/// valid through the end of that day.
pub fn classify_expiry(valid_until: Option<&str>, now: DateTime<Utc>) -> OfferState {
    let Some(raw) = valid_until else {
        return OfferState::Invalid;
    };
    let Some(expiry) = parse_expiry(raw) else {
        return OfferState::Invalid;
    };
    if expiry > now {
        OfferState::Active
    } else {
        OfferState::Expired
    }
}

/// Classify an offer row.
pub fn classify_offer(offer: &Offer, now: DateTime<Utc>) -> OfferState {
    classify_expiry(offer.valid_until.as_deref(), now)
}

fn parse_expiry(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    Some(date.and_hms_opt(23, 59, 59)?.and_utc())
}
