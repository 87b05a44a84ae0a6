// SPDX-FileCopyrightText: 2026 Vendra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared across the Vendra workspace: sessions, realtime change
//! events, mutation reports, and the select/filter builders understood by
//! [`RemoteStore`](crate::traits::RemoteStore) implementations.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{Display, EnumString};

use crate::error::VendraError;

/// Role carried by a session's user record. Admin sessions get the
/// elevated-privilege remote client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Customer,
}

/// The user record attached to a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub email: String,
    pub role: Role,
}

/// An authenticated session, supplied by an authentication subsystem outside
/// this engine's scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
    pub user: SessionUser,
}

impl Session {
    /// Whether the session has expired relative to `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Which remote client variant an operation should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Privilege {
    /// Service-role client that bypasses row-level security.
    Elevated,
    /// Standard client subject to row-level security.
    Standard,
}

/// Realtime change event classes, matching the platform's wire form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
}

/// A single realtime change pushed by the platform.
///
/// `new` is populated for inserts and updates; `old` for updates and deletes
/// (deletes may carry only the key columns of the removed row).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeEvent<T> {
    #[serde(rename = "eventType")]
    pub kind: ChangeKind,
    #[serde(default = "Option::default")]
    pub new: Option<T>,
    #[serde(default = "Option::default")]
    pub old: Option<T>,
}

impl ChangeEvent<Value> {
    /// Decode the raw JSON payloads into a typed event.
    ///
    /// The `old` payload of a delete may be a partial row; decode failures
    /// there are tolerated by keeping whatever `id` field is present.
    pub fn decode<T: DeserializeOwned>(self) -> Result<ChangeEvent<T>, VendraError> {
        let decode_one = |v: Value| -> Result<T, VendraError> {
            serde_json::from_value(v)
                .map_err(|e| VendraError::Internal(format!("malformed change payload: {e}")))
        };
        Ok(ChangeEvent {
            kind: self.kind,
            new: self.new.map(decode_one).transpose()?,
            old: self.old.map(decode_one).transpose()?,
        })
    }

    /// The `id` field of whichever payload carries one, for delete handling
    /// when the old row is only partially present.
    pub fn row_id(&self) -> Option<&str> {
        if let Some(ref v) = self.new
            && let Some(id) = v.get("id").and_then(Value::as_str)
        {
            return Some(id);
        }
        self.old
            .as_ref()
            .and_then(|v| v.get("id").and_then(Value::as_str))
    }
}

/// Outcome details of a successful mutation.
///
/// The engine's mutation operations return `Result<MutationReport, VendraError>`;
/// `info` carries non-fatal notes such as "already in wishlist".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MutationReport {
    /// Identifier of the affected row, when one is meaningful.
    pub id: Option<String>,
    /// Non-fatal, human-readable note about the outcome.
    pub info: Option<String>,
}

impl MutationReport {
    /// Report touching the row with the given id.
    pub fn of(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            info: None,
        }
    }

    /// Report touching the row with the given id, with a note.
    pub fn noted(id: impl Into<String>, info: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            info: Some(info.into()),
        }
    }
}

/// Sort direction for select queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDir {
    Asc,
    Desc,
}

/// Equality filter over named columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter(Vec<(String, Value)>);

impl Filter {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Add an equality condition. Conditions are ANDed.
    pub fn eq(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.push((column.into(), value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn conditions(&self) -> &[(String, Value)] {
        &self.0
    }

    /// Whether a JSON row satisfies every condition.
    pub fn matches(&self, row: &Value) -> bool {
        self.0
            .iter()
            .all(|(column, value)| row.get(column) == Some(value))
    }
}

/// A select over a named collection: optional equality filter, ordering, limit.
#[derive(Debug, Clone, Default)]
pub struct SelectQuery {
    pub filter: Filter,
    pub order_by: Option<(String, SortDir)>,
    pub limit: Option<u32>,
}

impl SelectQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn filtered(filter: Filter) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    pub fn order_by(mut self, column: impl Into<String>, dir: SortDir) -> Self {
        self.order_by = Some((column.into(), dir));
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}
