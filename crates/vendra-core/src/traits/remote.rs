// SPDX-FileCopyrightText: 2026 Vendra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Remote platform trait: row CRUD over named collections plus remote
//! procedure calls.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::VendraError;
use crate::types::{Filter, SelectQuery};

/// Typed client over the hosted relational platform.
///
/// The platform owns the data, the row-level-security policy engine, and the
/// remote procedures; this trait is the whole surface the engine consumes.
/// Two implementations are typically in play: a standard client subject to
/// row-level security and an elevated service-role client.
///
/// Errors carry the remote message verbatim so the engine's fault
/// classification can match known signatures.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Select rows from a collection, honoring the query's filter, ordering,
    /// and limit.
    async fn select(&self, table: &str, query: SelectQuery) -> Result<Vec<Value>, VendraError>;

    /// Insert a row, returning the stored row (with server-assigned columns).
    async fn insert(&self, table: &str, row: Value) -> Result<Value, VendraError>;

    /// Update rows matching the filter, returning the updated rows.
    async fn update(
        &self,
        table: &str,
        filter: Filter,
        patch: Value,
    ) -> Result<Vec<Value>, VendraError>;

    /// Delete rows matching the filter.
    async fn delete(&self, table: &str, filter: Filter) -> Result<(), VendraError>;

    /// Invoke a named remote procedure with a JSON argument object.
    async fn rpc(&self, function: &str, args: Value) -> Result<Value, VendraError>;
}
