// SPDX-FileCopyrightText: 2026 Vendra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scriptable in-memory [`RemoteStore`] fake.
//!
//! Rows live in per-table vectors of JSON values. Failures are scripted per
//! (operation, table) and either expire after a fixed number of attempts or
//! clear when a named RPC is invoked -- the latter models the platform's
//! policy-remediation procedures.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use vendra_core::traits::RemoteStore;
use vendra_core::types::{Filter, SelectQuery, SortDir};
use vendra_core::VendraError;

/// Remote operation classes a failure script can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Select,
    Insert,
    Update,
    Delete,
}

enum FailureUntil {
    /// Fails for this many further attempts.
    Attempts(usize),
    /// Fails until the named RPC is invoked.
    Rpc(String),
}

struct FailureScript {
    message: String,
    until: FailureUntil,
}

/// In-memory remote store with scriptable failures and an RPC call log.
#[derive(Default)]
pub struct MockRemote {
    tables: Mutex<HashMap<String, Vec<Value>>>,
    failures: Mutex<HashMap<(Op, String), FailureScript>>,
    rpc_failures: Mutex<HashMap<String, (String, usize)>>,
    rpc_log: Mutex<Vec<(String, Value)>>,
}

impl MockRemote {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace a table's rows.
    pub fn seed(&self, table: &str, rows: Vec<Value>) {
        self.tables
            .lock()
            .unwrap()
            .insert(table.to_string(), rows);
    }

    /// Current rows of a table.
    pub fn rows(&self, table: &str) -> Vec<Value> {
        self.tables
            .lock()
            .unwrap()
            .get(table)
            .cloned()
            .unwrap_or_default()
    }

    /// Script the next `times` attempts of an operation on a table to fail
    /// with the given message.
    pub fn fail(&self, op: Op, table: &str, message: &str, times: usize) {
        self.failures.lock().unwrap().insert(
            (op, table.to_string()),
            FailureScript {
                message: message.to_string(),
                until: FailureUntil::Attempts(times),
            },
        );
    }

    /// Script selects on a table to fail until the named RPC is invoked.
    pub fn fail_select_until_rpc(&self, table: &str, message: &str, rpc: &str) {
        self.failures.lock().unwrap().insert(
            (Op::Select, table.to_string()),
            FailureScript {
                message: message.to_string(),
                until: FailureUntil::Rpc(rpc.to_string()),
            },
        );
    }

    /// Script the next `times` invocations of an RPC to fail.
    pub fn fail_rpc(&self, function: &str, message: &str, times: usize) {
        self.rpc_failures
            .lock()
            .unwrap()
            .insert(function.to_string(), (message.to_string(), times));
    }

    /// All RPC invocations observed so far.
    pub fn rpc_calls(&self) -> Vec<(String, Value)> {
        self.rpc_log.lock().unwrap().clone()
    }

    /// Consume one scripted failure for (op, table), if armed.
    fn take_failure(&self, op: Op, table: &str) -> Option<String> {
        let mut failures = self.failures.lock().unwrap();
        let key = (op, table.to_string());
        let script = failures.get_mut(&key)?;
        match &mut script.until {
            FailureUntil::Attempts(remaining) => {
                if *remaining == 0 {
                    failures.remove(&key);
                    return None;
                }
                *remaining -= 1;
                let message = script.message.clone();
                if matches!(script.until, FailureUntil::Attempts(0)) {
                    failures.remove(&key);
                }
                Some(message)
            }
            FailureUntil::Rpc(_) => Some(script.message.clone()),
        }
    }

    fn clear_rpc_gated_failures(&self, function: &str) {
        self.failures.lock().unwrap().retain(|_, script| {
            !matches!(&script.until, FailureUntil::Rpc(rpc) if rpc == function)
        });
    }
}

#[async_trait]
impl RemoteStore for MockRemote {
    async fn select(&self, table: &str, query: SelectQuery) -> Result<Vec<Value>, VendraError> {
        if let Some(message) = self.take_failure(Op::Select, table) {
            return Err(VendraError::remote(message));
        }
        let mut rows: Vec<Value> = self
            .rows(table)
            .into_iter()
            .filter(|row| query.filter.matches(row))
            .collect();
        if let Some((column, dir)) = &query.order_by {
            rows.sort_by(|a, b| {
                let av = a.get(column).map(Value::to_string).unwrap_or_default();
                let bv = b.get(column).map(Value::to_string).unwrap_or_default();
                match dir {
                    SortDir::Asc => av.cmp(&bv),
                    SortDir::Desc => bv.cmp(&av),
                }
            });
        }
        if let Some(limit) = query.limit {
            rows.truncate(limit as usize);
        }
        Ok(rows)
    }

    async fn insert(&self, table: &str, mut row: Value) -> Result<Value, VendraError> {
        if let Some(message) = self.take_failure(Op::Insert, table) {
            return Err(VendraError::remote(message));
        }
        if row.get("id").is_none()
            && let Some(obj) = row.as_object_mut()
        {
            obj.insert(
                "id".to_string(),
                Value::String(uuid::Uuid::new_v4().to_string()),
            );
        }
        self.tables
            .lock()
            .unwrap()
            .entry(table.to_string())
            .or_default()
            .push(row.clone());
        Ok(row)
    }

    async fn update(
        &self,
        table: &str,
        filter: Filter,
        patch: Value,
    ) -> Result<Vec<Value>, VendraError> {
        if let Some(message) = self.take_failure(Op::Update, table) {
            return Err(VendraError::remote(message));
        }
        let mut tables = self.tables.lock().unwrap();
        let rows = tables.entry(table.to_string()).or_default();
        let mut updated = Vec::new();
        for row in rows.iter_mut() {
            if filter.matches(row)
                && let (Some(target), Some(source)) = (row.as_object_mut(), patch.as_object())
            {
                for (k, v) in source {
                    target.insert(k.clone(), v.clone());
                }
                updated.push(Value::Object(target.clone()));
            }
        }
        Ok(updated)
    }

    async fn delete(&self, table: &str, filter: Filter) -> Result<(), VendraError> {
        if let Some(message) = self.take_failure(Op::Delete, table) {
            return Err(VendraError::remote(message));
        }
        let mut tables = self.tables.lock().unwrap();
        if let Some(rows) = tables.get_mut(table) {
            rows.retain(|row| !filter.matches(row));
        }
        Ok(())
    }

    async fn rpc(&self, function: &str, args: Value) -> Result<Value, VendraError> {
        self.rpc_log
            .lock()
            .unwrap()
            .push((function.to_string(), args));

        let mut rpc_failures = self.rpc_failures.lock().unwrap();
        if let Some((message, remaining)) = rpc_failures.get_mut(function) {
            if *remaining > 0 {
                *remaining -= 1;
                let message = message.clone();
                drop(rpc_failures);
                return Err(VendraError::remote(message));
            }
        }
        drop(rpc_failures);

        self.clear_rpc_gated_failures(function);
        Ok(Value::Null)
    }
}
