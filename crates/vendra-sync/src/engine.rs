// SPDX-FileCopyrightText: 2026 Vendra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The synchronization engine: owns the snapshot, the remote clients, the
//! ambient session, and the read-state shadow.
//!
//! Fetching is a strictly sequential pass over the fixed collection sequence.
//! Collections fail independently: a fault on one is classified, remediated
//! where eligible, retried once, and on repeat failure recorded against that
//! collection while the pass continues.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use serde_json::{Value, json};
use strum::IntoEnumIterator;
use tokio::sync::{RwLock, RwLockReadGuard};
use tracing::{debug, info, warn};

use vendra_config::model::SyncConfig;
use vendra_core::model::{self, StoreSettings};
use vendra_core::traits::RemoteStore;
use vendra_core::types::{Role, SelectQuery, Session};
use vendra_core::{FaultClass, VendraError};
use vendra_shadow::ReadShadow;

use crate::snapshot::{Collection, CollectionStatus, Snapshot};

/// The engine. One instance per authenticated client; shared via `Arc`.
pub struct SyncEngine {
    standard: Arc<dyn RemoteStore>,
    elevated: Option<Arc<dyn RemoteStore>>,
    session: ArcSwapOption<Session>,
    pub(crate) snapshot: RwLock<Snapshot>,
    pub(crate) shadow: ReadShadow,
    pub(crate) config: SyncConfig,
}

impl SyncEngine {
    /// Build an engine over a standard client and an optional elevated
    /// (service-role) client used for admin sessions.
    pub fn new(
        standard: Arc<dyn RemoteStore>,
        elevated: Option<Arc<dyn RemoteStore>>,
        shadow: ReadShadow,
        config: SyncConfig,
    ) -> Self {
        Self {
            standard,
            elevated,
            session: ArcSwapOption::empty(),
            snapshot: RwLock::new(Snapshot::default()),
            shadow,
            config,
        }
    }

    /// Install or clear the ambient session.
    pub fn set_session(&self, session: Option<Session>) {
        self.session.store(session.map(Arc::new));
    }

    pub fn session(&self) -> Option<Arc<Session>> {
        self.session.load_full()
    }

    /// Read access to the snapshot. Holds the lock for the guard's lifetime.
    pub async fn snapshot(&self) -> RwLockReadGuard<'_, Snapshot> {
        self.snapshot.read().await
    }

    pub(crate) fn require_session(&self) -> Result<Arc<Session>, VendraError> {
        self.session.load_full().ok_or(VendraError::NotAuthenticated)
    }

    /// The remote client for a role: admin sessions get the elevated client
    /// when one is configured.
    pub(crate) fn client_for(&self, role: Role) -> Arc<dyn RemoteStore> {
        match (role, &self.elevated) {
            (Role::Admin, Some(elevated)) => Arc::clone(elevated),
            _ => Arc::clone(&self.standard),
        }
    }

    /// Fetch every collection in sequence, accepting partial success.
    ///
    /// Fails fast with [`VendraError::NotAuthenticated`] when no session is
    /// installed. Individual collection failures are recorded per collection
    /// and in [`Snapshot::last_error`]; they never abort the pass. `loading`
    /// is cleared unconditionally when the pass ends.
    pub async fn fetch_all(&self) -> Result<(), VendraError> {
        let session = self.require_session()?;
        let client = self.client_for(session.user.role);

        {
            let mut snap = self.snapshot.write().await;
            snap.loading = true;
            snap.last_error = None;
            for collection in Collection::iter() {
                snap.set_status(collection, CollectionStatus::Loading);
            }
        }

        let mut failed = 0usize;
        for collection in Collection::iter() {
            let result = if collection == Collection::Settings {
                self.sync_settings(&client).await
            } else {
                match self
                    .select_with_remediation(&client, collection.table_name())
                    .await
                {
                    Ok(rows) => {
                        self.store_rows(collection, rows).await;
                        Ok(())
                    }
                    Err(err) => Err(err),
                }
            };

            let mut snap = self.snapshot.write().await;
            match result {
                Ok(()) => snap.set_status(collection, CollectionStatus::Ready),
                Err(err) => {
                    warn!(
                        table = collection.table_name(),
                        error = %err,
                        "collection fetch failed, continuing"
                    );
                    failed += 1;
                    snap.last_error = Some(err.to_string());
                    snap.set_status(collection, CollectionStatus::Failed(err.to_string()));
                }
            }
        }

        self.snapshot.write().await.loading = false;
        info!(failed, "fetch pass complete");
        Ok(())
    }

    /// Select a whole table, remediating eligible policy faults once.
    ///
    /// Policy-recursion faults always trigger the remediation RPC; permission
    /// faults do so only when enabled in config. After successful remediation
    /// the select is retried exactly once; when the RPC itself fails, the
    /// original fault is surfaced with the remediation failure appended and
    /// no retry happens.
    pub(crate) async fn select_with_remediation(
        &self,
        client: &Arc<dyn RemoteStore>,
        table: &str,
    ) -> Result<Vec<Value>, VendraError> {
        let err = match client.select(table, SelectQuery::all()).await {
            Ok(rows) => return Ok(rows),
            Err(err) => err,
        };

        let remediate = match err.fault() {
            Some(FaultClass::PolicyRecursion) => true,
            Some(FaultClass::Permission) => self.config.remediate_permission_faults,
            _ => false,
        };
        if !remediate {
            return Err(err);
        }

        warn!(table, error = %err, "policy fault, invoking remediation");
        if let Err(rpc_err) = client
            .rpc(&self.config.remediation_fn, json!({ "table": table }))
            .await
        {
            warn!(table, error = %rpc_err, "remediation rpc failed");
            let message = match &err {
                VendraError::Remote { message, .. } => message.clone(),
                other => other.to_string(),
            };
            return Err(VendraError::remote(format!(
                "{message} (remediation failed: {rpc_err})"
            )));
        }
        client.select(table, SelectQuery::all()).await
    }

    /// Decode a fetched collection into the snapshot. Notifications get the
    /// read shadow applied before they are stored.
    async fn store_rows(&self, collection: Collection, rows: Vec<Value>) {
        let table = collection.table_name();
        let mut snap = self.snapshot.write().await;
        match collection {
            Collection::Products => snap.products = model::decode_rows(table, rows),
            Collection::Categories => snap.categories = model::decode_rows(table, rows),
            Collection::Orders => snap.orders = model::decode_rows(table, rows),
            Collection::Offers => snap.offers = model::decode_rows(table, rows),
            Collection::Profiles => snap.profiles = model::decode_rows(table, rows),
            Collection::Wishlists => snap.wishlists = model::decode_rows(table, rows),
            Collection::OrderItems => snap.order_items = model::decode_rows(table, rows),
            Collection::Addresses => snap.addresses = model::decode_rows(table, rows),
            Collection::PaymentMethods => snap.payment_methods = model::decode_rows(table, rows),
            Collection::Notifications => {
                let mut notifications = model::decode_rows(table, rows);
                self.shadow.apply(&mut notifications);
                snap.notifications = notifications;
            }
            Collection::CartItems => snap.cart_items = model::decode_rows(table, rows),
            // Settings go through sync_settings; never stored as plain rows.
            Collection::Settings => {}
        }
    }

    /// Fetch the settings singleton, creating it when absent.
    ///
    /// The first returned row is canonical. When the table is empty a default
    /// row is inserted; if the insert is rejected the configured RPC persists
    /// the defaults instead.
    async fn sync_settings(&self, client: &Arc<dyn RemoteStore>) -> Result<(), VendraError> {
        let rows = self
            .select_with_remediation(client, Collection::Settings.table_name())
            .await?;

        let settings = match rows.into_iter().next() {
            Some(row) => match serde_json::from_value(row) {
                Ok(settings) => settings,
                Err(e) => {
                    debug!(error = %e, "settings row failed shape check, using defaults");
                    StoreSettings::default()
                }
            },
            None => self.create_default_settings(client).await?,
        };

        self.snapshot.write().await.settings = settings;
        Ok(())
    }

    async fn create_default_settings(
        &self,
        client: &Arc<dyn RemoteStore>,
    ) -> Result<StoreSettings, VendraError> {
        let defaults = StoreSettings::default();
        let row = serde_json::to_value(&defaults)
            .map_err(|e| VendraError::Internal(format!("failed to encode settings: {e}")))?;

        match client
            .insert(Collection::Settings.table_name(), row.clone())
            .await
        {
            Ok(stored) => Ok(serde_json::from_value(stored).unwrap_or(defaults)),
            Err(err) => {
                warn!(error = %err, "settings insert rejected, persisting via rpc");
                client.rpc(&self.config.settings_fallback_fn, row).await?;
                Ok(defaults)
            }
        }
    }
}
