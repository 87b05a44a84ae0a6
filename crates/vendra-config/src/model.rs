// SPDX-FileCopyrightText: 2026 Vendra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Vendra sync engine.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Vendra configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct VendraConfig {
    /// Client identity and logging settings.
    #[serde(default)]
    pub client: ClientConfig,

    /// Remote platform endpoint settings.
    #[serde(default)]
    pub remote: RemoteConfig,

    /// Read-state shadow persistence settings.
    #[serde(default)]
    pub shadow: ShadowConfig,

    /// Synchronization engine behavior settings.
    #[serde(default)]
    pub sync: SyncConfig,

    /// Media bucket settings.
    #[serde(default)]
    pub media: MediaConfig,
}

/// Client identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    /// Display name of this client instance.
    #[serde(default = "default_client_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            name: default_client_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_client_name() -> String {
    "vendra".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Remote platform endpoint configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RemoteConfig {
    /// Base URL of the hosted platform. `None` is only valid in tests, where
    /// the remote store is an in-memory fake.
    #[serde(default)]
    pub url: Option<String>,

    /// Anonymous/publishable API key for the standard client.
    #[serde(default)]
    pub anon_key: Option<String>,

    /// Service-role key for the elevated client. `None` disables the
    /// elevated variant; admin sessions then use the standard client.
    #[serde(default)]
    pub service_role_key: Option<String>,
}

/// Read-state shadow persistence configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ShadowConfig {
    /// Path to the local key-value file backing the shadow.
    #[serde(default = "default_shadow_path")]
    pub path: String,

    /// Maximum number of notification IDs retained; oldest evicted first.
    #[serde(default = "default_max_tracked")]
    pub max_tracked: usize,
}

impl Default for ShadowConfig {
    fn default() -> Self {
        Self {
            path: default_shadow_path(),
            max_tracked: default_max_tracked(),
        }
    }
}

fn default_shadow_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("vendra").join("local.json"))
        .unwrap_or_else(|| std::path::PathBuf::from("vendra-local.json"))
        .to_string_lossy()
        .into_owned()
}

fn default_max_tracked() -> usize {
    500
}

/// Synchronization engine behavior configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SyncConfig {
    /// Hard timeout for a single mutation operation, in seconds. Keeps the
    /// UI recoverable when a remote call never resolves.
    #[serde(default = "default_op_timeout_secs")]
    pub op_timeout_secs: u64,

    /// Whether "permission" remote faults trigger the remediation RPC the
    /// same way policy-recursion faults do. Kept as a switch so the
    /// workaround can be disabled once the server-side policy bug is fixed.
    #[serde(default = "default_remediate_permission_faults")]
    pub remediate_permission_faults: bool,

    /// Name of the remote procedure invoked to remediate policy faults.
    #[serde(default = "default_remediation_fn")]
    pub remediation_fn: String,

    /// Name of the remote procedure used as the settings persistence
    /// fallback when the direct insert is rejected.
    #[serde(default = "default_settings_fallback_fn")]
    pub settings_fallback_fn: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            op_timeout_secs: default_op_timeout_secs(),
            remediate_permission_faults: default_remediate_permission_faults(),
            remediation_fn: default_remediation_fn(),
            settings_fallback_fn: default_settings_fallback_fn(),
        }
    }
}

fn default_op_timeout_secs() -> u64 {
    15
}

fn default_remediate_permission_faults() -> bool {
    true
}

fn default_remediation_fn() -> String {
    "repair_select_policies".to_string()
}

fn default_settings_fallback_fn() -> String {
    "persist_settings".to_string()
}

/// Media bucket configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MediaConfig {
    /// Bucket used for product and category images.
    #[serde(default = "default_bucket")]
    pub bucket: String,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            bucket: default_bucket(),
        }
    }
}

fn default_bucket() -> String {
    "product-images".to_string()
}
