// SPDX-FileCopyrightText: 2026 Vendra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./vendra.toml` > `~/.config/vendra/vendra.toml` >
//! `/etc/vendra/vendra.toml` with environment variable overrides via the
//! `VENDRA_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::VendraConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/vendra/vendra.toml` (system-wide)
/// 3. `~/.config/vendra/vendra.toml` (user XDG config)
/// 4. `./vendra.toml` (local directory)
/// 5. `VENDRA_*` environment variables
pub fn load_config() -> Result<VendraConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(VendraConfig::default()))
        .merge(Toml::file("/etc/vendra/vendra.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("vendra/vendra.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("vendra.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Useful for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<VendraConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(VendraConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<VendraConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(VendraConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `VENDRA_SYNC_OP_TIMEOUT_SECS` must map to
/// `sync.op_timeout_secs`, not `sync.op.timeout.secs`.
fn env_provider() -> Env {
    Env::prefixed("VENDRA_").map(|key| {
        // The mapper runs before figment lowercases the key, so it sees the
        // env var name in its original case with the prefix stripped.
        // Example: VENDRA_REMOTE_ANON_KEY -> "REMOTE_ANON_KEY"
        let lowered = key.as_str().to_ascii_lowercase();
        let mapped = lowered
            .replacen("client_", "client.", 1)
            .replacen("remote_", "remote.", 1)
            .replacen("shadow_", "shadow.", 1)
            .replacen("sync_", "sync.", 1)
            .replacen("media_", "media.", 1);
        mapped.into()
    })
}
