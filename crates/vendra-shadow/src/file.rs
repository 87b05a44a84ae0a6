// SPDX-FileCopyrightText: 2026 Vendra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! File-backed [`LocalStore`] implementation.
//!
//! Stores all keys in a single JSON object file, read-modify-written on every
//! set. Writes are serialized within the process by a mutex; concurrent
//! writers in separate processes can still lose an update, the same accepted
//! limitation the browser-storage original has across tabs.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::debug;

use vendra_core::traits::LocalStore;
use vendra_core::VendraError;

/// JSON-file key-value store.
pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> HashMap<String, String> {
        let Ok(raw) = std::fs::read_to_string(&self.path) else {
            return HashMap::new();
        };
        match serde_json::from_str(&raw) {
            Ok(map) => map,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "local store file unreadable, treating as empty");
                HashMap::new()
            }
        }
    }

    fn write_map(&self, map: &HashMap<String, String>) -> Result<(), VendraError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| VendraError::Shadow {
                message: format!("failed to create {}: {e}", parent.display()),
            })?;
        }
        let encoded = serde_json::to_string_pretty(map).map_err(|e| VendraError::Shadow {
            message: format!("failed to encode local store: {e}"),
        })?;
        std::fs::write(&self.path, encoded).map_err(|e| VendraError::Shadow {
            message: format!("failed to write {}: {e}", self.path.display()),
        })
    }
}

impl LocalStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.read_map().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), VendraError> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| VendraError::Shadow {
                message: "local store lock poisoned".to_string(),
            })?;
        let mut map = self.read_map();
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map)
    }

    fn remove(&self, key: &str) -> Result<(), VendraError> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| VendraError::Shadow {
                message: "local store lock poisoned".to_string(),
            })?;
        let mut map = self.read_map();
        if map.remove(key).is_some() {
            self.write_map(&map)?;
        }
        Ok(())
    }
}
