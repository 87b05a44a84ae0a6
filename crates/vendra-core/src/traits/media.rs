// SPDX-FileCopyrightText: 2026 Vendra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Media bucket trait for image hosting.

use async_trait::async_trait;

use crate::error::VendraError;

/// Storage bucket API used for product/category image hosting.
///
/// An external collaborator with its own failure modes (bucket-not-found,
/// permission-denied, oversized payload); the sync crate classifies those into
/// user-facing messages.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Ensure the named bucket exists, creating it when missing.
    async fn ensure_bucket(&self, bucket: &str) -> Result<(), VendraError>;

    /// Upload bytes to a path within a bucket, returning the public URL.
    async fn upload(&self, bucket: &str, path: &str, bytes: &[u8])
    -> Result<String, VendraError>;

    /// Remove an object from a bucket.
    async fn remove(&self, bucket: &str, path: &str) -> Result<(), VendraError>;
}
