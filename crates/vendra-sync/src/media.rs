// SPDX-FileCopyrightText: 2026 Vendra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Image upload over a [`MediaStore`], with bucket failures rewritten into
//! user-facing messages.

use std::sync::Arc;

use tracing::{debug, warn};

use vendra_core::fault::{self, FaultClass};
use vendra_core::traits::MediaStore;
use vendra_core::VendraError;

/// Uploads images into a configured bucket.
pub struct MediaUploader {
    store: Arc<dyn MediaStore>,
    bucket: String,
}

impl MediaUploader {
    pub fn new(store: Arc<dyn MediaStore>, bucket: impl Into<String>) -> Self {
        Self {
            store,
            bucket: bucket.into(),
        }
    }

    /// Upload image bytes to a path, returning the public URL.
    ///
    /// The bucket is ensured first; known failures from either step are
    /// rewritten into user-facing messages, anything unrecognized surfaces
    /// with its remote message intact.
    pub async fn upload_image(&self, path: &str, bytes: &[u8]) -> Result<String, VendraError> {
        if let Err(err) = self.store.ensure_bucket(&self.bucket).await {
            warn!(bucket = %self.bucket, error = %err, "bucket check failed");
            return Err(classify_media_failure(err));
        }

        match self.store.upload(&self.bucket, path, bytes).await {
            Ok(url) => {
                debug!(bucket = %self.bucket, path, "image uploaded");
                Ok(url)
            }
            Err(err) => Err(classify_media_failure(err)),
        }
    }

    /// Remove an uploaded image. Failures get the same rewriting as uploads.
    pub async fn remove_image(&self, path: &str) -> Result<(), VendraError> {
        self.store
            .remove(&self.bucket, path)
            .await
            .map_err(classify_media_failure)
    }
}

/// Rewrite known media failures into user-facing messages.
fn classify_media_failure(err: VendraError) -> VendraError {
    let message = err.to_string();
    let lower = message.to_lowercase();
    if lower.contains("bucket not found") || lower.contains("bucket does not exist") {
        return VendraError::Media {
            message: "Image storage is unavailable: the bucket is missing and could not be created."
                .to_string(),
        };
    }
    match fault::classify(&message) {
        FaultClass::Permission => VendraError::Media {
            message: "You do not have permission to upload images.".to_string(),
        },
        FaultClass::Payload => VendraError::Media {
            message: "Image is too large to upload. Use a smaller image.".to_string(),
        },
        _ => err,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// MediaStore fake failing with a scripted message.
    #[derive(Default)]
    struct ScriptedMedia {
        ensure_error: Mutex<Option<String>>,
        upload_error: Mutex<Option<String>>,
    }

    #[async_trait]
    impl MediaStore for ScriptedMedia {
        async fn ensure_bucket(&self, _bucket: &str) -> Result<(), VendraError> {
            match self.ensure_error.lock().unwrap().take() {
                Some(msg) => Err(VendraError::remote(msg)),
                None => Ok(()),
            }
        }

        async fn upload(
            &self,
            bucket: &str,
            path: &str,
            _bytes: &[u8],
        ) -> Result<String, VendraError> {
            match self.upload_error.lock().unwrap().take() {
                Some(msg) => Err(VendraError::remote(msg)),
                None => Ok(format!("https://cdn.example.com/{bucket}/{path}")),
            }
        }

        async fn remove(&self, _bucket: &str, _path: &str) -> Result<(), VendraError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn upload_returns_public_url() {
        let uploader = MediaUploader::new(Arc::new(ScriptedMedia::default()), "product-images");
        let url = uploader.upload_image("p1.png", b"bytes").await.unwrap();
        assert_eq!(url, "https://cdn.example.com/product-images/p1.png");
    }

    #[tokio::test]
    async fn missing_bucket_becomes_user_facing_message() {
        let media = ScriptedMedia::default();
        *media.ensure_error.lock().unwrap() = Some("Bucket not found".to_string());
        let uploader = MediaUploader::new(Arc::new(media), "product-images");
        let err = uploader.upload_image("p1.png", b"bytes").await.unwrap_err();
        assert!(matches!(err, VendraError::Media { .. }));
        assert!(err.to_string().contains("bucket is missing"));
    }

    #[tokio::test]
    async fn permission_failure_becomes_user_facing_message() {
        let media = ScriptedMedia::default();
        *media.upload_error.lock().unwrap() =
            Some("permission denied for bucket product-images".to_string());
        let uploader = MediaUploader::new(Arc::new(media), "product-images");
        let err = uploader.upload_image("p1.png", b"bytes").await.unwrap_err();
        assert!(err.to_string().contains("permission to upload"));
    }

    #[tokio::test]
    async fn oversized_payload_becomes_user_facing_message() {
        let media = ScriptedMedia::default();
        *media.upload_error.lock().unwrap() = Some("413 Payload Too Large".to_string());
        let uploader = MediaUploader::new(Arc::new(media), "product-images");
        let err = uploader.upload_image("p1.png", b"bytes").await.unwrap_err();
        assert!(err.to_string().contains("too large"));
    }

    #[tokio::test]
    async fn unknown_failures_surface_verbatim() {
        let media = ScriptedMedia::default();
        *media.upload_error.lock().unwrap() = Some("connection reset by peer".to_string());
        let uploader = MediaUploader::new(Arc::new(media), "product-images");
        let err = uploader.upload_image("p1.png", b"bytes").await.unwrap_err();
        assert!(err.to_string().contains("connection reset by peer"));
    }
}
