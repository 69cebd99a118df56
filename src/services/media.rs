//! Media upload service
//!
//! Validates an uploaded image, stores it under a fresh random key and
//! resolves the public URL that records reference.

use std::sync::Arc;

use axum::body::Bytes;
use tracing::{debug, info, instrument};

use super::storage::ObjectStore;
use crate::models::Bucket;
use crate::utils::errors::{UploadError, UploadResult};
use crate::utils::helpers::{content_type_for_extension, file_extension, generate_object_key};

/// A file received from a form submission
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl UploadedFile {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            bytes: bytes.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[derive(Clone)]
pub struct MediaUploadService {
    store: Arc<dyn ObjectStore>,
    max_upload_bytes: usize,
}

impl MediaUploadService {
    pub fn new(store: Arc<dyn ObjectStore>, max_upload_bytes: usize) -> Self {
        Self {
            store,
            max_upload_bytes,
        }
    }

    pub fn store(&self) -> &Arc<dyn ObjectStore> {
        &self.store
    }

    /// Store `file` in `bucket` and return its public URL
    ///
    /// Exactly one new object is created on success. On failure nothing is
    /// stored and the caller must not create a record.
    #[instrument(skip(self, file), fields(file_name = %file.file_name, size = file.bytes.len()))]
    pub async fn upload(&self, file: &UploadedFile, bucket: Bucket) -> UploadResult<String> {
        if file.is_empty() {
            return Err(UploadError::EmptyFile);
        }
        if file.bytes.len() > self.max_upload_bytes {
            return Err(UploadError::TooLarge {
                size: file.bytes.len(),
                limit: self.max_upload_bytes,
            });
        }
        let extension = file_extension(&file.file_name)
            .ok_or_else(|| UploadError::MissingExtension(file.file_name.clone()))?;

        let content_type = file
            .content_type
            .clone()
            .filter(|ct| !ct.is_empty() && ct != "application/octet-stream")
            .unwrap_or_else(|| content_type_for_extension(&extension).to_string());

        let key = generate_object_key(&extension);
        debug!(bucket = %bucket, key = %key, "Uploading object");
        self.store
            .put(bucket, &key, file.bytes.clone(), &content_type)
            .await?;

        let url = self.store.public_url(bucket, &key);
        info!(bucket = %bucket, key = %key, "Image stored");
        Ok(url)
    }
}

/// Recover the object key from a public URL: its last path segment
pub fn object_key_from_url(public_url: &str) -> Option<String> {
    let parsed = url::Url::parse(public_url).ok()?;
    let segment = parsed.path_segments()?.filter(|s| !s.is_empty()).last()?;
    let key = urlencoding::decode(segment).ok()?.into_owned();
    super::storage::validate_key(&key).ok()?;
    Some(key)
}
