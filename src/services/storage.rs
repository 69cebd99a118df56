//! Object storage backends for the image buckets
//!
//! This module defines the [`ObjectStore`] seam and its implementations:
//! a client for a Supabase-compatible storage REST API, a local directory
//! store (one sub-directory per bucket) and an in-process store for tests.
//! Writes are create-only: an existing key is never overwritten.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Bytes;
use reqwest::{Client, StatusCode};
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::models::Bucket;
use crate::utils::errors::{UploadError, UploadResult};
use crate::utils::logging::log_api_error;

/// A stored object as read back from a bucket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub bytes: Bytes,
    pub content_type: String,
}

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Write a new object, failing if the key is taken
    async fn put(&self, bucket: Bucket, key: &str, body: Bytes, content_type: &str) -> UploadResult<()>;

    /// Publicly reachable URL of an object
    fn public_url(&self, bucket: Bucket, key: &str) -> String;

    /// Remove objects; keys that do not exist are ignored
    async fn remove(&self, bucket: Bucket, keys: &[String]) -> UploadResult<()>;

    async fn fetch(&self, bucket: Bucket, key: &str) -> UploadResult<Option<StoredObject>>;

    async fn exists(&self, bucket: Bucket, key: &str) -> UploadResult<bool> {
        Ok(self.fetch(bucket, key).await?.is_some())
    }
}

/// Keys are single path segments produced by the upload service
pub fn validate_key(key: &str) -> UploadResult<()> {
    let valid = !key.is_empty()
        && key != "."
        && key != ".."
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'));
    if valid {
        Ok(())
    } else {
        Err(UploadError::Rejected {
            bucket: String::new(),
            status: 400,
            message: format!("invalid object key: {}", key),
        })
    }
}

/// Client for a Supabase-compatible storage REST API
#[derive(Clone)]
pub struct HttpObjectStore {
    client: Client,
    base_url: String,
    service_key: String,
}

impl HttpObjectStore {
    pub fn new(base_url: &str, service_key: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            service_key: service_key.to_string(),
        }
    }

    fn object_url(&self, bucket: Bucket, key: &str) -> String {
        format!("{}/storage/v1/object/{}/{}", self.base_url, bucket.name(), key)
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .bearer_auth(&self.service_key)
            .header("apikey", &self.service_key)
    }

    async fn rejection(bucket: Bucket, response: reqwest::Response) -> UploadError {
        let status = response.status();
        let message = response.text().await.unwrap_or_default();
        log_api_error("storage", &message, Some(&format!("{} {}", bucket.name(), status)));
        UploadError::Rejected {
            bucket: bucket.name().to_string(),
            status: status.as_u16(),
            message,
        }
    }
}

fn transport(e: reqwest::Error) -> UploadError {
    UploadError::Transport(e.to_string())
}

#[async_trait]
impl ObjectStore for HttpObjectStore {
    async fn put(&self, bucket: Bucket, key: &str, body: Bytes, content_type: &str) -> UploadResult<()> {
        validate_key(key)?;
        let response = self
            .authorized(self.client.post(self.object_url(bucket, key)))
            .header("content-type", content_type)
            .header("x-upsert", "false")
            .body(body)
            .send()
            .await
            .map_err(transport)?;

        match response.status() {
            s if s.is_success() => {
                debug!(bucket = %bucket, key = key, "Object uploaded");
                Ok(())
            }
            StatusCode::CONFLICT => Err(UploadError::AlreadyExists {
                bucket: bucket.name().to_string(),
                key: key.to_string(),
            }),
            _ => Err(Self::rejection(bucket, response).await),
        }
    }

    fn public_url(&self, bucket: Bucket, key: &str) -> String {
        format!("{}/storage/v1/object/public/{}/{}", self.base_url, bucket.name(), key)
    }

    async fn remove(&self, bucket: Bucket, keys: &[String]) -> UploadResult<()> {
        if keys.is_empty() {
            return Ok(());
        }

        let response = self
            .authorized(
                self.client
                    .delete(format!("{}/storage/v1/object/{}", self.base_url, bucket.name())),
            )
            .json(&serde_json::json!({ "prefixes": keys }))
            .send()
            .await
            .map_err(transport)?;

        if response.status().is_success() {
            debug!(bucket = %bucket, count = keys.len(), "Objects removed");
            Ok(())
        } else {
            Err(Self::rejection(bucket, response).await)
        }
    }

    async fn fetch(&self, bucket: Bucket, key: &str) -> UploadResult<Option<StoredObject>> {
        validate_key(key)?;
        let response = self
            .authorized(self.client.get(self.object_url(bucket, key)))
            .send()
            .await
            .map_err(transport)?;

        match response.status() {
            s if s.is_success() => {
                let content_type = response
                    .headers()
                    .get(reqwest::header::CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = response.bytes().await.map_err(transport)?;
                Ok(Some(StoredObject { bytes, content_type }))
            }
            // The storage API answers a missing object with 400 as well as 404
            StatusCode::NOT_FOUND | StatusCode::BAD_REQUEST => Ok(None),
            _ => Err(Self::rejection(bucket, response).await),
        }
    }
}

/// Stores each bucket as a directory below `root`
#[derive(Clone)]
pub struct LocalObjectStore {
    root: PathBuf,
    public_base_url: String,
}

impl LocalObjectStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: &str) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create the bucket directories
    pub async fn ensure_buckets(&self) -> UploadResult<()> {
        for bucket in Bucket::ALL {
            tokio::fs::create_dir_all(self.root.join(bucket.name()))
                .await
                .map_err(|e| UploadError::Io(e.to_string()))?;
        }
        info!(root = %self.root.display(), "Local storage buckets ready");
        Ok(())
    }

    fn path(&self, bucket: Bucket, key: &str) -> UploadResult<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(bucket.name()).join(key))
    }
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    async fn put(&self, bucket: Bucket, key: &str, body: Bytes, _content_type: &str) -> UploadResult<()> {
        let path = self.path(bucket, key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| UploadError::Io(e.to_string()))?;
        }

        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::AlreadyExists => UploadError::AlreadyExists {
                    bucket: bucket.name().to_string(),
                    key: key.to_string(),
                },
                _ => UploadError::Io(e.to_string()),
            })?;

        if let Err(e) = file.write_all(&body).await {
            drop(file);
            let _ = tokio::fs::remove_file(&path).await;
            return Err(UploadError::Io(e.to_string()));
        }
        file.flush().await.map_err(|e| UploadError::Io(e.to_string()))?;

        debug!(bucket = %bucket, key = key, bytes = body.len(), "Object written");
        Ok(())
    }

    fn public_url(&self, bucket: Bucket, key: &str) -> String {
        format!("{}/media/{}/{}", self.public_base_url, bucket.name(), key)
    }

    async fn remove(&self, bucket: Bucket, keys: &[String]) -> UploadResult<()> {
        for key in keys {
            let path = self.path(bucket, key)?;
            match tokio::fs::remove_file(&path).await {
                Ok(()) => debug!(bucket = %bucket, key = %key, "Object removed"),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(UploadError::Io(e.to_string())),
            }
        }
        Ok(())
    }

    async fn fetch(&self, bucket: Bucket, key: &str) -> UploadResult<Option<StoredObject>> {
        let path = self.path(bucket, key)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => {
                let content_type = crate::utils::helpers::file_extension(key)
                    .map(|ext| crate::utils::helpers::content_type_for_extension(&ext))
                    .unwrap_or("application/octet-stream")
                    .to_string();
                Ok(Some(StoredObject {
                    bytes: Bytes::from(bytes),
                    content_type,
                }))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(UploadError::Io(e.to_string())),
        }
    }
}

/// In-process object store
///
/// Writes and removals can be made to fail, which is how the test suites
/// simulate a storage outage.
#[derive(Clone)]
pub struct MemoryObjectStore {
    objects: Arc<RwLock<HashMap<(Bucket, String), StoredObject>>>,
    public_base_url: String,
    fail_writes: Arc<AtomicBool>,
    fail_removes: Arc<AtomicBool>,
}

impl MemoryObjectStore {
    pub fn new(public_base_url: &str) -> Self {
        Self {
            objects: Arc::new(RwLock::new(HashMap::new())),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
            fail_writes: Arc::new(AtomicBool::new(false)),
            fail_removes: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_removes(&self, fail: bool) {
        self.fail_removes.store(fail, Ordering::SeqCst);
    }

    /// Number of objects held in a bucket
    pub async fn object_count(&self, bucket: Bucket) -> usize {
        self.objects
            .read()
            .await
            .keys()
            .filter(|(b, _)| *b == bucket)
            .count()
    }

    fn outage(bucket: Bucket) -> UploadError {
        UploadError::Rejected {
            bucket: bucket.name().to_string(),
            status: 503,
            message: "storage unavailable".to_string(),
        }
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn put(&self, bucket: Bucket, key: &str, body: Bytes, content_type: &str) -> UploadResult<()> {
        validate_key(key)?;
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Self::outage(bucket));
        }

        let mut objects = self.objects.write().await;
        let slot = (bucket, key.to_string());
        if objects.contains_key(&slot) {
            return Err(UploadError::AlreadyExists {
                bucket: bucket.name().to_string(),
                key: key.to_string(),
            });
        }
        objects.insert(
            slot,
            StoredObject {
                bytes: body,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    fn public_url(&self, bucket: Bucket, key: &str) -> String {
        format!("{}/media/{}/{}", self.public_base_url, bucket.name(), key)
    }

    async fn remove(&self, bucket: Bucket, keys: &[String]) -> UploadResult<()> {
        if self.fail_removes.load(Ordering::SeqCst) {
            return Err(Self::outage(bucket));
        }

        let mut objects = self.objects.write().await;
        for key in keys {
            objects.remove(&(bucket, key.clone()));
        }
        Ok(())
    }

    async fn fetch(&self, bucket: Bucket, key: &str) -> UploadResult<Option<StoredObject>> {
        Ok(self
            .objects
            .read()
            .await
            .get(&(bucket, key.to_string()))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_validate_key() {
        assert!(validate_key("3f2a.jpg").is_ok());
        assert!(validate_key("../etc/passwd").is_err());
        assert!(validate_key("a/b.png").is_err());
        assert!(validate_key("..").is_err());
        assert!(validate_key("").is_err());
    }

    #[tokio::test]
    async fn test_local_store_lifecycle() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalObjectStore::new(dir.path(), "http://localhost:8080/");
        store.ensure_buckets().await.unwrap();

        store
            .put(Bucket::EventImages, "evt123.jpg", Bytes::from_static(b"jpeg"), "image/jpeg")
            .await
            .unwrap();
        assert!(dir.path().join("event-images/evt123.jpg").exists());
        assert_eq!(
            store.public_url(Bucket::EventImages, "evt123.jpg"),
            "http://localhost:8080/media/event-images/evt123.jpg"
        );

        let fetched = store.fetch(Bucket::EventImages, "evt123.jpg").await.unwrap().unwrap();
        assert_eq!(fetched.bytes, Bytes::from_static(b"jpeg"));
        assert_eq!(fetched.content_type, "image/jpeg");

        let again = store
            .put(Bucket::EventImages, "evt123.jpg", Bytes::from_static(b"other"), "image/jpeg")
            .await;
        assert_matches!(again, Err(UploadError::AlreadyExists { .. }));

        store
            .remove(Bucket::EventImages, &["evt123.jpg".to_string(), "missing.jpg".to_string()])
            .await
            .unwrap();
        assert!(!store.exists(Bucket::EventImages, "evt123.jpg").await.unwrap());
    }

    #[tokio::test]
    async fn test_memory_store_failure_switches() {
        let store = MemoryObjectStore::new("http://localhost");
        store.set_fail_writes(true);
        let result = store
            .put(Bucket::GalleryImages, "a.png", Bytes::from_static(b"png"), "image/png")
            .await;
        assert_matches!(result, Err(UploadError::Rejected { status: 503, .. }));
        assert_eq!(store.object_count(Bucket::GalleryImages).await, 0);

        store.set_fail_writes(false);
        store
            .put(Bucket::GalleryImages, "a.png", Bytes::from_static(b"png"), "image/png")
            .await
            .unwrap();
        store.set_fail_removes(true);
        assert!(store.remove(Bucket::GalleryImages, &["a.png".to_string()]).await.is_err());
        assert_eq!(store.object_count(Bucket::GalleryImages).await, 1);
    }
}
