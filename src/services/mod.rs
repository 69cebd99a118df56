//! Services module
//!
//! This module contains business logic services

pub mod auth;
pub mod media;
pub mod storage;

// Re-export commonly used services
pub use auth::{hash_password, AuthService};
pub use media::{object_key_from_url, MediaUploadService, UploadedFile};
pub use storage::{HttpObjectStore, LocalObjectStore, MemoryObjectStore, ObjectStore};

use std::sync::Arc;

use serde::Serialize;

use crate::config::{Settings, StorageBackend};
use crate::state::storage::SessionStore;
use crate::utils::errors::Result;

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub objects: Arc<dyn ObjectStore>,
    pub media: MediaUploadService,
    pub auth: AuthService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub async fn new(settings: &Settings, sessions: Arc<dyn SessionStore>) -> Result<Self> {
        let objects = build_object_store(settings).await?;
        Ok(Self::with_object_store(settings, objects, sessions))
    }

    pub fn with_object_store(
        settings: &Settings,
        objects: Arc<dyn ObjectStore>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        let media = MediaUploadService::new(objects.clone(), settings.storage.max_upload_bytes);
        let auth = AuthService::from_settings(settings, sessions);

        Self {
            objects,
            media,
            auth,
        }
    }
}

/// Object store selected by `storage.backend`
pub async fn build_object_store(settings: &Settings) -> Result<Arc<dyn ObjectStore>> {
    let storage = &settings.storage;
    let store: Arc<dyn ObjectStore> = match storage.backend {
        StorageBackend::Remote => Arc::new(HttpObjectStore::new(&storage.url, &storage.service_key)),
        StorageBackend::Local => {
            let local = LocalObjectStore::new(&storage.local_root, &settings.server.public_base_url);
            local.ensure_buckets().await?;
            Arc::new(local)
        }
        StorageBackend::Memory => Arc::new(MemoryObjectStore::new(&settings.server.public_base_url)),
    };
    tracing::info!(backend = ?storage.backend, "Object storage ready");
    Ok(store)
}

/// Health of the collaborators a request depends on
#[derive(Debug, Clone, Serialize)]
pub struct ServiceHealthStatus {
    pub database_healthy: bool,
    pub sessions_healthy: bool,
}

impl ServiceHealthStatus {
    /// Check if all critical services are healthy
    pub fn is_healthy(&self) -> bool {
        self.database_healthy && self.sessions_healthy
    }

    /// Get list of unhealthy services
    pub fn get_issues(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if !self.database_healthy {
            issues.push("Database connection failed".to_string());
        }
        if !self.sessions_healthy {
            issues.push("Session store connection failed".to_string());
        }

        issues
    }
}
