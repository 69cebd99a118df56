//! Database service layer
//!
//! This module provides a high-level interface to the three resource
//! repositories, backed either by Postgres or by in-process stores.

use std::sync::Arc;

use crate::database::repositories::{MemoryRecordStore, PgRecordStore, ResourceRepository};
use crate::database::DatabasePool;
use crate::models::{Event, GalleryImage, TeamMember};
use crate::services::storage::ObjectStore;
use crate::utils::errors::TechClubError;

#[derive(Clone)]
pub struct DatabaseService {
    pub events: ResourceRepository<Event>,
    pub team: ResourceRepository<TeamMember>,
    pub gallery: ResourceRepository<GalleryImage>,
}

impl DatabaseService {
    pub fn postgres(pool: DatabasePool, objects: Arc<dyn ObjectStore>) -> Self {
        Self {
            events: ResourceRepository::new(Arc::new(PgRecordStore::<Event>::new(pool.clone())), objects.clone()),
            team: ResourceRepository::new(Arc::new(PgRecordStore::<TeamMember>::new(pool.clone())), objects.clone()),
            gallery: ResourceRepository::new(Arc::new(PgRecordStore::<GalleryImage>::new(pool)), objects),
        }
    }

    /// Service over in-process stores, used by tests and demo runs
    pub fn in_memory(objects: Arc<dyn ObjectStore>) -> Self {
        Self {
            events: ResourceRepository::new(Arc::new(MemoryRecordStore::<Event>::new()), objects.clone()),
            team: ResourceRepository::new(Arc::new(MemoryRecordStore::<TeamMember>::new()), objects.clone()),
            gallery: ResourceRepository::new(Arc::new(MemoryRecordStore::<GalleryImage>::new()), objects),
        }
    }

    /// Check that the backing store answers
    pub async fn health_check(&self) -> Result<(), TechClubError> {
        self.events.ping().await
    }
}
