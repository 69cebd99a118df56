//! Record store abstraction
//!
//! A record store is the table-level half of the remote data store: it knows
//! how to read and write rows of one resource type and nothing about images.

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::Resource;
use crate::utils::errors::Result;

#[async_trait]
pub trait RecordStore<R: Resource>: Send + Sync {
    /// All records in canonical order, optionally restricted to one category
    async fn select(&self, category: Option<R::Category>) -> Result<Vec<R>>;

    async fn select_one(&self, id: Uuid) -> Result<Option<R>>;

    async fn insert(&self, draft: &R::Draft, image_url: &str) -> Result<R>;

    /// Returns `None` when no record has the given id
    async fn update(&self, id: Uuid, patch: &R::Patch) -> Result<Option<R>>;

    /// Returns whether a record was removed
    async fn delete(&self, id: Uuid) -> Result<bool>;

    /// Connectivity probe
    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
