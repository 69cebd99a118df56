//! In-process record store
//!
//! Used by the test suites and by local demo runs without a database. Rows
//! are built and patched through their JSON form, the same way the Postgres
//! store hands them to `jsonb_populate_record`.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::store::RecordStore;
use crate::models::Resource;
use crate::utils::errors::{Result, TechClubError};

pub struct MemoryRecordStore<R> {
    rows: Arc<RwLock<Vec<R>>>,
}

impl<R> Clone for MemoryRecordStore<R> {
    fn clone(&self) -> Self {
        Self {
            rows: Arc::clone(&self.rows),
        }
    }
}

impl<R> Default for MemoryRecordStore<R> {
    fn default() -> Self {
        Self {
            rows: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl<R: Resource> MemoryRecordStore<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }

    fn merge(base: Value, patch: Value) -> Result<R> {
        let mut base = base;
        if let (Value::Object(target), Value::Object(changes)) = (&mut base, patch) {
            for (key, value) in changes {
                target.insert(key, value);
            }
        }
        serde_json::from_value(base).map_err(|e| {
            TechClubError::Persistence(format!("{} row rejected: {}", R::KIND.table(), e))
        })
    }
}

#[async_trait]
impl<R: Resource> RecordStore<R> for MemoryRecordStore<R> {
    async fn select(&self, category: Option<R::Category>) -> Result<Vec<R>> {
        let rows = self.rows.read().await;
        let mut selected: Vec<R> = rows
            .iter()
            .filter(|row| category.map_or(true, |c| row.category() == c))
            .cloned()
            .collect();
        selected.sort_by(R::compare);
        Ok(selected)
    }

    async fn select_one(&self, id: Uuid) -> Result<Option<R>> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|row| row.id() == id).cloned())
    }

    async fn insert(&self, draft: &R::Draft, image_url: &str) -> Result<R> {
        let base = serde_json::json!({
            "id": Uuid::new_v4(),
            "image_url": image_url,
            "created_at": Utc::now(),
        });
        let record = Self::merge(base, serde_json::to_value(draft)?)?;

        self.rows.write().await.push(record.clone());
        Ok(record)
    }

    async fn update(&self, id: Uuid, patch: &R::Patch) -> Result<Option<R>> {
        let mut rows = self.rows.write().await;
        let Some(slot) = rows.iter_mut().find(|row| row.id() == id) else {
            return Ok(None);
        };

        let updated = Self::merge(serde_json::to_value(&*slot)?, serde_json::to_value(patch)?)?;
        *slot = updated.clone();
        Ok(Some(updated))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|row| row.id() != id);
        Ok(rows.len() < before)
    }
}
