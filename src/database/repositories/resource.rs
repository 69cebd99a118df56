//! Generic resource repository
//!
//! Wraps a [`RecordStore`] with the rules shared by every resource: missing
//! ids become `NotFound`, creates need an image URL, and deletes clean up the
//! stored image before the row goes away.

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use super::store::RecordStore;
use crate::models::Resource;
use crate::services::media::object_key_from_url;
use crate::services::storage::ObjectStore;
use crate::utils::errors::{Result, TechClubError};
use crate::utils::logging::log_orphaned_object;

pub struct ResourceRepository<R: Resource> {
    records: Arc<dyn RecordStore<R>>,
    objects: Arc<dyn ObjectStore>,
}

impl<R: Resource> Clone for ResourceRepository<R> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
            objects: Arc::clone(&self.objects),
        }
    }
}

impl<R: Resource> ResourceRepository<R> {
    pub fn new(records: Arc<dyn RecordStore<R>>, objects: Arc<dyn ObjectStore>) -> Self {
        Self { records, objects }
    }

    /// All records in canonical order, optionally restricted to one category
    pub async fn list(&self, category: Option<R::Category>) -> Result<Vec<R>> {
        let records = self.records.select(category).await?;
        debug!(kind = %R::KIND, count = records.len(), "Listed records");
        Ok(records)
    }

    pub async fn find(&self, id: Uuid) -> Result<R> {
        self.records
            .select_one(id)
            .await?
            .ok_or_else(|| TechClubError::not_found(R::KIND.label(), id))
    }

    pub async fn create(&self, draft: &R::Draft, image_url: &str) -> Result<R> {
        if image_url.trim().is_empty() {
            return Err(TechClubError::Validation("An image is required".to_string()));
        }

        let record = self.records.insert(draft, image_url).await?;
        info!(kind = %R::KIND, id = %record.id(), "Record created");
        Ok(record)
    }

    /// Partial overwrite: fields absent from the patch keep their value
    pub async fn update(&self, id: Uuid, patch: &R::Patch) -> Result<R> {
        let record = self
            .records
            .update(id, patch)
            .await?
            .ok_or_else(|| TechClubError::not_found(R::KIND.label(), id))?;
        info!(kind = %R::KIND, id = %id, "Record updated");
        Ok(record)
    }

    /// Delete a record and, best-effort, its image
    ///
    /// A failed storage removal is logged with the orphaned key and does not
    /// stop the row from being deleted.
    pub async fn delete(&self, id: Uuid) -> Result<R> {
        let record = self.find(id).await?;
        self.remove_image(record.image_url()).await;

        if !self.records.delete(id).await? {
            return Err(TechClubError::not_found(R::KIND.label(), id));
        }
        info!(kind = %R::KIND, id = %id, "Record deleted");
        Ok(record)
    }

    /// Best-effort removal of the object behind a public URL
    pub async fn remove_image(&self, image_url: &str) {
        let bucket = R::KIND.bucket();
        let Some(key) = object_key_from_url(image_url) else {
            log_orphaned_object(bucket.name(), image_url, "image URL does not name an object key");
            return;
        };

        if let Err(e) = self.objects.remove(bucket, std::slice::from_ref(&key)).await {
            log_orphaned_object(bucket.name(), &key, &e.to_string());
        }
    }

    pub async fn ping(&self) -> Result<()> {
        self.records.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::repositories::MemoryRecordStore;
    use crate::models::{Bucket, Event, EventCategory, EventDraft, EventPatch};
    use crate::services::storage::MemoryObjectStore;
    use assert_matches::assert_matches;
    use axum::body::Bytes;
    use chrono::{NaiveDate, NaiveTime};

    fn draft(title: &str) -> EventDraft {
        EventDraft {
            title: title.to_string(),
            description: "Hackathon kickoff".to_string(),
            form_link: None,
            chat_link: None,
            date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            venue: "Main Auditorium".to_string(),
            category: EventCategory::Technova,
        }
    }

    async fn setup() -> (ResourceRepository<Event>, MemoryRecordStore<Event>, MemoryObjectStore) {
        let records = MemoryRecordStore::<Event>::new();
        let objects = MemoryObjectStore::new("http://localhost:8080");
        objects
            .put(Bucket::EventImages, "evt123.jpg", Bytes::from_static(b"jpeg"), "image/jpeg")
            .await
            .unwrap();
        let repo = ResourceRepository::new(Arc::new(records.clone()), Arc::new(objects.clone()));
        (repo, records, objects)
    }

    #[tokio::test]
    async fn test_delete_removes_record_and_object() {
        let (repo, _, objects) = setup().await;
        let url = objects.public_url(Bucket::EventImages, "evt123.jpg");
        let event = repo.create(&draft("Hack Night"), &url).await.unwrap();

        repo.delete(event.id).await.unwrap();
        assert!(!objects.exists(Bucket::EventImages, "evt123.jpg").await.unwrap());
        assert!(repo.list(None).await.unwrap().is_empty());

        let second = repo.delete(event.id).await;
        assert_matches!(second, Err(TechClubError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_survives_storage_failure() {
        let (repo, records, objects) = setup().await;
        let url = objects.public_url(Bucket::EventImages, "evt123.jpg");
        let event = repo.create(&draft("Hack Night"), &url).await.unwrap();

        objects.set_fail_removes(true);
        repo.delete(event.id).await.unwrap();
        assert!(records.is_empty().await);
        assert!(objects.exists(Bucket::EventImages, "evt123.jpg").await.unwrap());
    }

    #[tokio::test]
    async fn test_create_requires_image_url() {
        let (repo, records, _) = setup().await;
        let result = repo.create(&draft("Hack Night"), "  ").await;
        assert_matches!(result, Err(TechClubError::Validation(_)));
        assert!(records.is_empty().await);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let (repo, _, _) = setup().await;
        let patch = EventPatch {
            venue: Some("Lab 2".to_string()),
            ..Default::default()
        };
        let result = repo.update(Uuid::new_v4(), &patch).await;
        assert_matches!(result, Err(TechClubError::NotFound { kind: "Event", .. }));
    }
}
