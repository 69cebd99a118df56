//! Gallery image model

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::category::{Category, EventCategory};
use super::form::FormFields;
use super::{Resource, ResourceKind};
use crate::utils::errors::Result;

/// A photo shown in the gallery, grouped by the event theme it was taken at
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GalleryImage {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub category: EventCategory,
    pub event_name: Option<String>,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryImageDraft {
    pub title: String,
    pub description: Option<String>,
    pub category: EventCategory,
    pub event_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GalleryImagePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<EventCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_name: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Resource for GalleryImage {
    type Category = EventCategory;
    type Draft = GalleryImageDraft;
    type Patch = GalleryImagePatch;

    const KIND: ResourceKind = ResourceKind::GalleryImage;
    const COLUMNS: &'static [&'static str] =
        &["title", "description", "category", "event_name", "image_url"];
    const ORDER_BY: &'static str = "created_at DESC, id ASC";

    fn id(&self) -> Uuid {
        self.id
    }

    fn category(&self) -> EventCategory {
        self.category
    }

    fn image_url(&self) -> &str {
        &self.image_url
    }

    fn display_name(&self) -> &str {
        &self.title
    }

    fn compare(a: &Self, b: &Self) -> Ordering {
        b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id))
    }

    fn draft_from_form(form: &FormFields) -> Result<GalleryImageDraft> {
        Ok(GalleryImageDraft {
            title: form.required("title", "Title")?,
            description: form.optional("description"),
            category: form.required_category("category")?,
            event_name: form.optional("event_name"),
        })
    }

    fn patch_from_form(form: &FormFields) -> Result<GalleryImagePatch> {
        let draft = Self::draft_from_form(form)?;
        Ok(GalleryImagePatch {
            title: Some(draft.title),
            description: Some(draft.description),
            category: Some(draft.category),
            event_name: Some(draft.event_name),
            image_url: None,
        })
    }

    fn image_patch(patch: GalleryImagePatch, image_url: String) -> GalleryImagePatch {
        GalleryImagePatch {
            image_url: Some(image_url),
            ..patch
        }
    }

    fn to_form(&self) -> FormFields {
        FormFields::new()
            .with("title", &self.title)
            .with("description", self.description.as_deref().unwrap_or_default())
            .with("category", self.category.as_str())
            .with("event_name", self.event_name.as_deref().unwrap_or_default())
    }
}
