//! Data models module
//!
//! This module contains all data structures used throughout the application.
//! Every content type shown on the site implements [`Resource`], which carries
//! the table, bucket, ordering and form mapping the generic CRUD code needs.

pub mod category;
pub mod event;
pub mod form;
pub mod gallery;
pub mod team;

use std::cmp::Ordering;
use std::fmt::Debug;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::FromRow;
use uuid::Uuid;

use crate::utils::errors::Result;

// Re-export commonly used models
pub use category::{Category, EventCategory, TeamCategory};
pub use event::{Event, EventDraft, EventPatch};
pub use form::FormFields;
pub use gallery::{GalleryImage, GalleryImageDraft, GalleryImagePatch};
pub use team::{TeamMember, TeamMemberDraft, TeamMemberPatch};

/// The three content types managed through the admin panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Event,
    TeamMember,
    GalleryImage,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] = [
        ResourceKind::Event,
        ResourceKind::TeamMember,
        ResourceKind::GalleryImage,
    ];

    /// Database table holding the records
    pub fn table(&self) -> &'static str {
        match self {
            ResourceKind::Event => "events",
            ResourceKind::TeamMember => "team_members",
            ResourceKind::GalleryImage => "gallery_images",
        }
    }

    /// Bucket holding the images of this kind
    pub fn bucket(&self) -> Bucket {
        match self {
            ResourceKind::Event => Bucket::EventImages,
            ResourceKind::TeamMember => Bucket::TeamMemberImages,
            ResourceKind::GalleryImage => Bucket::GalleryImages,
        }
    }

    /// Path segment used in URLs (`/events`, `/admin/team`, ...)
    pub fn slug(&self) -> &'static str {
        match self {
            ResourceKind::Event => "events",
            ResourceKind::TeamMember => "team",
            ResourceKind::GalleryImage => "gallery",
        }
    }

    /// Human readable singular name
    pub fn label(&self) -> &'static str {
        match self {
            ResourceKind::Event => "Event",
            ResourceKind::TeamMember => "Team member",
            ResourceKind::GalleryImage => "Gallery image",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.slug() == slug)
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

/// Object storage buckets, one per resource kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bucket {
    #[serde(rename = "event-images")]
    EventImages,
    #[serde(rename = "team-member-images")]
    TeamMemberImages,
    #[serde(rename = "gallery-images")]
    GalleryImages,
}

impl Bucket {
    pub const ALL: [Bucket; 3] = [
        Bucket::EventImages,
        Bucket::TeamMemberImages,
        Bucket::GalleryImages,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Bucket::EventImages => "event-images",
            Bucket::TeamMemberImages => "team-member-images",
            Bucket::GalleryImages => "gallery-images",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|bucket| bucket.name() == name)
    }
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A flat record type managed by the admin panel
///
/// Drafts and patches serialize with the same field names as the record, so
/// stores can build and merge rows generically from their JSON form. Patch
/// fields left as `None` are skipped and keep their stored value.
pub trait Resource:
    Serialize + DeserializeOwned + Clone + Debug + Send + Sync + Unpin + for<'r> FromRow<'r, PgRow> + 'static
{
    type Category: Category;
    type Draft: Serialize + Clone + Debug + Send + Sync;
    type Patch: Serialize + Clone + Debug + Default + Send + Sync;

    const KIND: ResourceKind;

    /// Writable columns, `image_url` included
    const COLUMNS: &'static [&'static str];

    /// SQL ordering, must agree with [`Resource::compare`]
    const ORDER_BY: &'static str;

    fn id(&self) -> Uuid;
    fn category(&self) -> Self::Category;
    fn image_url(&self) -> &str;
    /// Title or name shown in lists and notifications
    fn display_name(&self) -> &str;

    /// Canonical list order
    fn compare(a: &Self, b: &Self) -> Ordering;

    /// Build a validated insert draft from submitted form fields
    fn draft_from_form(form: &FormFields) -> Result<Self::Draft>;

    /// Build a validated full-overwrite patch from submitted form fields
    fn patch_from_form(form: &FormFields) -> Result<Self::Patch>;

    /// Patch that only replaces the image reference
    fn image_patch(patch: Self::Patch, image_url: String) -> Self::Patch;

    /// Form fields describing this record, used to bind an edit draft
    fn to_form(&self) -> FormFields;
}
