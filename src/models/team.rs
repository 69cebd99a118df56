//! Team member model

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::category::{Category, TeamCategory};
use super::form::FormFields;
use super::{Resource, ResourceKind};
use crate::utils::errors::Result;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TeamMember {
    pub id: Uuid,
    pub name: String,
    pub role: String,
    pub category: TeamCategory,
    pub image_url: String,
    pub description: Option<String>,
    pub linkedin_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamMemberDraft {
    pub name: String,
    pub role: String,
    pub category: TeamCategory,
    pub description: Option<String>,
    pub linkedin_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TeamMemberPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<TeamCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<Option<String>>,
}

impl Resource for TeamMember {
    type Category = TeamCategory;
    type Draft = TeamMemberDraft;
    type Patch = TeamMemberPatch;

    const KIND: ResourceKind = ResourceKind::TeamMember;
    const COLUMNS: &'static [&'static str] = &[
        "name",
        "role",
        "category",
        "image_url",
        "description",
        "linkedin_url",
    ];
    /// Byte order of the lower-cased name, whatever the database locale
    const ORDER_BY: &'static str = "LOWER(name) COLLATE \"C\" ASC, id ASC";

    fn id(&self) -> Uuid {
        self.id
    }

    fn category(&self) -> TeamCategory {
        self.category
    }

    fn image_url(&self) -> &str {
        &self.image_url
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn compare(a: &Self, b: &Self) -> Ordering {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.id.cmp(&b.id))
    }

    fn draft_from_form(form: &FormFields) -> Result<TeamMemberDraft> {
        Ok(TeamMemberDraft {
            name: form.required("name", "Name")?,
            role: form.required("role", "Role")?,
            category: form.required_category("category")?,
            description: form.optional("description"),
            linkedin_url: form.optional_link("linkedin_url", "LinkedIn profile")?,
        })
    }

    fn patch_from_form(form: &FormFields) -> Result<TeamMemberPatch> {
        let draft = Self::draft_from_form(form)?;
        Ok(TeamMemberPatch {
            name: Some(draft.name),
            role: Some(draft.role),
            category: Some(draft.category),
            image_url: None,
            description: Some(draft.description),
            linkedin_url: Some(draft.linkedin_url),
        })
    }

    fn image_patch(patch: TeamMemberPatch, image_url: String) -> TeamMemberPatch {
        TeamMemberPatch {
            image_url: Some(image_url),
            ..patch
        }
    }

    fn to_form(&self) -> FormFields {
        FormFields::new()
            .with("name", &self.name)
            .with("role", &self.role)
            .with("category", self.category.as_str())
            .with("description", self.description.as_deref().unwrap_or_default())
            .with("linkedin_url", self.linkedin_url.as_deref().unwrap_or_default())
    }
}
