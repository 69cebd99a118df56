//! Event model

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::category::{Category, EventCategory};
use super::form::FormFields;
use super::{Resource, ResourceKind};
use crate::utils::errors::Result;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub image_url: String,
    /// Registration form
    pub form_link: Option<String>,
    /// Chat group invite
    pub chat_link: Option<String>,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub venue: String,
    pub category: EventCategory,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    pub form_link: Option<String>,
    pub chat_link: Option<String>,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub venue: String,
    pub category: EventCategory,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct EventPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_link: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_link: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<NaiveTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<EventCategory>,
}

impl Resource for Event {
    type Category = EventCategory;
    type Draft = EventDraft;
    type Patch = EventPatch;

    const KIND: ResourceKind = ResourceKind::Event;
    const COLUMNS: &'static [&'static str] = &[
        "title",
        "description",
        "image_url",
        "form_link",
        "chat_link",
        "date",
        "time",
        "venue",
        "category",
    ];
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

    fn draft_from_form(form: &FormFields) -> Result<EventDraft> {
        Ok(EventDraft {
            title: form.required("title", "Title")?,
            description: form.optional("description").unwrap_or_default(),
            form_link: form.optional_link("form_link", "Registration form link")?,
            chat_link: form.optional_link("chat_link", "Chat group link")?,
            date: form.required_date("date", "Date")?,
            time: form.required_time("time", "Time")?,
            venue: form.required("venue", "Venue")?,
            category: form.required_category("category")?,
        })
    }

    fn patch_from_form(form: &FormFields) -> Result<EventPatch> {
        let draft = Self::draft_from_form(form)?;
        Ok(EventPatch {
            title: Some(draft.title),
            description: Some(draft.description),
            image_url: None,
            form_link: Some(draft.form_link),
            chat_link: Some(draft.chat_link),
            date: Some(draft.date),
            time: Some(draft.time),
            venue: Some(draft.venue),
            category: Some(draft.category),
        })
    }

    fn image_patch(patch: EventPatch, image_url: String) -> EventPatch {
        EventPatch {
            image_url: Some(image_url),
            ..patch
        }
    }

    fn to_form(&self) -> FormFields {
        FormFields::new()
            .with("title", &self.title)
            .with("description", &self.description)
            .with("form_link", self.form_link.as_deref().unwrap_or_default())
            .with("chat_link", self.chat_link.as_deref().unwrap_or_default())
            .with("date", &self.date.format("%Y-%m-%d").to_string())
            .with("time", &self.time.format("%H:%M").to_string())
            .with("venue", &self.venue)
            .with("category", self.category.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::errors::TechClubError;
    use assert_matches::assert_matches;

    fn event_form() -> FormFields {
        FormFields::new()
            .with("title", "Hack Night")
            .with("description", "Overnight build sprint")
            .with("form_link", "https://forms.example.com/hack")
            .with("date", "2025-03-01")
            .with("time", "20:00")
            .with("venue", "Lab 3")
            .with("category", "TECHNOVA")
    }

    #[test]
    fn test_draft_from_form() {
        let draft = Event::draft_from_form(&event_form()).unwrap();
        assert_eq!(draft.title, "Hack Night");
        assert_eq!(draft.category, EventCategory::Technova);
        assert_eq!(draft.chat_link, None);
    }

    #[test]
    fn test_missing_title_rejected() {
        let form = event_form().with("title", "");
        assert_matches!(Event::draft_from_form(&form), Err(TechClubError::Validation(_)));
    }

    #[test]
    fn test_patch_skips_image_and_clears_links() {
        let patch = Event::patch_from_form(&event_form()).unwrap();
        let json = serde_json::to_value(&patch).unwrap();
        assert!(json.get("image_url").is_none());
        assert_eq!(json["chat_link"], serde_json::Value::Null);
        assert_eq!(json["category"], "TECHNOVA");

        let patch = Event::image_patch(patch, "https://cdn/x.png".to_string());
        assert_eq!(patch.image_url.as_deref(), Some("https://cdn/x.png"));
    }

    #[test]
    fn test_order_newest_first() {
        let older = Event {
            id: Uuid::new_v4(),
            title: "Old".into(),
            description: String::new(),
            image_url: "u".into(),
            form_link: None,
            chat_link: None,
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            venue: "Hall".into(),
            category: EventCategory::Technova,
            created_at: Utc::now() - chrono::Duration::days(1),
        };
        let newer = Event { id: Uuid::new_v4(), title: "New".into(), created_at: Utc::now(), ..older.clone() };
        assert_eq!(Event::compare(&newer, &older), Ordering::Less);
    }

    #[test]
    fn test_to_form_roundtrip() {
        let draft = Event::draft_from_form(&event_form()).unwrap();
        let event = Event {
            id: Uuid::new_v4(),
            title: draft.title,
            description: draft.description,
            image_url: "u".into(),
            form_link: draft.form_link,
            chat_link: draft.chat_link,
            date: draft.date,
            time: draft.time,
            venue: draft.venue,
            category: draft.category,
            created_at: Utc::now(),
        };
        let form = event.to_form();
        assert_eq!(form.raw("time"), "20:00");
        assert!(Event::draft_from_form(&form).is_ok());
    }
}
