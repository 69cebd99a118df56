//! Application and admin session context
//!
//! [`AppContext`] is the shared application state handed to every handler.
//! [`Session`] is the per-admin record kept in the session store: it is
//! created at sign-in, carries form drafts and pending notifications between
//! requests, and is deleted at sign-out.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::Settings;
use crate::database::DatabaseService;
use crate::models::{FormFields, ResourceKind};
use crate::services::{AuthService, MediaUploadService};
use crate::utils::helpers::generate_random_string;

/// Application-wide context containing services and settings
#[derive(Clone)]
pub struct AppContext {
    pub settings: Arc<Settings>,
    pub database: DatabaseService,
    pub media: MediaUploadService,
    pub auth: AuthService,
}

impl AppContext {
    pub fn new(
        settings: Settings,
        database: DatabaseService,
        media: MediaUploadService,
        auth: AuthService,
    ) -> Self {
        Self {
            settings: Arc::new(settings),
            database,
            media,
            auth,
        }
    }

    /// Name of the session cookie
    pub fn session_cookie(&self) -> &str {
        &self.settings.auth.session_cookie
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Error,
}

/// Transient message shown once on the next admin page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }
}

/// Raw field values of a form in progress, bound to a record in edit mode
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormDraft {
    pub id: Option<Uuid>,
    pub fields: FormFields,
}

impl FormDraft {
    pub fn for_create(fields: FormFields) -> Self {
        Self { id: None, fields }
    }

    pub fn for_edit(id: Uuid, fields: FormFields) -> Self {
        Self { id: Some(id), fields }
    }

    pub fn is_edit(&self) -> bool {
        self.id.is_some()
    }
}

/// Signed-in admin session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    #[serde(default)]
    pub drafts: HashMap<ResourceKind, FormDraft>,
    #[serde(default)]
    pub notifications: Vec<Notification>,
}

impl Session {
    pub const TOKEN_LENGTH: usize = 48;

    pub fn new(email: &str, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            token: generate_random_string(Self::TOKEN_LENGTH),
            email: email.to_string(),
            created_at: now,
            expires_at: now + ttl,
            drafts: HashMap::new(),
            notifications: Vec::new(),
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    /// Seconds until expiry, never negative
    pub fn remaining_seconds(&self) -> u64 {
        (self.expires_at - Utc::now()).num_seconds().max(0) as u64
    }

    pub fn draft(&self, kind: ResourceKind) -> Option<&FormDraft> {
        self.drafts.get(&kind)
    }

    pub fn set_draft(&mut self, kind: ResourceKind, draft: FormDraft) {
        self.drafts.insert(kind, draft);
    }

    pub fn clear_draft(&mut self, kind: ResourceKind) -> Option<FormDraft> {
        self.drafts.remove(&kind)
    }

    pub fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    /// Drain pending notifications for display
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }
}
