//! HTTP handlers module
//!
//! This module contains all request handlers organized by audience:
//! - Public pages and list fragments
//! - Admin panel pages and record mutations (behind the route guard)
//! - Sign-in and sign-out
//! - JSON API, health check and locally served media
//!
//! Routes for each resource are registered generically from [`Managed`].

pub mod admin;
pub mod api;
pub mod public;
pub mod session;
pub mod system;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use crate::database::{DatabaseService, ResourceRepository};
use crate::middleware::log_requests;
use crate::models::{Category, Event, GalleryImage, TeamMember};
use crate::state::AppContext;
use crate::utils::errors::{Result, TechClubError};
use crate::views::Card;

/// Multipart overhead allowed on top of the image size limit
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

/// A resource with public pages and an admin tab
pub trait Managed: Card {
    /// Page heading and title
    const TITLE: &'static str;
    /// Shown when a list has no records
    const EMPTY_MESSAGE: &'static str;

    fn repository(database: &DatabaseService) -> &ResourceRepository<Self>;
}

impl Managed for Event {
    const TITLE: &'static str = "Events";
    const EMPTY_MESSAGE: &'static str = "No events found";

    fn repository(database: &DatabaseService) -> &ResourceRepository<Self> {
        &database.events
    }
}

impl Managed for TeamMember {
    const TITLE: &'static str = "Our Team";
    const EMPTY_MESSAGE: &'static str = "No team members found";

    fn repository(database: &DatabaseService) -> &ResourceRepository<Self> {
        &database.team
    }
}

impl Managed for GalleryImage {
    const TITLE: &'static str = "Gallery";
    const EMPTY_MESSAGE: &'static str = "No photos found";

    fn repository(database: &DatabaseService) -> &ResourceRepository<Self> {
        &database.gallery
    }
}

/// `?category=` query parameter
#[derive(Debug, Default, Deserialize)]
pub struct CategoryQuery {
    pub category: Option<String>,
}

impl CategoryQuery {
    /// Parsed filter; blank means no filter, unknown values are rejected
    pub fn filter<C: Category>(&self) -> Result<Option<C>> {
        match self.category.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
            None => Ok(None),
            Some(value) => C::parse(value)
                .map(Some)
                .ok_or_else(|| TechClubError::Validation(format!("Unknown category: {}", value))),
        }
    }
}

fn resource_routes<R: Managed>() -> Router<AppContext> {
    let slug = R::KIND.slug();
    Router::new()
        .route(&format!("/{}", slug), get(public::page::<R>))
        .route(&format!("/{}/list", slug), get(public::fragment::<R>))
        .route(&format!("/api/{}", slug), get(api::list::<R>))
        .route(&format!("/admin/{}", slug), post(admin::submit::<R>))
        .route(&format!("/admin/{}/cancel", slug), post(admin::cancel::<R>))
        .route(&format!("/admin/{}/:id/edit", slug), get(admin::edit::<R>))
        .route(&format!("/admin/{}/:id/delete", slug), post(admin::delete::<R>))
}

/// Build the application router
pub fn router(ctx: AppContext) -> Router {
    let body_limit = ctx.settings.storage.max_upload_bytes + FORM_OVERHEAD_BYTES;

    Router::new()
        .route("/", get(public::home))
        .route("/login", get(session::login_page).post(session::login))
        .route("/logout", post(session::logout))
        .route("/admin", get(admin::dashboard))
        .route("/health", get(system::health))
        .route("/media/:bucket/:key", get(system::media))
        .merge(resource_routes::<Event>())
        .merge(resource_routes::<TeamMember>())
        .merge(resource_routes::<GalleryImage>())
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(axum::middleware::from_fn(log_requests))
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}
