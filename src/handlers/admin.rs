//! Admin panel handlers
//!
//! Every handler takes an [`AdminSession`], so the route guard runs before
//! anything else. Mutations end with a redirect back to the resource's tab,
//! which re-fetches the list; their outcome travels as a notification in the
//! session.

use axum::extract::{Multipart, Path, Query, State};
use axum::response::{Html, Redirect};
use serde::Deserialize;
use tracing::{debug, warn};
use uuid::Uuid;

use super::{CategoryQuery, Managed};
use crate::middleware::AdminSession;
use crate::models::{Event, FormFields, GalleryImage, ResourceKind, TeamMember};
use crate::services::UploadedFile;
use crate::state::{AppContext, Notification, RecordForm, Session};
use crate::utils::errors::Result;
use crate::utils::logging::log_admin_action;
use crate::views::{render_page, AdminView, Nav};

/// Name of the file input on every record form
const IMAGE_FIELD: &str = "image";

#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub tab: Option<String>,
    pub category: Option<String>,
}

fn tab_redirect(kind: ResourceKind) -> Redirect {
    Redirect::to(&format!("/admin?tab={}", kind.slug()))
}

async fn render_tab<R: Managed>(
    ctx: &AppContext,
    session: &Session,
    notifications: &[Notification],
    category: Option<String>,
) -> Result<String> {
    let selected = CategoryQuery { category }.filter::<R::Category>()?;
    let records = R::repository(&ctx.database).list(selected).await?;
    let view = AdminView::<R> {
        email: &session.email,
        records: &records,
        selected,
        draft: session.draft(R::KIND),
        notifications,
    };
    Ok(view.render())
}

pub async fn dashboard(
    State(ctx): State<AppContext>,
    AdminSession(mut session): AdminSession,
    Query(query): Query<DashboardQuery>,
) -> Result<Html<String>> {
    let kind = query
        .tab
        .as_deref()
        .and_then(ResourceKind::from_slug)
        .unwrap_or(ResourceKind::Event);
    let notifications = session.take_notifications();

    let body = match kind {
        ResourceKind::Event => render_tab::<Event>(&ctx, &session, &notifications, query.category).await?,
        ResourceKind::TeamMember => render_tab::<TeamMember>(&ctx, &session, &notifications, query.category).await?,
        ResourceKind::GalleryImage => {
            render_tab::<GalleryImage>(&ctx, &session, &notifications, query.category).await?
        }
    };

    // Notifications are shown once
    if !notifications.is_empty() {
        ctx.auth.save_session(&session).await?;
    }
    Ok(Html(render_page("Admin", Nav::Admin, &body)))
}

async fn read_submission(multipart: &mut Multipart) -> Result<(FormFields, Option<UploadedFile>)> {
    let mut fields = FormFields::new();
    let mut file = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        if name == IMAGE_FIELD {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let content_type = field.content_type().map(str::to_string);
            let bytes = field.bytes().await?;
            file = Some(UploadedFile {
                file_name,
                content_type,
                bytes,
            });
        } else if !name.is_empty() {
            let value = field.text().await?;
            fields.insert(name, value);
        }
    }

    Ok((fields, file))
}

/// Create or update, depending on whether the draft is bound to a record
pub async fn submit<R: Managed>(
    State(ctx): State<AppContext>,
    AdminSession(mut session): AdminSession,
    mut multipart: Multipart,
) -> Result<Redirect> {
    match read_submission(&mut multipart).await {
        Ok((fields, file)) => {
            let form = RecordForm::new(R::repository(&ctx.database), &ctx.media);
            let outcome = form.submit(&mut session, fields, file).await;
            debug!(kind = %R::KIND, saved = outcome.is_saved(), "Form submitted");
        }
        Err(e) => {
            warn!(kind = %R::KIND, error = %e, "Unreadable form submission");
            session.notify(Notification::error(e.user_message()));
        }
    }

    ctx.auth.save_session(&session).await?;
    Ok(tab_redirect(R::KIND))
}

/// Bind a record into the form for editing
pub async fn edit<R: Managed>(
    State(ctx): State<AppContext>,
    AdminSession(mut session): AdminSession,
    Path(id): Path<Uuid>,
) -> Result<Redirect> {
    let form = RecordForm::new(R::repository(&ctx.database), &ctx.media);
    if let Err(e) = form.begin_edit(&mut session, id).await {
        session.notify(Notification::error(e.user_message()));
    }

    ctx.auth.save_session(&session).await?;
    Ok(tab_redirect(R::KIND))
}

pub async fn cancel<R: Managed>(
    State(ctx): State<AppContext>,
    AdminSession(mut session): AdminSession,
) -> Result<Redirect> {
    RecordForm::new(R::repository(&ctx.database), &ctx.media).cancel(&mut session);
    ctx.auth.save_session(&session).await?;
    Ok(tab_redirect(R::KIND))
}

pub async fn delete<R: Managed>(
    State(ctx): State<AppContext>,
    AdminSession(mut session): AdminSession,
    Path(id): Path<Uuid>,
) -> Result<Redirect> {
    match R::repository(&ctx.database).delete(id).await {
        Ok(record) => {
            log_admin_action(&session.email, "deleted", Some(R::KIND.slug()), Some(&id.to_string()));
            // A deleted record can no longer be edited
            if session.draft(R::KIND).and_then(|d| d.id) == Some(id) {
                session.clear_draft(R::KIND);
            }
            session.notify(Notification::success(format!(
                "{} \"{}\" deleted",
                R::KIND.label(),
                record.display_name()
            )));
        }
        Err(e) => session.notify(Notification::error(e.user_message())),
    }

    ctx.auth.save_session(&session).await?;
    Ok(tab_redirect(R::KIND))
}
