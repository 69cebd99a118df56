//! Public page handlers

use axum::extract::{Query, State};
use axum::response::Html;
use tracing::debug;

use super::{CategoryQuery, Managed};
use crate::state::AppContext;
use crate::utils::errors::Result;
use crate::utils::helpers::escape_html;
use crate::views::home::render_home;
use crate::views::{render_filtered_list, render_list, render_page, ListState, Nav};

/// Events shown on the landing page
const RECENT_EVENTS: usize = 3;

pub async fn home(State(ctx): State<AppContext>) -> Result<Html<String>> {
    let mut events = ctx.database.events.list(None).await?;
    events.truncate(RECENT_EVENTS);
    Ok(Html(render_page("Home", Nav::Home, &render_home(&events))))
}

/// Full page with filter chips and the list region
pub async fn page<R: Managed>(
    State(ctx): State<AppContext>,
    Query(query): Query<CategoryQuery>,
) -> Result<Html<String>> {
    let selected = query.filter::<R::Category>()?;
    let records = R::repository(&ctx.database).list(selected).await?;
    debug!(kind = %R::KIND, count = records.len(), "Rendering list page");

    let state = ListState::from_records(records);
    let body = format!(
        "<h1>{}</h1>\n{}",
        escape_html(R::TITLE),
        render_filtered_list(&format!("/{}", R::KIND.slug()), selected, &state, R::EMPTY_MESSAGE)
    );
    Ok(Html(render_page(R::TITLE, Nav::Section(R::KIND), &body)))
}

/// Only the list region, fetched when a filter changes
pub async fn fragment<R: Managed>(
    State(ctx): State<AppContext>,
    Query(query): Query<CategoryQuery>,
) -> Result<Html<String>> {
    let selected = query.filter::<R::Category>()?;
    let records = R::repository(&ctx.database).list(selected).await?;
    Ok(Html(render_list(&ListState::from_records(records), R::EMPTY_MESSAGE)))
}
