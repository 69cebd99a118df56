//! JSON API handlers

use axum::extract::{Query, State};
use axum::Json;

use super::{CategoryQuery, Managed};
use crate::state::AppContext;
use crate::utils::errors::Result;

/// Records of one resource in canonical order
pub async fn list<R: Managed>(
    State(ctx): State<AppContext>,
    Query(query): Query<CategoryQuery>,
) -> Result<Json<Vec<R>>> {
    let selected = query.filter::<R::Category>()?;
    Ok(Json(R::repository(&ctx.database).list(selected).await?))
}
