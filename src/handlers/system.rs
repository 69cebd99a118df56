//! Health check and media handlers

use axum::extract::{Path, State};
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::warn;

use crate::models::Bucket;
use crate::services::ServiceHealthStatus;
use crate::state::AppContext;
use crate::utils::errors::Result;

pub async fn health(State(ctx): State<AppContext>) -> Response {
    let database = ctx.database.health_check().await;
    let sessions = ctx.auth.health_check().await;
    if let Err(e) = &database {
        warn!(error = %e, "Database health check failed");
    }
    if let Err(e) = &sessions {
        warn!(error = %e, "Session store health check failed");
    }

    let status = ServiceHealthStatus {
        database_healthy: database.is_ok(),
        sessions_healthy: sessions.is_ok(),
    };
    let code = if status.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let body = json!({
        "status": if status.is_healthy() { "ok" } else { "degraded" },
        "version": crate::VERSION,
        "services": &status,
        "issues": status.get_issues(),
    });
    (code, Json(body)).into_response()
}

/// Objects of the local and in-process stores
pub async fn media(
    State(ctx): State<AppContext>,
    Path((bucket, key)): Path<(String, String)>,
) -> Result<Response> {
    let Some(bucket) = Bucket::from_name(&bucket) else {
        return Ok(StatusCode::NOT_FOUND.into_response());
    };

    match ctx.media.store().fetch(bucket, &key).await {
        Ok(Some(object)) => Ok((
            [
                (CONTENT_TYPE, object.content_type),
                (CACHE_CONTROL, "public, max-age=86400".to_string()),
            ],
            object.bytes,
        )
            .into_response()),
        Ok(None) => Ok(StatusCode::NOT_FOUND.into_response()),
        // Keys that could never have been issued
        Err(crate::utils::errors::UploadError::Rejected { status: 400, .. }) => {
            Ok(StatusCode::NOT_FOUND.into_response())
        }
        Err(e) => Err(e.into()),
    }
}
