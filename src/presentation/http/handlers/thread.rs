//! Thread Handlers

use axum::{
    body::Bytes,
    extract::{Query, State},
    Json,
};

use crate::application::dto::request::ThreadQueryParams;
use crate::application::dto::response::{ThreadPageResponse, ThreadResponse};
use crate::application::services::{QueryService, ThreadService};
use crate::infrastructure::metrics;
use crate::presentation::http::extractors::{write_payload, CurrentSession, RawId};
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Create a thread
pub async fn create_thread(
    State(state): State<AppState>,
    session: CurrentSession,
    body: Bytes,
) -> Result<Json<ThreadResponse>, AppError> {
    let payload = write_payload(session.user().is_some(), &body)?;

    let thread = state
        .thread_service()
        .create_thread(session.user(), &payload)
        .await?;
    metrics::record_thread_created();

    Ok(Json(thread.into()))
}

/// Get a thread with one page of its posts
pub async fn get_thread(
    State(state): State<AppState>,
    RawId(id): RawId,
    Query(params): Query<ThreadQueryParams>,
) -> Result<Json<ThreadPageResponse>, AppError> {
    let page = state
        .query_service()
        .get_thread(&id, params.last_id.as_deref())
        .await?;

    Ok(Json(page.into()))
}
