//! Post Handlers

use axum::{body::Bytes, extract::State, Json};

use crate::application::dto::response::PostResponse;
use crate::application::services::{PostService, QueryService};
use crate::infrastructure::metrics;
use crate::presentation::http::extractors::{write_payload, CurrentSession, RawId};
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Create a post or a reply
pub async fn create_post(
    State(state): State<AppState>,
    session: CurrentSession,
    body: Bytes,
) -> Result<Json<PostResponse>, AppError> {
    let payload = write_payload(session.user().is_some(), &body)?;

    let post = state
        .post_service()
        .create_post(session.user(), &payload)
        .await?;
    metrics::record_post_created(post.view.post.is_reply());

    Ok(Json(post.into()))
}

/// Get a post with its thread and replies
pub async fn get_post(
    State(state): State<AppState>,
    RawId(id): RawId,
) -> Result<Json<PostResponse>, AppError> {
    let post = state.query_service().get_post(&id).await?;

    Ok(Json(post.into()))
}
