//! Category Handlers

use axum::{body::Bytes, extract::State, Json};

use crate::application::dto::response::{CategoryListResponse, CategoryResponse};
use crate::application::services::CategoryService;
use crate::domain::AuthorizationGate;
use crate::presentation::http::extractors::{write_payload, CurrentSession};
use crate::shared::error::AppError;
use crate::startup::AppState;

/// List all categories
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<CategoryListResponse>, AppError> {
    let categories = state.category_service().list_categories().await?;

    Ok(Json(CategoryListResponse {
        categories: categories.into_iter().map(Into::into).collect(),
    }))
}

/// Create a category (administrators only)
pub async fn create_category(
    State(state): State<AppState>,
    session: CurrentSession,
    body: Bytes,
) -> Result<Json<CategoryResponse>, AppError> {
    let authorized = AuthorizationGate::authorize_admin(session.user()).is_ok();
    let payload = write_payload(authorized, &body)?;

    let category = state
        .category_service()
        .create_category(session.user(), &payload)
        .await?;

    Ok(Json(category.into()))
}
