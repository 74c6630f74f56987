//! Account Handlers

use axum::{body::Bytes, extract::State, Json};
use validator::Validate;

use crate::application::dto::request::{LoginRequest, RegisterRequest};
use crate::application::dto::response::{RegisterResponse, TokenResponse};
use crate::application::services::AuthService;
use crate::presentation::http::extractors::typed_payload;
use crate::shared::error::AppError;
use crate::shared::validation::validation_error;
use crate::startup::AppState;

/// Register a new account
pub async fn register(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<RegisterResponse>, AppError> {
    let request: RegisterRequest = typed_payload(&body)?;
    request.validate().map_err(validation_error)?;

    let (user, tokens) = state
        .auth_service()
        .register(&request.username, &request.password, request.admin)
        .await?;

    Ok(Json(RegisterResponse {
        user: user.into(),
        token: tokens.into(),
    }))
}

/// Login with credentials
pub async fn login(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<TokenResponse>, AppError> {
    let request: LoginRequest = typed_payload(&body)?;
    request.validate().map_err(validation_error)?;

    let tokens = state
        .auth_service()
        .login(&request.username, &request.password)
        .await?;

    Ok(Json(TokenResponse::from(tokens)))
}
