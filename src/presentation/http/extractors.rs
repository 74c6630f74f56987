//! Custom Extractors
//!
//! Axum extractors for authentication and request parsing.

use axum::{
    body::Bytes,
    extract::{FromRequestParts, Path},
    http::request::Parts,
    RequestPartsExt,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::application::services::{AuthError, AuthService};
use crate::domain::SessionUser;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// The caller's session, if the request carries a valid bearer token for an
/// existing account.
///
/// A missing, malformed or expired token, or one whose account is gone, is an
/// anonymous request and the authorization gate decides what that means.
/// Only a store failure rejects.
#[derive(Debug, Clone)]
pub struct CurrentSession(pub Option<SessionUser>);

impl CurrentSession {
    pub fn user(&self) -> Option<&SessionUser> {
        self.0.as_ref()
    }
}

impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Ok(TypedHeader(Authorization(bearer))) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
        else {
            return Ok(Self(None));
        };

        match state.auth_service().authenticate(bearer.token()).await {
            Ok(session) => Ok(Self(Some(session))),
            Err(AuthError::Internal(msg)) => Err(AppError::Internal(msg)),
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring unusable bearer token");
                Ok(Self(None))
            }
        }
    }
}

/// Raw path id. Kept as text so a non-numeric id can be reported the same way
/// as an unknown one.
#[derive(Debug, Clone)]
pub struct RawId(pub String);

impl<S: Send + Sync> FromRequestParts<S> for RawId {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        Ok(Self(id))
    }
}

/// Parse a request body into a JSON value for schema validation.
///
/// An empty body is an empty object, so a bare request reports every
/// required field as missing.
pub fn json_payload(body: &Bytes) -> Result<Value, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Default::default()));
    }

    serde_json::from_slice(body).map_err(|e| AppError::BadRequest(format!("Malformed JSON body: {}", e)))
}

/// Parse the body of a write that goes through the authorization gate.
///
/// A caller the gate would turn away gets 401 even when the body is
/// malformed, so anonymous requests never learn anything about validation.
pub fn write_payload(authorized: bool, body: &Bytes) -> Result<Value, AppError> {
    json_payload(body).map_err(|e| {
        if authorized {
            e
        } else {
            AppError::Unauthorized("Request not authorized".into())
        }
    })
}

/// Parse a request body straight into a typed request.
pub fn typed_payload<T: DeserializeOwned>(body: &Bytes) -> Result<T, AppError> {
    serde_json::from_value(json_payload(body)?)
        .map_err(|e| AppError::BadRequest(format!("Invalid request body: {}", e)))
}
