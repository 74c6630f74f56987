//! Application Services
//!
//! Business logic services that coordinate domain operations.
//!
//! ## Available Services
//!
//! - **AuthService**: Registration, login, access tokens
//! - **CategoryService**: Category creation and listing
//! - **ThreadService**: Thread creation
//! - **PostService**: Post and reply creation
//! - **QueryService**: Thread and post reads with expanded relations
//!
//! Write operations run in three stages: authorization, payload validation,
//! referential checks. A failing stage ends the operation, and every error
//! found within that stage is reported together.

pub mod auth_service;
pub mod category_service;
pub mod pagination;
pub mod post_service;
pub mod query_service;
pub mod resolver;
pub mod thread_service;

use serde_json::Value;

use crate::application::dto::request::SchemaPayload;
use crate::domain::RequestNotAuthorized;
use crate::shared::error::{AppError, RequestError};

// Re-export auth service types
pub use auth_service::{AuthError, AuthService, AuthServiceImpl, AuthTokens, Claims, TokenCodec};

// Re-export forum service types
pub use category_service::{CategoryService, CategoryServiceImpl};
pub use pagination::{Cursor, PostPaginator, PAGE_SIZE};
pub use post_service::{PostService, PostServiceImpl};
pub use query_service::{QueryService, QueryServiceImpl, ThreadPage};
pub use thread_service::{ThreadService, ThreadServiceImpl};

/// Forum service errors
#[derive(Debug, thiserror::Error)]
pub enum ForumError {
    #[error("Request not authorized")]
    NotAuthorized,

    #[error("Request rejected: {}", describe(.0))]
    Rejected(Vec<RequestError>),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

fn describe(errors: &[RequestError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<RequestNotAuthorized> for ForumError {
    fn from(_: RequestNotAuthorized) -> Self {
        ForumError::NotAuthorized
    }
}

impl From<AppError> for ForumError {
    fn from(e: AppError) -> Self {
        ForumError::Unavailable(e.to_string())
    }
}

impl From<ForumError> for AppError {
    fn from(e: ForumError) -> Self {
        match e {
            ForumError::NotAuthorized => AppError::Unauthorized("Request not authorized".into()),
            ForumError::Rejected(errors) => AppError::Rejected(errors),
            ForumError::Unavailable(msg) => AppError::Internal(msg),
        }
    }
}

/// Check a raw payload against its schema and deserialize it.
pub(crate) fn parse_payload<T: SchemaPayload>(payload: &Value) -> Result<T, ForumError> {
    T::SCHEMA.validate(payload).map_err(ForumError::Rejected)?;

    serde_json::from_value(payload.clone())
        .map_err(|e| ForumError::Rejected(vec![RequestError::invalid("body", e.to_string())]))
}
