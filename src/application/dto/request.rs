//! Request DTOs
//!
//! Data structures for API request bodies.
//!
//! Forum write payloads are checked against a declarative [`Schema`] before
//! they are deserialized, so callers see every missing or mistyped field in one
//! response. Account payloads use `validator` derives.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use validator::Validate;

use crate::shared::validation::{FieldSpec, ParamType, Schema};

/// A request body described by a payload schema.
pub trait SchemaPayload: DeserializeOwned {
    const SCHEMA: Schema;
}

/// Create thread request
#[derive(Debug, Clone, Deserialize)]
pub struct CreateThreadRequest {
    pub name: String,
    pub category: String,
}

impl SchemaPayload for CreateThreadRequest {
    const SCHEMA: Schema = Schema::new(&[
        FieldSpec::required("name", ParamType::String),
        FieldSpec::required("category", ParamType::String),
    ]);
}

/// Create post request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub content: String,
    pub thread_id: i64,
    #[serde(default)]
    pub replying_to_id: Option<i64>,
}

impl SchemaPayload for CreatePostRequest {
    const SCHEMA: Schema = Schema::new(&[
        FieldSpec::required("content", ParamType::String),
        FieldSpec::required("threadId", ParamType::Integer),
        FieldSpec::optional("replyingToId", ParamType::Integer),
    ]);
}

/// Create category request
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
}

impl SchemaPayload for CreateCategoryRequest {
    const SCHEMA: Schema = Schema::new(&[FieldSpec::required("name", ParamType::String)]);
}

/// Registration request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 32, message = "Username must be 1-32 characters"))]
    pub username: String,

    #[validate(length(min = 6, max = 128, message = "Password must be 6-128 characters"))]
    pub password: String,

    #[serde(default)]
    pub admin: bool,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Thread page query parameters
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadQueryParams {
    pub last_id: Option<String>,
}
