//! Validation Utilities
//!
//! Two kinds of request checking live here:
//! - declarative payload schemas for the forum write operations, which report
//!   every missing or mistyped field at once;
//! - conversion of `validator` derive errors for the account endpoints.

use serde_json::Value;
use validator::ValidationErrors;

use super::error::{AppError, RequestError};

/// Primitive type expected for a payload field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    String,
    Integer,
}

impl ParamType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
        }
    }

    /// Check whether a JSON value is of this type.
    ///
    /// Integers must be JSON numbers that fit an `i64`; numeric-looking
    /// strings are rejected.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Integer => value.as_i64().is_some(),
        }
    }
}

impl std::fmt::Display for ParamType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One field of a payload schema.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: ParamType,
    pub required: bool,
}

impl FieldSpec {
    pub const fn required(name: &'static str, kind: ParamType) -> Self {
        Self {
            name,
            kind,
            required: true,
        }
    }

    pub const fn optional(name: &'static str, kind: ParamType) -> Self {
        Self {
            name,
            kind,
            required: false,
        }
    }
}

/// Declarative payload schema for a single operation.
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    pub fields: &'static [FieldSpec],
}

impl Schema {
    pub const fn new(fields: &'static [FieldSpec]) -> Self {
        Self { fields }
    }

    /// Check a payload against this schema.
    ///
    /// All fields are checked independently and every violation is returned,
    /// in schema order. A payload that is not a JSON object is checked as an
    /// empty object. `null` counts as absent.
    pub fn validate(&self, payload: &Value) -> Result<(), Vec<RequestError>> {
        let object = payload.as_object();

        let errors: Vec<RequestError> = self
            .fields
            .iter()
            .filter_map(|spec| {
                let value = object
                    .and_then(|map| map.get(spec.name))
                    .filter(|v| !v.is_null());

                match value {
                    None if spec.required => Some(RequestError::missing(spec.name)),
                    None => None,
                    Some(v) if !spec.kind.matches(v) => {
                        Some(RequestError::invalid_type(spec.name, spec.kind))
                    }
                    Some(_) => None,
                }
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Convert validation errors to AppError
pub fn validation_error(errors: ValidationErrors) -> AppError {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let message = e.message.clone().map(|m| m.to_string()).unwrap_or_default();
                format!("{}: {}", field, message)
            })
        })
        .collect();
    messages.sort();

    let message = messages
        .into_iter()
        .next()
        .unwrap_or_else(|| "Validation failed".into());

    AppError::Validation(message)
}
