//! Category entity and repository trait.
//!
//! Maps to the `categories` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// A named group of threads.
///
/// Maps to the `categories` table:
/// - id: BIGSERIAL PRIMARY KEY
/// - name: TEXT NOT NULL UNIQUE
/// - created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Repository trait for Category data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Find a category by its exact name.
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, AppError>;

    /// All categories ordered by name.
    async fn list(&self) -> Result<Vec<Category>, AppError>;

    /// Create a new category.
    async fn create(&self, name: &str) -> Result<Category, AppError>;
}
