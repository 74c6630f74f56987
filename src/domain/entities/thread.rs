//! Thread entity and repository trait.
//!
//! Maps to the `threads` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Category, UserSummary};
use crate::shared::error::AppError;

/// A discussion thread inside a category.
///
/// Maps to the `threads` table:
/// - id: BIGSERIAL PRIMARY KEY
/// - name: TEXT NOT NULL
/// - slug: TEXT NOT NULL (not unique)
/// - category_id: BIGINT NOT NULL REFERENCES categories(id)
/// - user_id: BIGINT NOT NULL REFERENCES users(id)
/// - created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thread {
    /// Primary key
    pub id: i64,

    /// Display name, arbitrary Unicode
    pub name: String,

    /// URL-safe identifier derived from the name at creation
    pub slug: String,

    /// Owning category
    pub category_id: i64,

    /// Creator
    pub user_id: i64,

    pub created_at: DateTime<Utc>,
}

/// Insert payload for a new thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewThread {
    pub name: String,
    pub slug: String,
    pub category_id: i64,
    pub user_id: i64,
}

/// A thread together with its category and author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadDetail {
    pub thread: Thread,
    pub category: Category,
    pub author: UserSummary,
}

/// Repository trait for Thread data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ThreadRepository: Send + Sync {
    /// Find a thread by ID with its category and author joined in.
    async fn find_detail(&self, id: i64) -> Result<Option<ThreadDetail>, AppError>;

    /// Create a new thread.
    async fn create(&self, thread: &NewThread) -> Result<Thread, AppError>;
}
