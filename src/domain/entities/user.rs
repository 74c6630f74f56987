//! User entity and repository trait.
//!
//! Maps to the `users` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// Represents a forum account.
///
/// Maps to the `users` table:
/// - id: BIGSERIAL PRIMARY KEY
/// - username: VARCHAR(32) NOT NULL UNIQUE
/// - password_hash: VARCHAR(255) NOT NULL
/// - admin: BOOLEAN NOT NULL DEFAULT FALSE
/// - created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Primary key
    pub id: i64,

    /// Username (1-32 characters, unique)
    pub username: String,

    /// Argon2 password hash
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Whether the account may manage categories
    pub admin: bool,

    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl User {
    /// The public projection embedded in threads and posts.
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            username: self.username.clone(),
        }
    }
}

/// The part of a user that other entities expose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: i64,
    pub username: String,
}

/// Insert payload for a new account.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    /// Asks for the admin flag. The store grants it only when no account
    /// exists yet, checked atomically with the insert.
    pub wants_admin: bool,
}

/// Repository trait for User data access operations.
///
/// Implementations of this trait handle the actual database interactions.
/// The trait is defined in the domain layer to maintain dependency inversion.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by ID.
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;

    /// Find a user by username (exact match).
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    /// Create a new user. `wants_admin` is honoured only for the first account.
    async fn create(&self, user: &NewUser) -> Result<User, AppError>;
}
