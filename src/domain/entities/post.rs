//! Post entity and repository trait.
//!
//! Maps to the `posts` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ThreadDetail, UserSummary};
use crate::shared::error::AppError;

/// A post in a thread.
///
/// Maps to the `posts` table:
/// - id: BIGSERIAL PRIMARY KEY (creation order)
/// - content: TEXT NOT NULL (rendered HTML)
/// - thread_id: BIGINT NOT NULL REFERENCES threads(id)
/// - user_id: BIGINT NOT NULL REFERENCES users(id)
/// - replying_to_id: BIGINT NULL REFERENCES posts(id)
/// - created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Primary key, monotonic in creation order
    pub id: i64,

    /// Rendered HTML
    pub content: String,

    /// Owning thread
    pub thread_id: i64,

    /// Author
    pub user_id: i64,

    /// Post this one replies to (always in the same thread)
    pub replying_to_id: Option<i64>,

    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Check if this is a reply to another post.
    pub fn is_reply(&self) -> bool {
        self.replying_to_id.is_some()
    }
}

/// Insert payload for a new post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub content: String,
    pub thread_id: i64,
    pub user_id: i64,
    pub replying_to_id: Option<i64>,
}

/// A post with its author and the username of the post it replies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostView {
    pub post: Post,
    pub author: UserSummary,
    pub replying_to_username: Option<String>,
}

/// A post with everything the post endpoints expose: its thread (with
/// category) and its direct replies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDetail {
    pub view: PostView,
    pub thread: ThreadDetail,
    pub replies: Vec<PostView>,
}

/// Repository trait for Post data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Find a post by ID.
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, AppError>;

    /// Find a post by ID with its author and reply-target username.
    async fn find_view(&self, id: i64) -> Result<Option<PostView>, AppError>;

    /// Posts of a thread in ascending id order.
    ///
    /// - `after`: only posts with an id greater than this one
    /// - `limit`: maximum number of posts to return
    async fn find_page(
        &self,
        thread_id: i64,
        after: Option<i64>,
        limit: i64,
    ) -> Result<Vec<PostView>, AppError>;

    /// Direct replies to a post in ascending id order.
    async fn find_replies(&self, post_id: i64) -> Result<Vec<PostView>, AppError>;

    /// Create a new post.
    async fn create(&self, post: &NewPost) -> Result<Post, AppError>;
}
