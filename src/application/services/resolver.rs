//! Entity Resolver
//!
//! Looks up entities referenced by a request. A missing entity is a
//! caller error ([`RequestError`]) and is returned in the inner `Result` so
//! the caller can collect several of them; store failures use the outer one.

use crate::domain::{
    Category, CategoryRepository, PostRepository, PostView, ThreadDetail, ThreadRepository,
};
use crate::shared::error::RequestError;

use super::ForumError;

pub const THREAD_NOT_FOUND: &str = "thread does not exist";
pub const POST_NOT_FOUND: &str = "post does not exist";
pub const REPLY_IN_OTHER_THREAD: &str = "replies must be in same thread";

/// Outcome of a lookup: the entity, or the error to report for `field`.
pub type Resolved<T> = Result<T, RequestError>;

/// Parse an id taken from a path or query string.
///
/// Anything that is not a plain integer yields `None` and is then reported
/// the same way as an id that does not exist.
pub fn parse_id(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

/// Resolve a category by its exact name.
pub async fn category_by_name(
    repo: &dyn CategoryRepository,
    name: &str,
) -> Result<Resolved<Category>, ForumError> {
    Ok(repo
        .find_by_name(name)
        .await?
        .ok_or(RequestError::InvalidCategory))
}

/// Resolve a thread (with category and author) by id.
pub async fn thread_by_id(
    repo: &dyn ThreadRepository,
    field: &str,
    id: i64,
) -> Result<Resolved<ThreadDetail>, ForumError> {
    Ok(repo
        .find_detail(id)
        .await?
        .ok_or_else(|| RequestError::invalid(field, THREAD_NOT_FOUND)))
}

/// Resolve a post (with author) by id.
pub async fn post_by_id(
    repo: &dyn PostRepository,
    field: &str,
    id: i64,
) -> Result<Resolved<PostView>, ForumError> {
    Ok(repo
        .find_view(id)
        .await?
        .ok_or_else(|| RequestError::invalid(field, POST_NOT_FOUND)))
}
