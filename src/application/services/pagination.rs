//! Pagination Engine
//!
//! Keyset pagination over the posts of a thread, in creation order.

use std::sync::Arc;

use crate::domain::{PostRepository, PostView};

use super::resolver::parse_id;
use super::ForumError;

/// Posts per page.
pub const PAGE_SIZE: i64 = 10;

/// Position to continue a thread from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    /// First page.
    Start,
    /// Posts after the post with this id.
    After(i64),
    /// A cursor that could not be parsed; always yields an empty page.
    Invalid,
}

impl Cursor {
    /// Build a cursor from the raw `lastId` query value.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None => Cursor::Start,
            Some(raw) => parse_id(raw).map_or(Cursor::Invalid, Cursor::After),
        }
    }
}

/// Returns bounded pages of a thread's posts.
pub struct PostPaginator {
    posts: Arc<dyn PostRepository>,
    page_size: i64,
}

impl PostPaginator {
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self {
            posts,
            page_size: PAGE_SIZE,
        }
    }

    /// Fetch one page of posts for a thread.
    ///
    /// A cursor must name a post of this thread; any other cursor, including
    /// the id of the final post, gives an empty page rather than an error.
    pub async fn page(&self, thread_id: i64, cursor: Cursor) -> Result<Vec<PostView>, ForumError> {
        let after = match cursor {
            Cursor::Start => None,
            Cursor::Invalid => return Ok(Vec::new()),
            Cursor::After(last_id) => {
                let anchor = self.posts.find_by_id(last_id).await?;
                match anchor {
                    Some(post) if post.thread_id == thread_id => Some(post.id),
                    _ => {
                        tracing::debug!(thread_id, last_id, "Cursor outside thread, empty page");
                        return Ok(Vec::new());
                    }
                }
            }
        };

        Ok(self
            .posts
            .find_page(thread_id, after, self.page_size)
            .await?)
    }
}
