//! Query Service
//!
//! Read-side thread and post lookups with their relations expanded.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{PostDetail, PostRepository, PostView, ThreadDetail, ThreadRepository};
use crate::shared::error::RequestError;

use super::pagination::{Cursor, PostPaginator};
use super::resolver::{parse_id, POST_NOT_FOUND, THREAD_NOT_FOUND};
use super::ForumError;

/// A thread with one page of its posts.
#[derive(Debug, Clone)]
pub struct ThreadPage {
    pub thread: ThreadDetail,
    pub posts: Vec<PostView>,
}

impl ThreadPage {
    /// Cursor for the next page: the id of the last post on this one.
    pub fn last_id(&self) -> Option<i64> {
        self.posts.last().map(|view| view.post.id)
    }
}

/// Query service trait
#[async_trait]
pub trait QueryService: Send + Sync {
    /// Get a thread with a page of posts. `raw_id` and `last_id` come straight
    /// from the request.
    async fn get_thread(&self, raw_id: &str, last_id: Option<&str>) -> Result<ThreadPage, ForumError>;

    /// Get a post with its thread and direct replies.
    async fn get_post(&self, raw_id: &str) -> Result<PostDetail, ForumError>;
}

/// QueryService implementation
pub struct QueryServiceImpl {
    thread_repo: Arc<dyn ThreadRepository>,
    post_repo: Arc<dyn PostRepository>,
    paginator: PostPaginator,
}

impl QueryServiceImpl {
    pub fn new(thread_repo: Arc<dyn ThreadRepository>, post_repo: Arc<dyn PostRepository>) -> Self {
        Self {
            paginator: PostPaginator::new(post_repo.clone()),
            thread_repo,
            post_repo,
        }
    }

    async fn thread_detail(&self, id: Option<i64>) -> Result<ThreadDetail, ForumError> {
        let found = match id {
            Some(id) => self.thread_repo.find_detail(id).await?,
            None => None,
        };

        found.ok_or_else(|| not_found(THREAD_NOT_FOUND))
    }
}

fn not_found(reason: &str) -> ForumError {
    ForumError::Rejected(vec![RequestError::invalid("id", reason)])
}

#[async_trait]
impl QueryService for QueryServiceImpl {
    async fn get_thread(&self, raw_id: &str, last_id: Option<&str>) -> Result<ThreadPage, ForumError> {
        let thread = self.thread_detail(parse_id(raw_id)).await?;
        let posts = self
            .paginator
            .page(thread.thread.id, Cursor::parse(last_id))
            .await?;

        Ok(ThreadPage { thread, posts })
    }

    async fn get_post(&self, raw_id: &str) -> Result<PostDetail, ForumError> {
        let view = match parse_id(raw_id) {
            Some(id) => self.post_repo.find_view(id).await?,
            None => None,
        }
        .ok_or_else(|| not_found(POST_NOT_FOUND))?;

        // A post's thread always exists; a miss here means the store is inconsistent.
        let thread = self
            .thread_repo
            .find_detail(view.post.thread_id)
            .await?
            .ok_or_else(|| {
                ForumError::Unavailable(format!(
                    "thread {} of post {} is missing",
                    view.post.thread_id, view.post.id
                ))
            })?;

        let replies = self.post_repo.find_replies(view.post.id).await?;

        Ok(PostDetail {
            view,
            thread,
            replies,
        })
    }
}
