//! Post Service
//!
//! Handles post creation, including replies to other posts in the same thread.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::application::dto::request::CreatePostRequest;
use crate::domain::{
    AuthorizationGate, ContentRenderer, NewPost, PostDetail, PostRepository, PostView,
    SessionUser, ThreadRepository, UserSummary,
};
use crate::shared::error::RequestError;

use super::resolver::{self, REPLY_IN_OTHER_THREAD};
use super::{parse_payload, ForumError};

/// Post service trait
#[async_trait]
pub trait PostService: Send + Sync {
    /// Create a post, optionally replying to another post of the same thread.
    async fn create_post(
        &self,
        session: Option<&SessionUser>,
        payload: &Value,
    ) -> Result<PostDetail, ForumError>;
}

/// PostService implementation
pub struct PostServiceImpl {
    thread_repo: Arc<dyn ThreadRepository>,
    post_repo: Arc<dyn PostRepository>,
    renderer: Arc<dyn ContentRenderer>,
}

impl PostServiceImpl {
    pub fn new(
        thread_repo: Arc<dyn ThreadRepository>,
        post_repo: Arc<dyn PostRepository>,
        renderer: Arc<dyn ContentRenderer>,
    ) -> Self {
        Self {
            thread_repo,
            post_repo,
            renderer,
        }
    }
}

#[async_trait]
impl PostService for PostServiceImpl {
    async fn create_post(
        &self,
        session: Option<&SessionUser>,
        payload: &Value,
    ) -> Result<PostDetail, ForumError> {
        let user = AuthorizationGate::authorize(session)?;
        let request: CreatePostRequest = parse_payload(payload)?;

        // Referential checks; every failure is reported.
        let mut errors: Vec<RequestError> = Vec::new();

        let thread = match resolver::thread_by_id(
            self.thread_repo.as_ref(),
            "threadId",
            request.thread_id,
        )
        .await?
        {
            Ok(thread) => Some(thread),
            Err(e) => {
                errors.push(e);
                None
            }
        };

        let reply_target = match request.replying_to_id {
            Some(id) => {
                match resolver::post_by_id(self.post_repo.as_ref(), "replyingToId", id).await? {
                    Ok(target) => Some(target),
                    Err(e) => {
                        errors.push(e);
                        None
                    }
                }
            }
            None => None,
        };

        if let (Some(thread), Some(target)) = (&thread, &reply_target) {
            if target.post.thread_id != thread.thread.id {
                errors.push(RequestError::invalid("replyingToId", REPLY_IN_OTHER_THREAD));
            }
        }

        let thread = match thread {
            Some(thread) if errors.is_empty() => thread,
            _ => return Err(ForumError::Rejected(errors)),
        };

        let content = self.renderer.render(&request.content);

        let post = self
            .post_repo
            .create(&NewPost {
                content,
                thread_id: thread.thread.id,
                user_id: user.user_id,
                replying_to_id: reply_target.as_ref().map(|target| target.post.id),
            })
            .await?;

        tracing::info!(
            post_id = post.id,
            thread_id = post.thread_id,
            replying_to_id = ?post.replying_to_id,
            user_id = user.user_id,
            "Post created"
        );

        Ok(PostDetail {
            view: PostView {
                post,
                author: UserSummary {
                    id: user.user_id,
                    username: user.username.clone(),
                },
                replying_to_username: reply_target.map(|target| target.author.username),
            },
            thread,
            replies: Vec::new(),
        })
    }
}
