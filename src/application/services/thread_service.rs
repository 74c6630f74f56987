//! Thread Service
//!
//! Handles thread creation.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::application::dto::request::CreateThreadRequest;
use crate::domain::{
    slugify, AuthorizationGate, CategoryRepository, NewThread, SessionUser, ThreadDetail,
    ThreadRepository, UserSummary,
};

use super::{parse_payload, resolver, ForumError};

/// Thread service trait
#[async_trait]
pub trait ThreadService: Send + Sync {
    /// Create a thread in an existing category.
    async fn create_thread(
        &self,
        session: Option<&SessionUser>,
        payload: &Value,
    ) -> Result<ThreadDetail, ForumError>;
}

/// ThreadService implementation
pub struct ThreadServiceImpl {
    category_repo: Arc<dyn CategoryRepository>,
    thread_repo: Arc<dyn ThreadRepository>,
}

impl ThreadServiceImpl {
    pub fn new(
        category_repo: Arc<dyn CategoryRepository>,
        thread_repo: Arc<dyn ThreadRepository>,
    ) -> Self {
        Self {
            category_repo,
            thread_repo,
        }
    }
}

#[async_trait]
impl ThreadService for ThreadServiceImpl {
    async fn create_thread(
        &self,
        session: Option<&SessionUser>,
        payload: &Value,
    ) -> Result<ThreadDetail, ForumError> {
        let user = AuthorizationGate::authorize(session)?;
        let request: CreateThreadRequest = parse_payload(payload)?;

        let category = resolver::category_by_name(self.category_repo.as_ref(), &request.category)
            .await?
            .map_err(|e| ForumError::Rejected(vec![e]))?;

        let new_thread = NewThread {
            slug: slugify(&request.name),
            name: request.name,
            category_id: category.id,
            user_id: user.user_id,
        };

        let thread = self.thread_repo.create(&new_thread).await?;

        tracing::info!(
            thread_id = thread.id,
            category = %category.name,
            slug = %thread.slug,
            user_id = user.user_id,
            "Thread created"
        );

        Ok(ThreadDetail {
            thread,
            category,
            author: UserSummary {
                id: user.user_id,
                username: user.username.clone(),
            },
        })
    }
}
