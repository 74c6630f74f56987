//! Category Service
//!
//! Category creation (administrators only) and listing.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::application::dto::request::CreateCategoryRequest;
use crate::domain::{AuthorizationGate, Category, CategoryRepository, SessionUser};
use crate::shared::error::{AppError, RequestError};

use super::{parse_payload, ForumError};

pub const CATEGORY_EXISTS: &str = "category already exists";

/// Category service trait
#[async_trait]
pub trait CategoryService: Send + Sync {
    /// Create a category. Requires an administrator session.
    async fn create_category(
        &self,
        session: Option<&SessionUser>,
        payload: &Value,
    ) -> Result<Category, ForumError>;

    /// All categories ordered by name.
    async fn list_categories(&self) -> Result<Vec<Category>, ForumError>;
}

/// CategoryService implementation
pub struct CategoryServiceImpl {
    category_repo: Arc<dyn CategoryRepository>,
}

impl CategoryServiceImpl {
    pub fn new(category_repo: Arc<dyn CategoryRepository>) -> Self {
        Self { category_repo }
    }
}

#[async_trait]
impl CategoryService for CategoryServiceImpl {
    async fn create_category(
        &self,
        session: Option<&SessionUser>,
        payload: &Value,
    ) -> Result<Category, ForumError> {
        let user = AuthorizationGate::authorize_admin(session)?;
        let request: CreateCategoryRequest = parse_payload(payload)?;

        if self.category_repo.find_by_name(&request.name).await?.is_some() {
            return Err(ForumError::Rejected(vec![RequestError::invalid(
                "name",
                CATEGORY_EXISTS,
            )]));
        }

        // The store enforces uniqueness too; a concurrent insert lands here.
        let category = match self.category_repo.create(&request.name).await {
            Ok(category) => category,
            Err(AppError::Conflict(_)) => {
                return Err(ForumError::Rejected(vec![RequestError::invalid(
                    "name",
                    CATEGORY_EXISTS,
                )]))
            }
            Err(e) => return Err(e.into()),
        };

        tracing::info!(
            category_id = category.id,
            name = %category.name,
            user_id = user.user_id,
            "Category created"
        );

        Ok(category)
    }

    async fn list_categories(&self) -> Result<Vec<Category>, ForumError> {
        Ok(self.category_repo.list().await?)
    }
}
