//! Response DTOs
//!
//! Data structures for API response bodies. Embedded relations use capitalised
//! keys (`User`, `Category`, `Thread`, `Posts`, `Replies`), scalar fields are
//! camelCase.

use serde::Serialize;

use crate::application::services::{AuthTokens, ThreadPage};
use crate::domain::{Category, PostDetail, PostView, ThreadDetail, User, UserSummary};

/// Authentication token response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: i64,
    pub token_type: String,
}

impl From<AuthTokens> for TokenResponse {
    fn from(tokens: AuthTokens) -> Self {
        Self {
            access_token: tokens.access_token,
            expires_in: tokens.expires_in,
            token_type: tokens.token_type,
        }
    }
}

/// Registration response (account plus token)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub user: UserResponse,
    #[serde(flatten)]
    pub token: TokenResponse,
}

/// Account response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub admin: bool,
    pub created_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            admin: user.admin,
            created_at: user.created_at.to_rfc3339(),
        }
    }
}

/// Author embedded in threads and posts
#[derive(Debug, Clone, Serialize)]
pub struct AuthorResponse {
    pub id: i64,
    pub username: String,
}

impl From<UserSummary> for AuthorResponse {
    fn from(user: UserSummary) -> Self {
        Self {
            id: user.id,
            username: user.username,
        }
    }
}

/// Category response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: i64,
    pub name: String,
    pub created_at: String,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            created_at: category.created_at.to_rfc3339(),
        }
    }
}

/// Thread response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadResponse {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub category_id: i64,
    pub user_id: i64,
    pub created_at: String,
    #[serde(rename = "Category")]
    pub category: CategoryResponse,
    #[serde(rename = "User")]
    pub user: AuthorResponse,
    #[serde(rename = "Posts", skip_serializing_if = "Option::is_none")]
    pub posts: Option<Vec<PostResponse>>,
}

impl From<ThreadDetail> for ThreadResponse {
    fn from(detail: ThreadDetail) -> Self {
        let ThreadDetail {
            thread,
            category,
            author,
        } = detail;

        Self {
            id: thread.id,
            name: thread.name,
            slug: thread.slug,
            category_id: thread.category_id,
            user_id: thread.user_id,
            created_at: thread.created_at.to_rfc3339(),
            category: category.into(),
            user: author.into(),
            posts: None,
        }
    }
}

/// Post response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: i64,
    pub content: String,
    pub thread_id: i64,
    pub user_id: i64,
    pub replying_to_id: Option<i64>,
    pub replying_to_username: Option<String>,
    pub created_at: String,
    #[serde(rename = "User")]
    pub user: AuthorResponse,
    #[serde(rename = "Thread", skip_serializing_if = "Option::is_none")]
    pub thread: Option<Box<ThreadResponse>>,
    #[serde(rename = "Replies", skip_serializing_if = "Option::is_none")]
    pub replies: Option<Vec<PostResponse>>,
}

impl From<PostView> for PostResponse {
    fn from(view: PostView) -> Self {
        let PostView {
            post,
            author,
            replying_to_username,
        } = view;

        Self {
            id: post.id,
            content: post.content,
            thread_id: post.thread_id,
            user_id: post.user_id,
            replying_to_id: post.replying_to_id,
            replying_to_username,
            created_at: post.created_at.to_rfc3339(),
            user: author.into(),
            thread: None,
            replies: None,
        }
    }
}

impl From<PostDetail> for PostResponse {
    fn from(detail: PostDetail) -> Self {
        let mut response = PostResponse::from(detail.view);
        response.thread = Some(Box::new(detail.thread.into()));
        response.replies = Some(detail.replies.into_iter().map(PostResponse::from).collect());
        response
    }
}

/// Pagination metadata
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_id: Option<i64>,
}

/// Thread with one page of posts
#[derive(Debug, Serialize)]
pub struct ThreadPageResponse {
    pub thread: ThreadResponse,
    pub meta: PageMeta,
}

impl From<ThreadPage> for ThreadPageResponse {
    fn from(page: ThreadPage) -> Self {
        let last_id = page.last_id();
        let mut thread = ThreadResponse::from(page.thread);
        thread.posts = Some(page.posts.into_iter().map(PostResponse::from).collect());

        Self {
            thread,
            meta: PageMeta { last_id },
        }
    }
}

/// Category listing
#[derive(Debug, Serialize)]
pub struct CategoryListResponse {
    pub categories: Vec<CategoryResponse>,
}
