//! Post Repository Implementation
//!
//! PostgreSQL implementation of post storage with keyset pagination by id.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::{NewPost, Post, PostRepository, PostView, UserSummary};
use crate::shared::error::AppError;

/// PostgreSQL post repository implementation.
///
/// Every view query joins the author and, for replies, the author of the
/// target post.
#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Internal row type for plain post queries.
#[derive(Debug, sqlx::FromRow)]
struct PostRow {
    id: i64,
    content: String,
    thread_id: i64,
    user_id: i64,
    replying_to_id: Option<i64>,
    created_at: DateTime<Utc>,
}

impl PostRow {
    fn into_post(self) -> Post {
        Post {
            id: self.id,
            content: self.content,
            thread_id: self.thread_id,
            user_id: self.user_id,
            replying_to_id: self.replying_to_id,
            created_at: self.created_at,
        }
    }
}

/// Post joined with its author and the reply target's author.
#[derive(Debug, sqlx::FromRow)]
struct PostViewRow {
    id: i64,
    content: String,
    thread_id: i64,
    user_id: i64,
    replying_to_id: Option<i64>,
    created_at: DateTime<Utc>,
    username: String,
    replying_to_username: Option<String>,
}

impl PostViewRow {
    fn into_view(self) -> PostView {
        PostView {
            author: UserSummary {
                id: self.user_id,
                username: self.username,
            },
            replying_to_username: self.replying_to_username,
            post: Post {
                id: self.id,
                content: self.content,
                thread_id: self.thread_id,
                user_id: self.user_id,
                replying_to_id: self.replying_to_id,
                created_at: self.created_at,
            },
        }
    }
}

const VIEW_SELECT: &str = r#"
    SELECT p.id, p.content, p.thread_id, p.user_id, p.replying_to_id, p.created_at,
           u.username,
           ru.username AS replying_to_username
    FROM posts p
    JOIN users u ON u.id = p.user_id
    LEFT JOIN posts r ON r.id = p.replying_to_id
    LEFT JOIN users ru ON ru.id = r.user_id
"#;

#[async_trait]
impl PostRepository for PgPostRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, AppError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, content, thread_id, user_id, replying_to_id, created_at
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_post()))
    }

    async fn find_view(&self, id: i64) -> Result<Option<PostView>, AppError> {
        let sql = format!("{} WHERE p.id = $1", VIEW_SELECT);
        let row = sqlx::query_as::<_, PostViewRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| r.into_view()))
    }

    async fn find_page(
        &self,
        thread_id: i64,
        after: Option<i64>,
        limit: i64,
    ) -> Result<Vec<PostView>, AppError> {
        let rows = match after {
            Some(after_id) => {
                let sql = format!(
                    "{} WHERE p.thread_id = $1 AND p.id > $2 ORDER BY p.id ASC LIMIT $3",
                    VIEW_SELECT
                );
                sqlx::query_as::<_, PostViewRow>(&sql)
                    .bind(thread_id)
                    .bind(after_id)
                    .bind(limit)
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                let sql = format!(
                    "{} WHERE p.thread_id = $1 ORDER BY p.id ASC LIMIT $2",
                    VIEW_SELECT
                );
                sqlx::query_as::<_, PostViewRow>(&sql)
                    .bind(thread_id)
                    .bind(limit)
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        Ok(rows.into_iter().map(|r| r.into_view()).collect())
    }

    async fn find_replies(&self, post_id: i64) -> Result<Vec<PostView>, AppError> {
        let sql = format!("{} WHERE p.replying_to_id = $1 ORDER BY p.id ASC", VIEW_SELECT);
        let rows = sqlx::query_as::<_, PostViewRow>(&sql)
            .bind(post_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(|r| r.into_view()).collect())
    }

    async fn create(&self, post: &NewPost) -> Result<Post, AppError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            INSERT INTO posts (content, thread_id, user_id, replying_to_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, content, thread_id, user_id, replying_to_id, created_at
            "#,
        )
        .bind(&post.content)
        .bind(post.thread_id)
        .bind(post.user_id)
        .bind(post.replying_to_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_post())
    }
}
