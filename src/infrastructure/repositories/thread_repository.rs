//! Thread Repository Implementation
//!
//! PostgreSQL implementation of the ThreadRepository trait. Reads join the
//! category and author in a single query.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::{Category, NewThread, Thread, ThreadDetail, ThreadRepository, UserSummary};
use crate::shared::error::AppError;

/// Internal row type for thread inserts.
#[derive(Debug, sqlx::FromRow)]
struct ThreadRow {
    id: i64,
    name: String,
    slug: String,
    category_id: i64,
    user_id: i64,
    created_at: DateTime<Utc>,
}

impl ThreadRow {
    fn into_thread(self) -> Thread {
        Thread {
            id: self.id,
            name: self.name,
            slug: self.slug,
            category_id: self.category_id,
            user_id: self.user_id,
            created_at: self.created_at,
        }
    }
}

/// Thread joined with its category and author.
#[derive(Debug, sqlx::FromRow)]
struct ThreadDetailRow {
    id: i64,
    name: String,
    slug: String,
    category_id: i64,
    user_id: i64,
    created_at: DateTime<Utc>,
    category_name: String,
    category_created_at: DateTime<Utc>,
    username: String,
}

impl ThreadDetailRow {
    fn into_detail(self) -> ThreadDetail {
        ThreadDetail {
            category: Category {
                id: self.category_id,
                name: self.category_name,
                created_at: self.category_created_at,
            },
            author: UserSummary {
                id: self.user_id,
                username: self.username,
            },
            thread: Thread {
                id: self.id,
                name: self.name,
                slug: self.slug,
                category_id: self.category_id,
                user_id: self.user_id,
                created_at: self.created_at,
            },
        }
    }
}

/// PostgreSQL thread repository implementation.
#[derive(Clone)]
pub struct PgThreadRepository {
    pool: PgPool,
}

impl PgThreadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ThreadRepository for PgThreadRepository {
    async fn find_detail(&self, id: i64) -> Result<Option<ThreadDetail>, AppError> {
        let row = sqlx::query_as::<_, ThreadDetailRow>(
            r#"
            SELECT t.id, t.name, t.slug, t.category_id, t.user_id, t.created_at,
                   c.name AS category_name, c.created_at AS category_created_at,
                   u.username
            FROM threads t
            JOIN categories c ON c.id = t.category_id
            JOIN users u ON u.id = t.user_id
            WHERE t.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_detail()))
    }

    async fn create(&self, thread: &NewThread) -> Result<Thread, AppError> {
        let row = sqlx::query_as::<_, ThreadRow>(
            r#"
            INSERT INTO threads (name, slug, category_id, user_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, slug, category_id, user_id, created_at
            "#,
        )
        .bind(&thread.name)
        .bind(&thread.slug)
        .bind(thread.category_id)
        .bind(thread.user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_thread())
    }
}
