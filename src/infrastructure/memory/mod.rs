//! In-memory store
//!
//! Implements every repository trait over process-local tables guarded by a
//! single `parking_lot::RwLock`. Ids are assigned per table starting at 1,
//! like `BIGSERIAL`. Uniqueness and foreign keys are enforced the way the
//! Postgres schema enforces them.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;

use crate::domain::{
    Category, CategoryRepository, NewPost, NewThread, NewUser, Post, PostRepository, PostView,
    Thread, ThreadDetail, ThreadRepository, User, UserRepository, UserSummary,
};
use crate::shared::error::AppError;

#[derive(Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    categories: BTreeMap<i64, Category>,
    threads: BTreeMap<i64, Thread>,
    posts: BTreeMap<i64, Post>,
}

fn next_id<T>(table: &BTreeMap<i64, T>) -> i64 {
    table.keys().next_back().map_or(1, |last| last + 1)
}

fn missing_reference(table: &str, id: i64) -> AppError {
    AppError::Internal(format!("{} {} does not exist", table, id))
}

impl Tables {
    fn author(&self, user_id: i64) -> Option<UserSummary> {
        self.users.get(&user_id).map(User::summary)
    }

    fn thread_detail(&self, thread: &Thread) -> Option<ThreadDetail> {
        Some(ThreadDetail {
            category: self.categories.get(&thread.category_id)?.clone(),
            author: self.author(thread.user_id)?,
            thread: thread.clone(),
        })
    }

    fn post_view(&self, post: &Post) -> Option<PostView> {
        let replying_to_username = post
            .replying_to_id
            .and_then(|id| self.posts.get(&id))
            .and_then(|target| self.users.get(&target.user_id))
            .map(|user| user.username.clone());

        Some(PostView {
            author: self.author(post.user_id)?,
            replying_to_username,
            post: post.clone(),
        })
    }
}

/// Process-local store used by tests and the `memory` storage backend.
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        Ok(self.tables.read().users.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let tables = self.tables.read();
        Ok(tables
            .users
            .values()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn create(&self, user: &NewUser) -> Result<User, AppError> {
        let mut tables = self.tables.write();
        if tables.users.values().any(|u| u.username == user.username) {
            return Err(AppError::Conflict(
                "User with this username already exists".to_string(),
            ));
        }

        let created = User {
            id: next_id(&tables.users),
            username: user.username.clone(),
            password_hash: user.password_hash.clone(),
            admin: user.wants_admin && tables.users.is_empty(),
            created_at: Utc::now(),
        };
        tables.users.insert(created.id, created.clone());

        Ok(created)
    }
}

#[async_trait]
impl CategoryRepository for InMemoryStore {
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, AppError> {
        let tables = self.tables.read();
        Ok(tables
            .categories
            .values()
            .find(|category| category.name == name)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Category>, AppError> {
        let mut categories: Vec<Category> =
            self.tables.read().categories.values().cloned().collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn create(&self, name: &str) -> Result<Category, AppError> {
        let mut tables = self.tables.write();
        if tables.categories.values().any(|c| c.name == name) {
            return Err(AppError::Conflict(format!(
                "Category '{}' already exists",
                name
            )));
        }

        let created = Category {
            id: next_id(&tables.categories),
            name: name.to_string(),
            created_at: Utc::now(),
        };
        tables.categories.insert(created.id, created.clone());

        Ok(created)
    }
}

#[async_trait]
impl ThreadRepository for InMemoryStore {
    async fn find_detail(&self, id: i64) -> Result<Option<ThreadDetail>, AppError> {
        let tables = self.tables.read();
        Ok(tables
            .threads
            .get(&id)
            .and_then(|thread| tables.thread_detail(thread)))
    }

    async fn create(&self, thread: &NewThread) -> Result<Thread, AppError> {
        let mut tables = self.tables.write();
        if !tables.categories.contains_key(&thread.category_id) {
            return Err(missing_reference("category", thread.category_id));
        }
        if !tables.users.contains_key(&thread.user_id) {
            return Err(missing_reference("user", thread.user_id));
        }

        let created = Thread {
            id: next_id(&tables.threads),
            name: thread.name.clone(),
            slug: thread.slug.clone(),
            category_id: thread.category_id,
            user_id: thread.user_id,
            created_at: Utc::now(),
        };
        tables.threads.insert(created.id, created.clone());

        Ok(created)
    }
}

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, AppError> {
        Ok(self.tables.read().posts.get(&id).cloned())
    }

    async fn find_view(&self, id: i64) -> Result<Option<PostView>, AppError> {
        let tables = self.tables.read();
        Ok(tables.posts.get(&id).and_then(|post| tables.post_view(post)))
    }

    async fn find_page(
        &self,
        thread_id: i64,
        after: Option<i64>,
        limit: i64,
    ) -> Result<Vec<PostView>, AppError> {
        let tables = self.tables.read();
        let lower = after.map_or(i64::MIN, |id| id.saturating_add(1));

        Ok(tables
            .posts
            .range(lower..)
            .map(|(_, post)| post)
            .filter(|post| post.thread_id == thread_id)
            .take(usize::try_from(limit).unwrap_or(0))
            .filter_map(|post| tables.post_view(post))
            .collect())
    }

    async fn find_replies(&self, post_id: i64) -> Result<Vec<PostView>, AppError> {
        let tables = self.tables.read();
        Ok(tables
            .posts
            .values()
            .filter(|post| post.replying_to_id == Some(post_id))
            .filter_map(|post| tables.post_view(post))
            .collect())
    }

    async fn create(&self, post: &NewPost) -> Result<Post, AppError> {
        let mut tables = self.tables.write();
        if !tables.threads.contains_key(&post.thread_id) {
            return Err(missing_reference("thread", post.thread_id));
        }
        if !tables.users.contains_key(&post.user_id) {
            return Err(missing_reference("user", post.user_id));
        }
        if let Some(target) = post.replying_to_id {
            if !tables.posts.contains_key(&target) {
                return Err(missing_reference("post", target));
            }
        }

        let created = Post {
            id: next_id(&tables.posts),
            content: post.content.clone(),
            thread_id: post.thread_id,
            user_id: post.user_id,
            replying_to_id: post.replying_to_id,
            created_at: Utc::now(),
        };
        tables.posts.insert(created.id, created.clone());

        Ok(created)
    }
}
