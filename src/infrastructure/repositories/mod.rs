//! Repository Implementations
//!
//! PostgreSQL implementations of domain repository traits.
//!
//! ## Available Repositories
//!
//! - **UserRepository** - Accounts and credentials
//! - **CategoryRepository** - Category lookup and creation
//! - **ThreadRepository** - Threads joined with category and author
//! - **PostRepository** - Posts with keyset pagination and reply lookups
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use sqlx::PgPool;
//! use crate::infrastructure::repositories::{PgPostRepository, PgThreadRepository};
//!
//! async fn setup_repositories(pool: PgPool) {
//!     let thread_repo = PgThreadRepository::new(pool.clone());
//!     let post_repo = PgPostRepository::new(pool);
//! }
//! ```

pub mod category_repository;
pub mod post_repository;
pub mod thread_repository;
pub mod user_repository;

pub use category_repository::PgCategoryRepository;
pub use post_repository::PgPostRepository;
pub use thread_repository::PgThreadRepository;
pub use user_repository::PgUserRepository;
