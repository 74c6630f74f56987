//! # Domain Entities
//!
//! Core domain entities representing the main business objects of the forum.
//! All entities map directly to their corresponding database tables.
//!
//! - **User**: Account with credentials and the admin flag
//! - **Category**: Named group of threads
//! - **Thread**: Discussion inside a category, with a derived slug
//! - **Post**: Rendered message in a thread, optionally replying to another post
//!
//! ## Repository Traits
//!
//! Each entity has an associated repository trait defining data access operations.
//! Relations are not loaded lazily: each trait offers the joined shapes
//! (`ThreadDetail`, `PostView`) that the read paths need.

mod user;
mod category;
mod thread;
mod post;

pub use user::{NewUser, User, UserRepository, UserSummary};
pub use category::{Category, CategoryRepository};
pub use thread::{NewThread, Thread, ThreadDetail, ThreadRepository};
pub use post::{NewPost, Post, PostDetail, PostRepository, PostView};

#[cfg(test)]
pub use user::MockUserRepository;
#[cfg(test)]
pub use category::MockCategoryRepository;
#[cfg(test)]
pub use thread::MockThreadRepository;
#[cfg(test)]
pub use post::MockPostRepository;
