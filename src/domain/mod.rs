//! # Domain Layer
//!
//! The domain layer contains the core business rules of the forum.
//! It is independent of any external frameworks or infrastructure concerns.
//!
//! ## Structure
//!
//! - **entities**: Core domain entities (User, Category, Thread, Post) and repository traits
//! - **services**: Pure domain services (authorization gate, slugs, content rendering seam)
//!
//! ## Design Principles
//!
//! - No dependencies on infrastructure or presentation layers
//! - Pure business logic and domain rules
//! - Repository traits define data access contracts

pub mod entities;
pub mod services;

// Re-export commonly used types
pub use entities::*;
pub use services::*;
