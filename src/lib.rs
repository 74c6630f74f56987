//! # Forum Server Library
//!
//! This crate provides a discussion forum backend with:
//! - RESTful HTTP API for categories, threads, and threaded posts
//! - JWT bearer authentication
//! - PostgreSQL or in-memory storage
//! - Markdown rendering of post content
//!
//! ## Architecture
//!
//! The crate follows Clean Architecture principles:
//!
//! - **Domain Layer**: Core business entities, repository traits, and pure domain services
//! - **Application Layer**: Business logic services and DTOs
//! - **Infrastructure Layer**: Database, in-memory store, rendering, and metrics
//! - **Presentation Layer**: HTTP handlers, extractors, and middleware
//!
//! ## Module Structure
//!
//! ```text
//! forum_server/
//! +-- config/         Configuration management
//! +-- domain/         Domain entities, repository traits, domain services
//! +-- application/    Application services and DTOs
//! +-- infrastructure/ Store, rendering, and metrics implementations
//! +-- presentation/   HTTP routes, extractors, and middleware
//! +-- shared/         Common utilities (errors, payload validation)
//! ```

// Configuration module
pub mod config;

// Domain layer - Core business logic
pub mod domain;

// Application layer - Business services
pub mod application;

// Infrastructure layer - External implementations
pub mod infrastructure;

// Presentation layer - HTTP handlers
pub mod presentation;

// Shared utilities
pub mod shared;

// Application startup and state management
pub mod startup;

// Telemetry and observability
pub mod telemetry;
