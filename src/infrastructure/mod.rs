//! Infrastructure Layer
//!
//! Contains implementations for external services including:
//! - Database repositories (PostgreSQL)
//! - The in-memory store
//! - Markdown rendering
//! - Prometheus metrics

pub mod database;
pub mod memory;
pub mod metrics;
pub mod rendering;
pub mod repositories;
