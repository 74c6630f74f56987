//! HTTP Layer

pub mod extractors;
pub mod handlers;
pub mod routes;
