//! # Domain Services
//!
//! Domain services encapsulate business rules that don't naturally belong to a
//! single entity. They are pure and perform no I/O.
//!
//! ## Services
//!
//! - **AuthorizationGate**: Decides whether a caller may write
//! - **slugify**: Thread slug derivation
//! - **ContentRenderer**: Seam for turning raw post text into HTML

mod authorization;
mod rendering;
mod slug;

pub use authorization::{AuthorizationGate, RequestNotAuthorized, SessionUser};
pub use rendering::ContentRenderer;
pub use slug::slugify;

#[cfg(test)]
pub use rendering::MockContentRenderer;
