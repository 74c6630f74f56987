//! Content rendering seam.

/// Converts raw post text into sanitized HTML.
///
/// Rendering is total: every string input produces HTML.
#[cfg_attr(test, mockall::automock)]
pub trait ContentRenderer: Send + Sync {
    fn render(&self, raw: &str) -> String;
}
