//! Markdown rendering backed by comrak.

use comrak::{markdown_to_html, Options};

use crate::domain::ContentRenderer;

/// CommonMark renderer. Raw HTML in the input is omitted from the output.
#[derive(Debug, Clone, Default)]
pub struct ComrakRenderer;

impl ComrakRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl ContentRenderer for ComrakRenderer {
    fn render(&self, raw: &str) -> String {
        markdown_to_html(raw, &Options::default())
    }
}
