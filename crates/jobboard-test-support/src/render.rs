//! Renderer doubles.

use jobboard_core::render::PlainTextRenderer;

/// A renderer that returns the markdown source unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughRenderer;

impl PlainTextRenderer for PassthroughRenderer {
    fn render(&self, markdown: &str) -> String {
        markdown.to_owned()
    }
}
