//! Plain-text rendering collaborator.

use std::fmt;
use std::sync::Arc;

/// Converts markdown source into plain text for listing rows.
pub trait PlainTextRenderer: Send + Sync {
    /// Renders `markdown` as plain text.
    fn render(&self, markdown: &str) -> String;
}

/// Truncates `text` to at most `max_chars` characters on a char boundary,
/// appending an ellipsis when anything was cut.
#[must_use]
pub fn excerpt(text: &str, max_chars: usize) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= max_chars {
        return trimmed.to_owned();
    }
    let mut cut: String = trimmed.chars().take(max_chars).collect();
    cut.truncate(cut.trim_end().len());
    cut.push('…');
    cut
}

/// Renders descriptions to bounded plain-text excerpts for listing rows.
#[derive(Clone)]
pub struct ExcerptRenderer {
    renderer: Arc<dyn PlainTextRenderer>,
    max_chars: usize,
}

impl fmt::Debug for ExcerptRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExcerptRenderer")
            .field("max_chars", &self.max_chars)
            .finish_non_exhaustive()
    }
}

impl ExcerptRenderer {
    /// Wraps `renderer`, cutting its output to `max_chars` characters.
    #[must_use]
    pub fn new(renderer: Arc<dyn PlainTextRenderer>, max_chars: usize) -> Self {
        Self {
            renderer,
            max_chars,
        }
    }

    /// Renders `markdown` and truncates the result.
    #[must_use]
    pub fn excerpt(&self, markdown: &str) -> String {
        excerpt(&self.renderer.render(markdown), self.max_chars)
    }
}
