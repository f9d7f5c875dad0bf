//! Markdown to plain text, for listing excerpts.

use jobboard_core::render::PlainTextRenderer;
use pulldown_cmark::{Event, Parser, TagEnd};

/// Renders CommonMark to a single line of plain text.
///
/// Formatting is dropped, link text is kept, and block boundaries become
/// single spaces.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownRenderer;

impl PlainTextRenderer for MarkdownRenderer {
    fn render(&self, markdown: &str) -> String {
        let mut text = String::with_capacity(markdown.len());
        for event in Parser::new(markdown) {
            match event {
                Event::Text(chunk) | Event::Code(chunk) => text.push_str(&chunk),
                Event::SoftBreak
                | Event::HardBreak
                | Event::Rule
                | Event::End(
                    TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::Item | TagEnd::CodeBlock,
                ) => text.push(' '),
                _ => {}
            }
        }
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}
