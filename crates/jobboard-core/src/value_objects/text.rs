//! Titles and markdown descriptions.

use std::fmt;

use super::bounded_text;
use crate::error::ValidationError;

/// A short human-readable headline, e.g. a vacancy or resume title.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Title(String);

impl Title {
    /// Maximum length in characters.
    pub const MAX_CHARS: usize = 150;

    /// Validates and builds a title.
    ///
    /// # Errors
    ///
    /// Returns `title.empty` for blank input and `title.too_long` past
    /// [`Self::MAX_CHARS`].
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        bounded_text("title", "title.empty", "title.too_long", raw, Self::MAX_CHARS).map(Self)
    }

    /// Returns the title text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Markdown body text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Description(String);

impl Description {
    /// Maximum length in characters.
    pub const MAX_CHARS: usize = 10_000;

    /// Validates and builds a description.
    ///
    /// # Errors
    ///
    /// Returns `description.empty` or `description.too_long`.
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        bounded_text(
            "description",
            "description.empty",
            "description.too_long",
            raw,
            Self::MAX_CHARS,
        )
        .map(Self)
    }

    /// Returns the markdown source.
    #[must_use]
    pub fn markdown(&self) -> &str {
        &self.0
    }
}
