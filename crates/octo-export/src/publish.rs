//! Published/preview state of a document.

use std::fmt;

/// Whether a document is published or still a preview.
///
/// Parsed once from the resolved `published` field; everything that
/// reacts to draft status (the title prefix, the body banner) reads this
/// value instead of comparing strings again.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PublishState {
    /// The document is live.
    Published,
    /// The document is a draft.
    Preview,
}

impl PublishState {
    /// Parse the resolved `published` field.
    ///
    /// Only the exact, case-sensitive string `"true"` means published.
    /// Anything else (`"false"`, `"True"`, `"draft"`, empty) is a preview.
    #[must_use]
    pub fn parse(published: &str) -> Self {
        if published == "true" {
            Self::Published
        } else {
            Self::Preview
        }
    }

    #[must_use]
    pub fn is_preview(self) -> bool {
        self == Self::Preview
    }
}

impl fmt::Display for PublishState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Published => f.write_str("published"),
            Self::Preview => f.write_str("preview"),
        }
    }
}
