//! Metadata field resolution.

use octo_renderer::InlineFormatter;

use crate::error::ExportError;
use crate::options::{ExportOptions, OptionValue};

/// Fallback values for fields a document leaves unset.
///
/// Built once from user settings before an export batch and passed into
/// every export; there are no defaults for `comments`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDefaults {
    pub layout: String,
    pub categories: String,
    pub tags: String,
    pub published: String,
}

impl Default for FieldDefaults {
    fn default() -> Self {
        Self {
            layout: "post".to_owned(),
            categories: String::new(),
            tags: String::new(),
            published: "true".to_owned(),
        }
    }
}

/// Looks up fields in a document's options and formats them.
pub struct FieldResolver<'a, F> {
    options: &'a ExportOptions,
    formatter: &'a F,
}

impl<'a, F: InlineFormatter> FieldResolver<'a, F> {
    #[must_use]
    pub fn new(options: &'a ExportOptions, formatter: &'a F) -> Self {
        Self { options, formatter }
    }

    /// Resolve a field to a string.
    ///
    /// A sequence value contributes its first element. The value is run
    /// through the inline formatter; when the result is empty and a
    /// `default` is given, the default is returned verbatim (unformatted).
    /// An unset field without a default is the empty string.
    ///
    /// # Errors
    ///
    /// Propagates formatter failures unchanged.
    pub fn resolve(&self, name: &str, default: Option<&str>) -> Result<String, ExportError> {
        let raw = self.options.get(name).map(OptionValue::first_or_empty);
        let formatted = match raw {
            Some(raw) => self.formatter.format_inline(raw)?,
            None => String::new(),
        };

        match default {
            Some(default) if formatted.is_empty() => Ok(default.to_owned()),
            _ => Ok(formatted),
        }
    }
}

/// Format space-separated tokens as a front matter list.
///
/// Each token becomes a newline-prefixed `- token` entry, entries joined
/// by a single space: `"a b"` becomes `"\n- a \n- b"`. Empty input (or
/// input with only whitespace) yields an empty string.
#[must_use]
pub fn format_list(tokens: &str) -> String {
    tokens
        .split_whitespace()
        .map(|token| format!("\n- {token}"))
        .collect::<Vec<_>>()
        .join(" ")
}
