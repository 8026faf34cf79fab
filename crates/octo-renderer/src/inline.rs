//! Inline formatting of single values.
//!
//! Metadata values (titles, dates, categories) go through the same
//! formatting as body text so that markup inside them is expanded
//! consistently.

use crate::error::RenderError;
use crate::html::HtmlBackend;
use crate::renderer::MarkdownRenderer;
use crate::state::escape_html;

/// Formats a single raw value into output markup.
pub trait InlineFormatter {
    /// Format `raw` as inline content.
    ///
    /// # Errors
    ///
    /// Implementations may fail; callers propagate the error unchanged.
    fn format_inline(&self, raw: &str) -> Result<String, RenderError>;
}

/// Inline formatter backed by the markdown renderer.
///
/// The value is rendered as a one-paragraph document and the paragraph
/// wrapper is removed: `Hello *world*` becomes `Hello <em>world</em>`.
/// Values that markdown would turn into block structure (a leading `- `
/// or `# `, for instance) are escaped verbatim instead.
#[derive(Clone, Copy, Debug, Default)]
pub struct MarkdownInline;

impl InlineFormatter for MarkdownInline {
    fn format_inline(&self, raw: &str) -> Result<String, RenderError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(String::new());
        }

        let result = MarkdownRenderer::<HtmlBackend>::new().render_markdown(raw);
        let inner = result
            .html
            .strip_prefix("<p>")
            .and_then(|html| html.strip_suffix("</p>"))
            .filter(|inner| !inner.contains("<p>"));

        Ok(match inner {
            Some(inner) => inner.to_owned(),
            None => escape_html(raw),
        })
    }
}
