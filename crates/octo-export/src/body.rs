//! Body assembly.

use crate::publish::PublishState;

/// Banner placed at the top of a preview document's body.
pub const PREVIEW_BANNER: &str = "<div class=\"preview-banner\"><p><strong>PREVIEW</strong> This post is a draft and has not been published.</p></div>\n";

/// The pieces a body is assembled from.
#[derive(Clone, Copy, Debug)]
pub struct BodyParts<'a> {
    /// Rendered table of contents, when one was requested.
    pub toc: Option<&'a str>,
    pub state: PublishState,
    /// Rendered document content.
    pub content: &'a str,
    /// Rendered footnotes section; empty when there are none.
    pub footnotes: &'a str,
}

/// Assemble the body: table of contents, preview banner, content, footnotes.
///
/// The order is fixed. The banner is present exactly when the document is
/// a preview; content is copied unchanged.
#[must_use]
pub fn compose_body(parts: BodyParts<'_>) -> String {
    let banner = if parts.state.is_preview() {
        PREVIEW_BANNER
    } else {
        ""
    };
    let toc = parts.toc.unwrap_or_default();

    let mut body = String::with_capacity(
        toc.len() + banner.len() + parts.content.len() + parts.footnotes.len(),
    );
    body.push_str(toc);
    body.push_str(banner);
    body.push_str(parts.content);
    body.push_str(parts.footnotes);
    body
}
