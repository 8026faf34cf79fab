//! Export backends.
//!
//! An export backend is a [`RenderBackend`] with two extra page-level hooks.
//! The renderer calls the element hooks while rendering the body; the
//! [`Exporter`](crate::Exporter) calls [`ExportBackend::inner_template`] to
//! assemble the body and [`ExportBackend::template`] to produce the final
//! document. Every hook has a plain HTML default, so a backend overrides
//! only what its target needs.

use octo_renderer::{HtmlBackend, RenderBackend};

use crate::body::{BodyParts, compose_body};
use crate::code_block::CodeBlock;
use crate::front_matter::FrontMatter;

/// Page-level hooks layered over a [`RenderBackend`].
pub trait ExportBackend: RenderBackend {
    /// Assemble the document body.
    ///
    /// Default: table of contents, content and footnotes, with no draft
    /// marker.
    fn inner_template(parts: BodyParts<'_>) -> String {
        let toc = parts.toc.unwrap_or_default();
        let mut body =
            String::with_capacity(toc.len() + parts.content.len() + parts.footnotes.len());
        body.push_str(toc);
        body.push_str(parts.content);
        body.push_str(parts.footnotes);
        body
    }

    /// Produce the final document from the resolved header and the body.
    ///
    /// Default: the body alone.
    fn template(_front_matter: &FrontMatter, body: &str) -> String {
        body.to_owned()
    }
}

impl ExportBackend for HtmlBackend {}

/// Backend for Octopress/Jekyll posts.
///
/// Code blocks become `{% codeblock %}` shortcodes, the body carries the
/// preview banner for drafts, and the document starts with front matter.
/// Everything else renders as HTML.
pub struct OctopressBackend;

impl RenderBackend for OctopressBackend {
    fn code_block(lang: Option<&str>, content: &str, out: &mut String) {
        let block = CodeBlock {
            language: lang.map(str::to_owned),
            value: content.to_owned(),
        };
        out.push_str(&block.to_shortcode());
    }

    fn blockquote_start(out: &mut String) {
        HtmlBackend::blockquote_start(out);
    }

    fn blockquote_end(out: &mut String) {
        HtmlBackend::blockquote_end(out);
    }

    fn image(src: &str, alt: &str, title: &str, out: &mut String) {
        HtmlBackend::image(src, alt, title, out);
    }
}

impl ExportBackend for OctopressBackend {
    fn inner_template(parts: BodyParts<'_>) -> String {
        compose_body(parts)
    }

    fn template(front_matter: &FrontMatter, body: &str) -> String {
        let header = front_matter.render();
        let mut out = String::with_capacity(header.len() + body.len());
        out.push_str(&header);
        out.push_str(body);
        out
    }
}
