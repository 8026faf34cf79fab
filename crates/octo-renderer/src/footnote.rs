//! Footnote definitions and the footnotes section.

use std::fmt::Write;

/// A footnote definition collected during rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Footnote {
    /// Label as written in the source (`[^label]`).
    pub label: String,
    /// Display number, assigned in order of first reference.
    pub number: usize,
    /// Rendered body of the definition.
    pub html: String,
}

/// Render the footnotes section appended after a document body.
///
/// Each entry links back to its reference (`fnr.N`) and carries the
/// `fn.N` anchor the reference points at. Returns an empty string when
/// there are no footnotes, so callers can append it unconditionally.
#[must_use]
pub fn render_footnotes(footnotes: &[Footnote]) -> String {
    if footnotes.is_empty() {
        return String::new();
    }

    let mut out = String::from(
        "<div id=\"footnotes\">\n<h2 class=\"footnotes\">Footnotes</h2>\n<div id=\"text-footnotes\">\n",
    );
    for footnote in footnotes {
        let n = footnote.number;
        write!(
            out,
            "<div class=\"footdef\"><sup><a id=\"fn.{n}\" class=\"footnum\" href=\"#fnr.{n}\">{n}</a></sup> <div class=\"footpara\">{}</div></div>\n",
            footnote.html
        )
        .unwrap();
    }
    out.push_str("</div>\n</div>\n");
    out
}
