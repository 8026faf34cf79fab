//! Table of contents rendering.

use std::fmt::Write;

use crate::state::{TocEntry, escape_html};

/// Render a nested table of contents down to `depth` levels.
///
/// Depth is counted from the shallowest heading in `entries`, so a document
/// whose sections start at `##` gets those as its first level. Returns an
/// empty string when `depth` is zero or no heading qualifies.
#[must_use]
pub fn render_toc(entries: &[TocEntry], depth: u8) -> String {
    let Some(top) = entries.iter().map(|e| e.level).min() else {
        return String::new();
    };

    let mut items = String::new();
    let mut open = 0usize;
    for entry in entries {
        let level = usize::from(entry.level - top) + 1;
        if level > usize::from(depth) {
            continue;
        }

        if level > open {
            for _ in open..level {
                items.push_str("\n<ul>\n<li>");
            }
        } else {
            items.push_str("</li>\n");
            for _ in level..open {
                items.push_str("</ul>\n</li>\n");
            }
            items.push_str("<li>");
        }
        open = level;

        write!(
            items,
            r##"<a href="#{}">{}</a>"##,
            entry.id,
            escape_html(&entry.title)
        )
        .unwrap();
    }

    if open == 0 {
        return String::new();
    }

    items.push_str("</li>\n");
    for _ in 1..open {
        items.push_str("</ul>\n</li>\n");
    }
    items.push_str("</ul>\n");

    format!(
        "<div id=\"table-of-contents\">\n<h2>Table of Contents</h2>\n<div id=\"text-table-of-contents\">{items}</div>\n</div>\n"
    )
}
