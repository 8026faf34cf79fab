//! Context tracked while walking markdown events.

use std::collections::{HashMap, HashSet};

use pulldown_cmark::Alignment;

use crate::footnote::Footnote;

/// Code block being collected.
#[derive(Default)]
pub(crate) struct CodeBlockState {
    /// Language and raw text of the open block.
    open: Option<(Option<String>, String)>,
}

impl CodeBlockState {
    pub(crate) fn start(&mut self, language: Option<String>) {
        self.open = Some((language, String::new()));
    }

    /// Close the block, returning its language and raw text.
    pub(crate) fn end(&mut self) -> (Option<String>, String) {
        self.open.take().unwrap_or_default()
    }

    pub(crate) fn is_active(&self) -> bool {
        self.open.is_some()
    }

    pub(crate) fn push_str(&mut self, text: &str) {
        if let Some((_, content)) = self.open.as_mut() {
            content.push_str(text);
        }
    }

    pub(crate) fn push_newline(&mut self) {
        self.push_str("\n");
    }
}

/// Position inside the table being rendered.
#[derive(Default)]
pub(crate) struct TableState {
    alignments: Vec<Alignment>,
    column: usize,
    in_head: bool,
}

impl TableState {
    pub(crate) fn start(&mut self, alignments: Vec<Alignment>) {
        *self = Self {
            alignments,
            ..Self::default()
        };
    }

    pub(crate) fn start_head(&mut self) {
        self.in_head = true;
        self.column = 0;
    }

    pub(crate) fn end_head(&mut self) {
        self.in_head = false;
    }

    pub(crate) fn start_row(&mut self) {
        self.column = 0;
    }

    pub(crate) fn next_cell(&mut self) {
        self.column += 1;
    }

    pub(crate) fn is_in_head(&self) -> bool {
        self.in_head
    }

    /// Inline `style` attribute for the current column, or `""`.
    pub(crate) fn current_alignment_style(&self) -> &'static str {
        match self.alignments.get(self.column) {
            Some(Alignment::Left) => r#" style="text-align:left""#,
            Some(Alignment::Center) => r#" style="text-align:center""#,
            Some(Alignment::Right) => r#" style="text-align:right""#,
            Some(Alignment::None) | None => "",
        }
    }
}

/// Image whose alt text is being collected.
pub(crate) struct PendingImage {
    pub(crate) src: String,
    pub(crate) title: String,
    pub(crate) alt: String,
}

/// Image being rendered; its alt text arrives as separate text events.
#[derive(Default)]
pub(crate) struct ImageState {
    pending: Option<PendingImage>,
}

impl ImageState {
    pub(crate) fn start(&mut self, src: String, title: String) {
        self.pending = Some(PendingImage {
            src,
            title,
            alt: String::new(),
        });
    }

    pub(crate) fn end(&mut self) -> Option<PendingImage> {
        self.pending.take()
    }

    pub(crate) fn is_active(&self) -> bool {
        self.pending.is_some()
    }

    pub(crate) fn push_str(&mut self, text: &str) {
        if let Some(image) = self.pending.as_mut() {
            image.alt.push_str(text);
        }
    }
}

/// Table of contents entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TocEntry {
    /// Heading level (1-6).
    pub level: u8,
    /// Heading text.
    pub title: String,
    /// Anchor ID for linking.
    pub id: String,
}

/// Heading being rendered.
struct OpenHeading {
    level: u8,
    /// Plain text, for the slug and the table of contents.
    text: String,
    /// Inline markup, for the heading element itself.
    html: String,
}

/// Headings seen so far and the one currently open.
#[derive(Default)]
pub(crate) struct HeadingState {
    open: Option<OpenHeading>,
    toc: Vec<TocEntry>,
    /// Last suffix tried for each slug.
    suffixes: HashMap<String, usize>,
    /// Anchor ids already handed out.
    ids: HashSet<String>,
}

impl HeadingState {
    pub(crate) fn is_active(&self) -> bool {
        self.open.is_some()
    }

    pub(crate) fn start_heading(&mut self, level: u8) {
        self.open = Some(OpenHeading {
            level,
            text: String::new(),
            html: String::new(),
        });
    }

    /// Close the open heading and add it to the table of contents.
    ///
    /// Returns its level, anchor id and inline markup. Repeated titles get
    /// `-1`, `-2`, ... appended to their anchor, skipping ids already taken.
    pub(crate) fn complete_heading(&mut self) -> Option<(u8, String, String)> {
        let OpenHeading { level, text, html } = self.open.take()?;

        let slug = slugify(&text);
        let suffix = self.suffixes.entry(slug.clone()).or_default();
        let mut id = slug.clone();
        while self.ids.contains(&id) {
            *suffix += 1;
            id = format!("{slug}-{suffix}");
        }
        self.ids.insert(id.clone());

        self.toc.push(TocEntry {
            level,
            title: text.trim().to_owned(),
            id: id.clone(),
        });
        Some((level, id, html))
    }

    pub(crate) fn push_text(&mut self, text: &str) {
        if let Some(heading) = self.open.as_mut() {
            heading.text.push_str(text);
        }
    }

    pub(crate) fn push_html(&mut self, html: &str) {
        if let Some(heading) = self.open.as_mut() {
            heading.html.push_str(html);
        }
    }

    pub(crate) fn take_toc(&mut self) -> Vec<TocEntry> {
        std::mem::take(&mut self.toc)
    }
}

/// State for footnote references and definitions.
///
/// Numbers are assigned in order of first reference. While a definition is
/// being rendered the renderer swaps its output buffer out, so the
/// definition body never lands in the main HTML.
#[derive(Default)]
pub(crate) struct FootnoteState {
    /// Label to assigned number.
    numbers: HashMap<String, usize>,
    /// Label of the definition currently being captured.
    current: Option<String>,
    /// Main output parked while a definition is captured.
    parked: Option<String>,
    definitions: Vec<(String, String)>,
}

impl FootnoteState {
    /// Number for a label, assigning the next one on first sight.
    pub(crate) fn number_for(&mut self, label: &str) -> usize {
        let next = self.numbers.len() + 1;
        *self.numbers.entry(label.to_owned()).or_insert(next)
    }

    /// Begin capturing a definition, parking the main output.
    pub(crate) fn start_definition(&mut self, label: &str, output: &mut String) {
        self.current = Some(label.to_owned());
        self.parked = Some(std::mem::take(output));
    }

    /// Finish the current definition and restore the main output.
    ///
    /// Only the first definition of a label is kept.
    pub(crate) fn end_definition(&mut self, output: &mut String) {
        let body = std::mem::replace(output, self.parked.take().unwrap_or_default());
        let Some(label) = self.current.take() else {
            return;
        };
        if !self.definitions.iter().any(|(seen, _)| *seen == label) {
            self.definitions.push((label, body));
        }
    }

    /// Collect definitions ordered by footnote number.
    ///
    /// Definitions that were never referenced are numbered after all
    /// referenced ones, in source order.
    pub(crate) fn take_footnotes(&mut self) -> Vec<Footnote> {
        let definitions = std::mem::take(&mut self.definitions);
        let mut footnotes: Vec<Footnote> = definitions
            .into_iter()
            .map(|(label, html)| {
                let number = self.number_for(&label);
                Footnote {
                    label,
                    number,
                    html,
                }
            })
            .collect();
        footnotes.sort_by_key(|f| f.number);
        footnotes
    }
}

/// Convert text to URL-safe slug.
///
/// Converts to lowercase, replaces whitespace/dashes/underscores with single dashes,
/// and removes other non-alphanumeric characters.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut result = String::new();
    let mut last_was_dash = true; // Prevents leading dash

    for c in text.trim().chars() {
        if c.is_ascii_alphanumeric() {
            result.push(c.to_ascii_lowercase());
            last_was_dash = false;
        } else if !last_was_dash && (c.is_whitespace() || c == '-' || c == '_') {
            result.push('-');
            last_was_dash = true;
        }
    }

    if result.ends_with('-') {
        result.pop();
    }

    result
}

/// Escape HTML special characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}
