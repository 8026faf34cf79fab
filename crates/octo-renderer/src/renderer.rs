//! Markdown to HTML, with target-specific elements delegated to a backend.

use std::fmt::Write;
use std::marker::PhantomData;

use pulldown_cmark::{CodeBlockKind, Event, MetadataBlockKind, Options, Parser, Tag, TagEnd};

use crate::backend::RenderBackend;
use crate::footnote::Footnote;
use crate::state::{
    CodeBlockState, FootnoteState, HeadingState, ImageState, TableState, TocEntry, escape_html,
};
use crate::util::{fence_language, heading_level_to_num};

/// Everything one render pass produces.
#[derive(Clone, Debug, Default)]
pub struct RenderResult {
    /// Rendered HTML content, without footnote definitions.
    pub html: String,
    /// Table of contents entries, in document order.
    pub toc: Vec<TocEntry>,
    /// Footnote definitions, ordered by footnote number.
    pub footnotes: Vec<Footnote>,
    /// Raw text of the leading YAML metadata block, if present.
    pub metadata: Option<String>,
}

/// Markdown renderer parameterized by its element backend.
///
/// Paragraphs, lists, tables, headings, footnotes and inline markup are
/// rendered here; code blocks, blockquotes and images go through `B`.
pub struct MarkdownRenderer<B: RenderBackend> {
    output: String,
    code: CodeBlockState,
    table: TableState,
    image: ImageState,
    heading: HeadingState,
    footnotes: FootnoteState,
    /// Metadata block text while inside the block.
    metadata: Option<String>,
    in_metadata: bool,
    gfm: bool,
    _backend: PhantomData<B>,
}

impl<B: RenderBackend> MarkdownRenderer<B> {
    /// Create a renderer with GFM extensions enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            output: String::with_capacity(4096),
            code: CodeBlockState::default(),
            table: TableState::default(),
            image: ImageState::default(),
            heading: HeadingState::default(),
            footnotes: FootnoteState::default(),
            metadata: None,
            in_metadata: false,
            gfm: true,
            _backend: PhantomData,
        }
    }

    /// Toggle the GFM extensions: tables, `~~strikethrough~~` and
    /// `- [ ]` task lists.
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    /// Parser options for the current settings.
    ///
    /// Footnotes and YAML metadata blocks are always enabled.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        let base = Options::ENABLE_FOOTNOTES | Options::ENABLE_YAML_STYLE_METADATA_BLOCKS;
        if self.gfm {
            base | Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
        } else {
            base
        }
    }

    /// Parser over `markdown` with [`Self::parser_options`].
    #[must_use]
    pub fn create_parser<'a>(&self, markdown: &'a str) -> Parser<'a> {
        Parser::new_ext(markdown, self.parser_options())
    }

    /// Parse and render `markdown`.
    pub fn render_markdown(&mut self, markdown: &str) -> RenderResult {
        self.render(self.create_parser(markdown))
    }

    /// Inline markup goes into the open heading, if any.
    fn push_inline(&mut self, content: &str) {
        if self.heading.is_active() {
            self.heading.push_html(content);
        } else {
            self.output.push_str(content);
        }
    }

    /// Render an event stream. The renderer can be reused afterwards.
    pub fn render<'a, I>(&mut self, events: I) -> RenderResult
    where
        I: Iterator<Item = Event<'a>>,
    {
        for event in events {
            self.process_event(event);
        }

        RenderResult {
            html: std::mem::take(&mut self.output),
            toc: self.heading.take_toc(),
            footnotes: self.footnotes.take_footnotes(),
            metadata: self.metadata.take(),
        }
    }

    fn process_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.inline_code(&code),
            Event::Html(html) | Event::InlineHtml(html) => self.raw_html(&html),
            Event::SoftBreak => self.soft_break(),
            Event::HardBreak => self.hard_break(),
            Event::Rule => self.horizontal_rule(),
            Event::TaskListMarker(checked) => self.task_list_marker(checked),
            Event::FootnoteReference(label) => self.footnote_reference(&label),
            Event::InlineMath(_) | Event::DisplayMath(_) => {
                // Not supported
            }
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        if let Some((open, _)) = fixed_markup(tag.to_end()) {
            self.push_inline(open);
            return;
        }

        match tag {
            Tag::Paragraph if !self.code.is_active() => self.output.push_str("<p>"),
            // The opening tag waits for the slug, written on close.
            Tag::Heading { level, .. } => self.heading.start_heading(heading_level_to_num(level)),
            Tag::BlockQuote(_) => B::blockquote_start(&mut self.output),
            Tag::CodeBlock(CodeBlockKind::Fenced(info)) => self.code.start(fence_language(&info)),
            Tag::CodeBlock(CodeBlockKind::Indented) => self.code.start(None),
            Tag::List(Some(1)) => self.output.push_str("<ol>"),
            Tag::List(Some(n)) => write!(self.output, r#"<ol start="{n}">"#).unwrap(),
            Tag::List(None) => self.output.push_str("<ul>"),
            Tag::FootnoteDefinition(label) => {
                self.footnotes.start_definition(&label, &mut self.output);
            }
            Tag::MetadataBlock(MetadataBlockKind::YamlStyle) => {
                self.in_metadata = true;
                self.metadata = Some(String::new());
            }
            Tag::Table(alignments) => {
                self.table.start(alignments);
                self.output.push_str("<table>");
            }
            Tag::TableHead => {
                self.table.start_head();
                self.output.push_str("<thead><tr>");
            }
            Tag::TableRow => {
                self.table.start_row();
                self.output.push_str("<tr>");
            }
            Tag::TableCell => {
                let cell = if self.table.is_in_head() { "th" } else { "td" };
                let align = self.table.current_alignment_style();
                write!(self.output, "<{cell}{align}>").unwrap();
            }
            Tag::Link { dest_url, .. } => {
                self.push_inline(&format!(r#"<a href="{}">"#, escape_html(&dest_url)));
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                self.image.start(dest_url.into_string(), title.into_string());
            }
            _ => {}
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        if let Some((_, close)) = fixed_markup(tag) {
            self.push_inline(close);
            return;
        }

        match tag {
            TagEnd::Paragraph if !self.code.is_active() => self.output.push_str("</p>"),
            TagEnd::Heading(_) => {
                if let Some((level, id, html)) = self.heading.complete_heading() {
                    let html = html.trim();
                    write!(self.output, r#"<h{level} id="{id}">{html}</h{level}>"#).unwrap();
                }
            }
            TagEnd::BlockQuote(_) => B::blockquote_end(&mut self.output),
            TagEnd::CodeBlock => {
                let (lang, content) = self.code.end();
                B::code_block(lang.as_deref(), &content, &mut self.output);
            }
            TagEnd::List(true) => self.output.push_str("</ol>"),
            TagEnd::List(false) => self.output.push_str("</ul>"),
            TagEnd::FootnoteDefinition => self.footnotes.end_definition(&mut self.output),
            TagEnd::MetadataBlock(_) => self.in_metadata = false,
            TagEnd::Table => self.output.push_str("</tbody></table>"),
            TagEnd::TableHead => {
                self.output.push_str("</tr></thead><tbody>");
                self.table.end_head();
            }
            TagEnd::TableRow => self.output.push_str("</tr>"),
            TagEnd::TableCell => {
                let cell = if self.table.is_in_head() { "</th>" } else { "</td>" };
                self.output.push_str(cell);
                self.table.next_cell();
            }
            TagEnd::Link => self.push_inline("</a>"),
            TagEnd::Image => {
                if let Some(image) = self.image.end() {
                    let mut html = String::new();
                    B::image(&image.src, &image.alt, &image.title, &mut html);
                    self.push_inline(&html);
                }
            }
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        // Priority: metadata > code > image > heading > normal text
        if self.in_metadata {
            if let Some(metadata) = self.metadata.as_mut() {
                metadata.push_str(text);
            }
            return;
        }

        if self.code.is_active() {
            self.code.push_str(text);
            return;
        }

        if self.image.is_active() {
            self.image.push_str(text);
            return;
        }

        if self.heading.is_active() {
            self.heading.push_text(text);
            self.heading.push_html(&escape_html(text));
            return;
        }

        self.output.push_str(&escape_html(text));
    }

    fn inline_code(&mut self, code: &str) {
        if self.image.is_active() {
            self.image.push_str(code);
        } else if self.heading.is_active() {
            self.heading.push_text(code);
            self.heading
                .push_html(&format!("<code>{}</code>", escape_html(code)));
        } else {
            write!(self.output, "<code>{}</code>", escape_html(code)).unwrap();
        }
    }

    fn raw_html(&mut self, html: &str) {
        self.push_inline(html);
    }

    fn soft_break(&mut self) {
        if self.code.is_active() {
            self.code.push_newline();
        } else {
            self.output.push('\n');
        }
    }

    fn hard_break(&mut self) {
        B::hard_break(&mut self.output);
    }

    fn horizontal_rule(&mut self) {
        B::horizontal_rule(&mut self.output);
    }

    fn task_list_marker(&mut self, checked: bool) {
        B::task_list_marker(checked, &mut self.output);
    }

    fn footnote_reference(&mut self, label: &str) {
        let n = self.footnotes.number_for(label);
        let reference =
            format!(r##"<sup><a id="fnr.{n}" class="footref" href="#fn.{n}">{n}</a></sup>"##);
        self.push_inline(&reference);
    }
}

/// Opening and closing markup of elements that carry no attributes.
fn fixed_markup(tag: TagEnd) -> Option<(&'static str, &'static str)> {
    let markup = match tag {
        TagEnd::Item => ("<li>", "</li>"),
        TagEnd::Emphasis => ("<em>", "</em>"),
        TagEnd::Strong => ("<strong>", "</strong>"),
        TagEnd::Strikethrough => ("<s>", "</s>"),
        TagEnd::Superscript => ("<sup>", "</sup>"),
        TagEnd::Subscript => ("<sub>", "</sub>"),
        TagEnd::DefinitionList => ("<dl>", "</dl>"),
        TagEnd::DefinitionListTitle => ("<dt>", "</dt>"),
        TagEnd::DefinitionListDefinition => ("<dd>", "</dd>"),
        _ => return None,
    };
    Some(markup)
}

impl<B: RenderBackend> Default for MarkdownRenderer<B> {
    fn default() -> Self {
        Self::new()
    }
}
