//! Export driver.

use std::marker::PhantomData;

use octo_renderer::{
    HtmlBackend, MarkdownInline, MarkdownRenderer, RenderResult, render_footnotes, render_toc,
};

use crate::backend::ExportBackend;
use crate::body::BodyParts;
use crate::error::ExportError;
use crate::field::FieldDefaults;
use crate::front_matter::FrontMatter;
use crate::options::ExportOptions;

/// Table of contents depth used when `with-toc` is `true`.
pub const DEFAULT_TOC_LEVELS: u8 = 3;

/// Exports documents through an [`ExportBackend`].
///
/// The exporter holds the settings shared by a batch of exports. Each call
/// works only on its own inputs, so one exporter can serve any number of
/// documents.
///
/// # Example
///
/// ```
/// use octo_export::{Exporter, FieldDefaults, OctopressBackend};
///
/// let exporter = Exporter::<OctopressBackend>::new(FieldDefaults::default());
/// let output = exporter
///     .export_source("---\ntitle: Hello\n---\n\nHi there.")
///     .unwrap();
/// assert!(output.starts_with("---\ntitle: \"Hello\"\n"));
/// assert!(output.ends_with("---\n<p>Hi there.</p>"));
/// ```
pub struct Exporter<B: ExportBackend> {
    defaults: FieldDefaults,
    toc_levels: u8,
    gfm: bool,
    _backend: PhantomData<B>,
}

impl<B: ExportBackend> Exporter<B> {
    /// Create an exporter with the given field defaults.
    #[must_use]
    pub fn new(defaults: FieldDefaults) -> Self {
        Self {
            defaults,
            toc_levels: DEFAULT_TOC_LEVELS,
            gfm: true,
            _backend: PhantomData,
        }
    }

    /// Set the table of contents depth used when `with-toc` is `true`.
    #[must_use]
    pub fn with_toc_levels(mut self, levels: u8) -> Self {
        self.toc_levels = levels;
        self
    }

    /// Enable or disable GitHub Flavored Markdown when rendering sources.
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    /// Export an already rendered document.
    ///
    /// The output is the backend's template applied to the resolved front
    /// matter and the assembled body.
    ///
    /// # Errors
    ///
    /// Returns an error if a metadata value fails inline formatting.
    pub fn export(
        &self,
        options: &ExportOptions,
        rendered: &RenderResult,
    ) -> Result<String, ExportError> {
        let front_matter = FrontMatter::build(options, &self.defaults, &MarkdownInline)?;

        let toc_depth = options.toc_depth(self.toc_levels);
        tracing::debug!(?toc_depth, state = %front_matter.state(), "Exporting document");
        let toc = toc_depth.map(|depth| render_toc(&rendered.toc, depth));
        let footnotes = render_footnotes(&rendered.footnotes);

        let body = B::inner_template(BodyParts {
            toc: toc.as_deref(),
            state: front_matter.state(),
            content: &rendered.html,
            footnotes: &footnotes,
        });
        Ok(B::template(&front_matter, &body))
    }

    /// Render a markdown source and export it.
    ///
    /// Options come from the source's leading YAML metadata block; a source
    /// without one exports with defaults only.
    ///
    /// # Errors
    ///
    /// Returns an error if the metadata block is malformed or a metadata
    /// value fails inline formatting.
    pub fn export_source(&self, markdown: &str) -> Result<String, ExportError> {
        let rendered = MarkdownRenderer::<B>::new()
            .with_gfm(self.gfm)
            .render_markdown(markdown);
        let options = ExportOptions::from_yaml(rendered.metadata.as_deref().unwrap_or_default())?;
        self.export(&options, &rendered)
    }
}

/// Read a markdown source's export options without exporting it.
///
/// # Errors
///
/// Returns [`ExportError::Metadata`] if the metadata block is malformed.
pub fn source_options(markdown: &str) -> Result<ExportOptions, ExportError> {
    let rendered = MarkdownRenderer::<HtmlBackend>::new().render_markdown(markdown);
    ExportOptions::from_yaml(rendered.metadata.as_deref().unwrap_or_default())
}
