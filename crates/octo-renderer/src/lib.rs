//! Trait-based markdown renderer with pluggable backends.
//!
//! This crate provides a generic [`MarkdownRenderer`] that produces HTML
//! through the [`RenderBackend`] trait. It is the base rendering strategy
//! that export backends layer their own hooks over.
//!
//! # Architecture
//!
//! - [`HtmlBackend`]: Produces semantic HTML5 code blocks, blockquotes and images
//!
//! Shared functionality (tables, lists, inline formatting, headings,
//! footnotes) is handled by the generic renderer, while format-specific
//! elements (code blocks, blockquotes, images) are delegated to the backend.
//!
//! Besides the HTML body, a render pass collects everything a document
//! exporter needs to assemble a page: table of contents entries, footnote
//! definitions and the raw YAML metadata block.
//!
//! # Example
//!
//! ```
//! use octo_renderer::{HtmlBackend, MarkdownRenderer};
//!
//! let markdown = "---\ntitle: Hello\n---\n\n## Intro\n\n**Bold** text";
//! let result = MarkdownRenderer::<HtmlBackend>::new().render_markdown(markdown);
//! assert!(result.metadata.is_some_and(|m| m.contains("title: Hello")));
//! assert_eq!(result.toc.len(), 1);
//! ```

mod backend;
mod error;
mod footnote;
mod html;
mod inline;
mod renderer;
mod state;
mod toc;
mod util;

pub use backend::RenderBackend;
pub use error::RenderError;
pub use footnote::{Footnote, render_footnotes};
pub use html::HtmlBackend;
pub use inline::{InlineFormatter, MarkdownInline};
pub use renderer::{MarkdownRenderer, RenderResult};
pub use state::{TocEntry, escape_html, slugify};
pub use toc::render_toc;
