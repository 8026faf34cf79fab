//! Static-site export of rendered documents.
//!
//! Turns a rendered document plus its metadata into a post for an
//! Octopress/Jekyll site: a fixed-order front matter block followed by the
//! body, with code blocks as `{% codeblock %}` shortcodes and draft posts
//! marked in both the title and the body.
//!
//! # Architecture
//!
//! - [`ExportOptions`]: per-document field values, usually read from the
//!   source's YAML metadata block
//! - [`FieldDefaults`]: fallbacks for unset fields, built once per batch
//! - [`FrontMatter`] and [`compose_body`]: the two halves of the output
//! - [`ExportBackend`]: page-level hooks over the renderer's
//!   [`RenderBackend`](octo_renderer::RenderBackend); [`OctopressBackend`]
//!   produces posts, [`HtmlBackend`](octo_renderer::HtmlBackend) plain HTML
//! - [`Exporter`]: drives one export from options and rendered content
//!
//! The filename helpers ([`date_prefix`], [`metadata_date`], [`dated_path`])
//! serve renaming posts after their publish date and are not part of the
//! export itself.

mod backend;
mod body;
mod code_block;
mod error;
mod exporter;
mod field;
mod filename;
mod front_matter;
mod options;
mod publish;

pub use backend::{ExportBackend, OctopressBackend};
pub use body::{BodyParts, PREVIEW_BANNER, compose_body};
pub use code_block::{CodeBlock, dedent, format_shortcode};
pub use error::ExportError;
pub use exporter::{DEFAULT_TOC_LEVELS, Exporter, source_options};
pub use field::{FieldDefaults, FieldResolver, format_list};
pub use filename::{date_prefix, dated_path, metadata_date, parse_user_date};
pub use front_matter::{FrontMatter, PREVIEW_TITLE_PREFIX};
pub use options::{ExportOptions, OptionValue, WITH_TOC};
pub use publish::PublishState;
