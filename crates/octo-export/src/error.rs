//! Export error type.

use octo_renderer::RenderError;

/// Error raised while exporting a document.
///
/// Field resolution itself never fails: missing values degrade to empty
/// strings or configured defaults. These variants carry failures of the
/// collaborators the export relies on.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Inline formatting of a metadata value failed.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// The document's metadata block is not valid YAML.
    #[error("Invalid metadata: {0}")]
    Metadata(String),

    /// The document has no `date` to derive a publish date from.
    #[error("Document has no date")]
    MissingDate,

    /// The `date` value could not be read as a calendar date.
    #[error("Unrecognized date: {0:?}")]
    InvalidDate(String),
}
