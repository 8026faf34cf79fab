//! Rendering error type.

/// Error raised while rendering content.
///
/// The markdown renderer itself never fails; this type exists for
/// [`InlineFormatter`](crate::InlineFormatter) implementations that do,
/// so callers can propagate their failures unchanged.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Inline formatting of a single value failed.
    #[error("Failed to format {value:?}: {message}")]
    Inline {
        /// The raw value that was being formatted.
        value: String,
        /// Formatter-specific description of the failure.
        message: String,
    },
}
