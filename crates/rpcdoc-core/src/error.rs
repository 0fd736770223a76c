//! Error types for reference generation.

use std::path::PathBuf;

/// Error while reading or tokenizing a single page.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PageError {
    /// Markup could not be tokenized.
    #[error("markup error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Text could not be decoded.
    #[error("encoding error: {0}")]
    Encoding(#[from] quick_xml::encoding::EncodingError),

    /// Page could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Fatal error that aborts document generation.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// The documentation root does not exist.
    #[error("documentation root not found: {}", .path.display())]
    MissingRoot {
        /// Path that was expected to hold the generated pages.
        path: PathBuf,
    },

    /// Module page pattern is not a valid glob.
    #[error("invalid module page pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// A required page failed to load.
    #[error("failed to load {page}: {source}")]
    Page {
        /// Page identifier relative to the documentation root.
        page: String,
        /// Underlying page error.
        #[source]
        source: PageError,
    },
}
