//! Error types for outline-core.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using ParseError.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Errors that can occur while reading an outline document.
///
/// Structural gaps inside a well-formed document (a topic without terms, a
/// term without details) are not errors; they just produce fewer cards.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("source not found: {}", path.display())]
    SourceNotFound { path: PathBuf },

    #[error("malformed outline document: {0}")]
    SourceMalformed(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<quick_xml::Error> for ParseError {
    fn from(err: quick_xml::Error) -> Self {
        Self::SourceMalformed(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for ParseError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Self::SourceMalformed(err.to_string())
    }
}
