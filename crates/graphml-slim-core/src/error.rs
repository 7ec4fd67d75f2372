//! Error types for reading and writing XML documents.

use std::io;

use thiserror::Error;

/// Errors raised while reading or writing a [`Document`](crate::Document).
///
/// Reader errors carry the byte `position` in the source text at which the
/// problem was detected, so callers can point at the offending location.
#[derive(Debug, Error)]
pub enum XmlError {
    #[error("malformed XML: {message}")]
    Syntax { message: String, position: usize },

    #[error("namespace prefix `{prefix}` is not declared")]
    UnboundPrefix { prefix: String, position: usize },

    #[error("document has no root element")]
    MissingRoot,

    #[error("no prefix is bound to namespace `{0}`")]
    UnboundNamespace(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl XmlError {
    /// Byte offset in the source text, for errors raised by the reader.
    pub fn position(&self) -> Option<usize> {
        match self {
            Self::Syntax { position, .. } | Self::UnboundPrefix { position, .. } => Some(*position),
            Self::MissingRoot | Self::UnboundNamespace(_) | Self::Io(_) => None,
        }
    }
}
