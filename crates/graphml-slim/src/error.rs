//! Error types for graphml-slim operations.
//!
//! This module provides the main error type [`SlimError`] which wraps the
//! failure conditions of the load, transform and save phases.

use std::io;

use thiserror::Error;

use graphml_slim_core::XmlError;

/// The main error type for graphml-slim operations.
///
/// # Diagnostic Variants
///
/// The `Xml` variant keeps the source text next to the reader error so the
/// byte position it carries can be rendered as a labeled source span.
#[derive(Debug, Error)]
pub enum SlimError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Xml { err: XmlError, src: String },

    #[error("Structure error: {0}")]
    Structure(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl SlimError {
    /// Create a new `Xml` error with the associated source text.
    pub fn new_xml_error(err: XmlError, src: impl Into<String>) -> Self {
        Self::Xml {
            err,
            src: src.into(),
        }
    }
}

impl From<XmlError> for SlimError {
    /// Wrap an error that is not tied to any source text, such as a writer error.
    fn from(err: XmlError) -> Self {
        Self::Xml {
            err,
            src: String::new(),
        }
    }
}
