//! Error adapter for converting SlimError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.
//!
//! XML reader errors carry a byte position into the input text. Those are
//! rendered with the surrounding source and a label at the offending offset;
//! every other error is rendered as a plain message with an error code.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use graphml_slim::SlimError;
use graphml_slim_core::XmlError;

/// Adapter for an XML error that points into the input text.
pub struct XmlDiagnosticAdapter<'a> {
    err: &'a XmlError,
    src: &'a str,
    position: usize,
}

impl<'a> XmlDiagnosticAdapter<'a> {
    /// Create a new adapter, or `None` if the error carries no usable position.
    pub fn new(err: &'a XmlError, src: &'a str) -> Option<Self> {
        if src.is_empty() {
            return None;
        }
        let position = err.position()?.min(src.len());
        Some(Self { err, src, position })
    }

    fn label(&self) -> &'static str {
        match self.err {
            XmlError::UnboundPrefix { .. } => "undeclared prefix",
            _ => "here",
        }
    }
}

impl fmt::Debug for XmlDiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("XmlDiagnosticAdapter")
            .field("err", &self.err)
            .field("position", &self.position)
            .finish()
    }
}

impl fmt::Display for XmlDiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.err, f)
    }
}

impl std::error::Error for XmlDiagnosticAdapter<'_> {}

impl MietteDiagnostic for XmlDiagnosticAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("graphml_slim::xml"))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self.err {
            XmlError::UnboundPrefix { prefix, .. } => Some(Box::new(format!(
                "declare the prefix with an `xmlns:{prefix}` attribute"
            ))),
            _ => None,
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = SourceSpan::new(self.position.into(), 0);
        Some(Box::new(std::iter::once(
            LabeledSpan::new_primary_with_span(Some(self.label().to_string()), span),
        )))
    }
}

/// Adapter for [`SlimError`] values without a source location.
pub struct ErrorAdapter<'a>(pub &'a SlimError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            SlimError::Io(_) => "graphml_slim::io",
            SlimError::Xml { .. } => "graphml_slim::xml",
            SlimError::Structure(_) => "graphml_slim::structure",
            SlimError::Config(_) => "graphml_slim::config",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            SlimError::Structure(_) => Some(Box::new(
                "the input must be a GraphML document with a <graph> element",
            )),
            SlimError::Config(_) => Some(Box::new(
                "check the [keys] section of the configuration file and the key flags",
            )),
            _ => None,
        }
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// An XML error with a location in the input text.
    Diagnostic(XmlDiagnosticAdapter<'a>),
    /// An error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Diagnostic(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Diagnostic(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Diagnostic(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Diagnostic(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a [`SlimError`] into a list of reportable errors.
///
/// A [`SlimError::Xml`] with a position in its source text becomes a
/// [`Reportable::Diagnostic`]; everything else becomes a single
/// [`Reportable::Error`].
pub fn to_reportables(err: &SlimError) -> Vec<Reportable<'_>> {
    if let SlimError::Xml { err: xml_err, src } = err {
        if let Some(adapter) = XmlDiagnosticAdapter::new(xml_err, src) {
            return vec![Reportable::Diagnostic(adapter)];
        }
    }
    vec![Reportable::Error(ErrorAdapter(err))]
}
