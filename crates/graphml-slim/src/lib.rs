//! graphml-slim - shrink yFiles GraphML exports.
//!
//! Diagram exports from yFiles-based editors carry style resources, key
//! declarations, port geometry and rich-text label markup that downstream
//! tools rarely need. This crate strips all of that and leaves a small,
//! stable GraphML file with one plain-text label per node and edge, suitable
//! for version control.
//!
//! The work happens in three phases: load, transform and save. Each is
//! available on its own through [`Simplifier`], or all at once through
//! [`Simplifier::simplify`] and [`Simplifier::simplify_file`].

pub mod config;
pub mod serialize;
pub mod text;
pub mod transform;

mod error;

pub use graphml_slim_core::{Document, NamespaceBindings};

pub use error::SlimError;
pub use transform::SimplifyReport;

use std::{fs, path::Path};

use log::{debug, info, trace};

use graphml_slim_core::reader;

use config::AppConfig;

/// Loads, transforms and saves GraphML documents.
///
/// # Examples
///
/// ```rust
/// use graphml_slim::{Simplifier, config::AppConfig};
///
/// let source = r#"<graphml xmlns="http://graphml.graphdrawing.org/xmlns"
///     xmlns:y="http://www.yworks.com/xml/yfiles-common/3.0">
///   <key id="d4" for="node"/>
///   <graph id="G">
///     <node id="n0">
///       <data key="d4"><y:Label Text="&lt;p&gt;Start&lt;/p&gt;"/></data>
///       <port name="p0"/>
///     </node>
///   </graph>
/// </graphml>"#;
///
/// let simplifier = Simplifier::new(AppConfig::default());
/// let (xml, report) = simplifier.simplify(source).expect("Failed to simplify");
///
/// assert!(xml.contains("<y:Label.Text>Start</y:Label.Text>"));
/// assert_eq!(report.ports_removed, 1);
/// assert_eq!(report.key_definitions_removed, 1);
/// ```
#[derive(Debug)]
pub struct Simplifier {
    config: AppConfig,
    namespaces: NamespaceBindings,
}

impl Default for Simplifier {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl Simplifier {
    /// Create a simplifier with the given configuration.
    ///
    /// The namespace bindings written to the output are fixed to GraphML,
    /// `y` and `x` for the lifetime of the simplifier.
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            namespaces: NamespaceBindings::yfiles(),
        }
    }

    /// The configuration this simplifier runs with.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse GraphML source into a document.
    ///
    /// # Errors
    ///
    /// Returns [`SlimError::Xml`] with the source attached if the text is not
    /// well-formed, namespace-correct XML.
    pub fn load(&self, source: &str) -> Result<Document, SlimError> {
        info!(bytes = source.len(); "Parsing document");

        let document =
            reader::parse(source).map_err(|err| SlimError::new_xml_error(err, source))?;

        debug!("Document parsed successfully");
        trace!(document:?; "Parsed document");
        Ok(document)
    }

    /// Strip metadata, normalize labels and remove ports, in place.
    ///
    /// # Errors
    ///
    /// Returns [`SlimError::Config`] for an invalid key configuration and
    /// [`SlimError::Structure`] if the document is not GraphML or has no
    /// graph.
    pub fn transform(&self, document: &mut Document) -> Result<SimplifyReport, SlimError> {
        self.config.validate()?;
        transform::transform(document, self.config.keys())
    }

    /// Reduce namespace declarations and serialize the document.
    ///
    /// The number of elements and attributes dropped for being outside the
    /// emitted namespaces is added to `report`.
    ///
    /// # Errors
    ///
    /// Returns [`SlimError::Xml`] if the document cannot be written with the
    /// emitted namespace bindings.
    pub fn save(
        &self,
        document: &mut Document,
        report: &mut SimplifyReport,
    ) -> Result<String, SlimError> {
        let (xml, dropped) = serialize::save(document, &self.namespaces)?;
        report.foreign_items_dropped += dropped;
        Ok(xml)
    }

    /// Run all three phases on GraphML source text.
    ///
    /// # Errors
    ///
    /// Returns the first error of [`load`](Self::load),
    /// [`transform`](Self::transform) or [`save`](Self::save).
    pub fn simplify(&self, source: &str) -> Result<(String, SimplifyReport), SlimError> {
        let mut document = self.load(source)?;
        let mut report = self.transform(&mut document)?;
        let xml = self.save(&mut document, &mut report)?;

        info!(
            key_definitions = report.key_definitions_removed,
            shared_entries = report.shared_entries_removed,
            entries = report.entries_removed,
            ports = report.ports_removed,
            port_references = report.port_references_removed;
            "Document simplified"
        );
        Ok((xml, report))
    }

    /// Simplify the GraphML file at `input` and write the result to `output`.
    ///
    /// Nothing is written unless every phase succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`SlimError::Io`] if the input cannot be read or the output
    /// cannot be written, and any error of [`simplify`](Self::simplify).
    pub fn simplify_file(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
    ) -> Result<SimplifyReport, SlimError> {
        let input = input.as_ref();
        let output = output.as_ref();

        let source = fs::read_to_string(input)?;
        let (xml, report) = self.simplify(&source)?;
        fs::write(output, xml)?;

        info!(output_file = output.display().to_string(); "GraphML written");
        Ok(report)
    }
}
