//! The transform phase.
//!
//! Runs on a loaded [`Document`] in three steps:
//!
//! 1. [`strip_metadata`] removes `<key>` definitions and shared `data` entries.
//! 2. [`process_nodes`] reduces every node to its label entry and drops ports.
//! 3. [`process_edges`] does the same for edges and drops port references.
//!
//! Each step records what it removed in a [`SimplifyReport`].

mod edge;
mod label;
mod node;
mod strip;

pub use edge::process_edges;
pub use node::process_nodes;
pub use strip::strip_metadata;

use log::{debug, info};

use graphml_slim_core::{Document, name::ns};

use crate::{config::KeyConfig, error::SlimError};

/// Counts of what a simplification run changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimplifyReport {
    /// `<key>` definitions removed.
    pub key_definitions_removed: usize,
    /// `data` entries with the shared key removed.
    pub shared_entries_removed: usize,
    /// Nodes visited.
    pub nodes: usize,
    /// Nodes left with a normalized label entry.
    pub node_labels: usize,
    /// Edges visited.
    pub edges: usize,
    /// Edges left with a normalized label entry.
    pub edge_labels: usize,
    /// Non-label `data` entries removed from nodes and edges.
    pub entries_removed: usize,
    /// Label entries removed because they held no label text.
    pub empty_labels_dropped: usize,
    /// `<port>` elements removed from nodes.
    pub ports_removed: usize,
    /// `sourceport`/`targetport` attributes removed from edges.
    pub port_references_removed: usize,
    /// Elements and attributes dropped on save because their namespace is
    /// not one of the emitted bindings.
    pub foreign_items_dropped: usize,
}

/// Run all transform steps on `document`.
///
/// # Errors
///
/// Returns [`SlimError::Structure`] if the root is not a GraphML `graphml`
/// element or if the document contains no `graph` element. The document is
/// left untouched in that case.
pub fn transform(document: &mut Document, keys: &KeyConfig) -> Result<SimplifyReport, SlimError> {
    check_structure(document)?;

    let mut report = SimplifyReport::default();
    strip_metadata(document, keys.shared(), &mut report);
    debug!(
        key_definitions = report.key_definitions_removed,
        shared_entries = report.shared_entries_removed;
        "Metadata stripped"
    );

    process_nodes(document, keys.node_label(), &mut report);
    info!(nodes = report.nodes, labels = report.node_labels; "Processed nodes");

    process_edges(document, keys.edge_label(), &mut report);
    info!(edges = report.edges, labels = report.edge_labels; "Processed edges");

    Ok(report)
}

fn check_structure(document: &Document) -> Result<(), SlimError> {
    let root = document.root();
    if !root.is(ns::GRAPHML, "graphml") {
        return Err(SlimError::Structure(format!(
            "expected a <graphml> root element in namespace {}, found <{}>",
            ns::GRAPHML,
            root.name()
        )));
    }
    if root.find_descendant(ns::GRAPHML, "graph").is_none() {
        return Err(SlimError::Structure(
            "document contains no <graph> element".to_string(),
        ));
    }
    Ok(())
}
