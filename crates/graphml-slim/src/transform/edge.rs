//! Edge processing.

use log::trace;

use graphml_slim_core::{Document, Element, name::ns};

use super::{
    SimplifyReport,
    label::{LabelOutcome, normalize_label_entry},
};

/// Attributes naming the ports an edge attaches to.
const PORT_REFERENCES: [&str; 2] = ["sourceport", "targetport"];

/// Reduce every `<edge>` to at most one label entry and drop its
/// `sourceport`/`targetport` attributes.
///
/// Port references are removed whether or not a label was found.
pub fn process_edges(document: &mut Document, label_key: &str, report: &mut SimplifyReport) {
    document.root_mut().walk_mut(&mut |element: &mut Element| {
        if !element.is(ns::GRAPHML, "edge") {
            return;
        }
        report.edges += 1;

        let cleanup = normalize_label_entry(element, label_key);
        report.entries_removed += cleanup.removed;
        match &cleanup.outcome {
            LabelOutcome::Kept(_) => report.edge_labels += 1,
            LabelOutcome::Dropped => report.empty_labels_dropped += 1,
            LabelOutcome::Missing => {}
        }

        let port_references = PORT_REFERENCES
            .iter()
            .filter_map(|name| element.remove_attribute(name))
            .count();
        report.port_references_removed += port_references;

        trace!(
            source = element.attribute("source").unwrap_or_default(),
            target = element.attribute("target").unwrap_or_default(),
            label:? = cleanup.outcome,
            port_references;
            "Processed edge"
        );
    });
}
