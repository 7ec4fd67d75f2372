//! Removal of schema declarations and shared style data.

use graphml_slim_core::{Document, Element, name::ns};

use super::SimplifyReport;

/// Remove every `<key>` element and every `data` entry keyed `shared_key`,
/// wherever they are nested.
///
/// Running this twice leaves the document as the first run did.
pub fn strip_metadata(document: &mut Document, shared_key: &str, report: &mut SimplifyReport) {
    let root = document.root_mut();

    report.key_definitions_removed +=
        root.remove_descendants(&|element: &Element| element.is(ns::GRAPHML, "key"));

    report.shared_entries_removed += root.remove_descendants(&|element: &Element| {
        element.is(ns::GRAPHML, "data") && element.attribute("key") == Some(shared_key)
    });
}
