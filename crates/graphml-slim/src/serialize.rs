//! The save phase: namespace minimization and serialization.

use log::{debug, warn};

use graphml_slim_core::{Document, Element, NamespaceBindings, writer};

use crate::error::SlimError;

/// Reduce the namespace declarations of `document` to `bindings`.
///
/// Every declaration in the tree is discarded and the root declares exactly
/// `bindings`. Elements and attributes in a namespace those bindings do not
/// cover can no longer be written, so they are removed. Returns how many
/// elements and attributes were removed.
pub fn minimize_namespaces(document: &mut Document, bindings: &NamespaceBindings) -> usize {
    let root = document.root_mut();

    let mut dropped = root.remove_descendants(&|element: &Element| {
        !bindings.covers(element.name().namespace())
    });
    root.walk_mut(&mut |element: &mut Element| {
        element.set_namespaces(Vec::new());
        dropped += element.retain_attributes(|attr| bindings.covers(attr.name().namespace()));
    });
    root.set_namespaces(bindings.to_vec());

    if dropped > 0 {
        warn!(dropped; "Dropped elements and attributes outside the emitted namespaces");
    }
    dropped
}

/// Minimize namespaces and serialize `document` to a UTF-8 string with an
/// XML declaration.
///
/// Returns the serialized text and the number of elements and attributes
/// dropped by [`minimize_namespaces`].
///
/// # Errors
///
/// Returns [`SlimError::Xml`] if the document still uses a namespace that
/// `bindings` does not bind, which can only happen for a root element in a
/// foreign namespace.
pub fn save(
    document: &mut Document,
    bindings: &NamespaceBindings,
) -> Result<(String, usize), SlimError> {
    let dropped = minimize_namespaces(document, bindings);
    let xml = writer::write(document)?;
    debug!(bytes = xml.len(); "Serialized document");
    Ok((xml, dropped))
}
