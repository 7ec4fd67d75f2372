//! XML writer.
//!
//! Serializes a [`Document`] as UTF-8 with an XML declaration. Prefixes are
//! chosen from the namespace declarations stored on the elements being
//! written: the writer never invents a declaration, so every namespace used
//! in the tree must be declared on the element or one of its ancestors.

use std::{fmt, io};

use log::debug;
use quick_xml::{
    Writer,
    escape::partial_escape,
    events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};

use crate::{
    document::{Document, Element, XmlNode},
    error::XmlError,
    name::{NamespaceBinding, QName, ns},
};

/// Serialize `document` to a string, starting with
/// `<?xml version="1.0" encoding="UTF-8"?>`.
///
/// # Errors
///
/// Returns [`XmlError::UnboundNamespace`] if an element or attribute uses a
/// namespace that no declaration in scope binds.
pub fn write(document: &Document) -> Result<String, XmlError> {
    let mut writer = Writer::new(Vec::new());

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(write_error)?;
    writer
        .write_event(Event::Text(BytesText::from_escaped("\n")))
        .map_err(write_error)?;

    let mut scopes = Vec::new();
    write_element(&mut writer, document.root(), &mut scopes)?;

    let bytes = writer.into_inner();
    debug!(bytes = bytes.len(); "Document serialized");
    String::from_utf8(bytes).map_err(|err| XmlError::Io(io::Error::other(err)))
}

fn write_element<'a>(
    writer: &mut Writer<Vec<u8>>,
    element: &'a Element,
    scopes: &mut Vec<&'a [NamespaceBinding]>,
) -> Result<(), XmlError> {
    scopes.push(element.namespaces());

    let name = qualified_name(element.name(), scopes, true)?;
    let mut start = BytesStart::new(name.as_str());
    for binding in element.namespaces() {
        start.push_attribute((binding.attribute_name().as_str(), binding.uri()));
    }
    for attr in element.attributes() {
        let key = qualified_name(attr.name(), scopes, false)?;
        start.push_attribute((key.as_str(), attr.value()));
    }

    if element.children().is_empty() {
        writer
            .write_event(Event::Empty(start))
            .map_err(write_error)?;
    } else {
        writer
            .write_event(Event::Start(start))
            .map_err(write_error)?;
        for child in element.children() {
            match child {
                XmlNode::Element(child) => write_element(writer, child, scopes)?,
                XmlNode::Text(text) => writer
                    .write_event(Event::Text(BytesText::from_escaped(partial_escape(
                        text.as_str(),
                    ))))
                    .map_err(write_error)?,
                XmlNode::CData(text) => writer
                    .write_event(Event::CData(BytesCData::new(text.as_str())))
                    .map_err(write_error)?,
            }
        }
        writer
            .write_event(Event::End(BytesEnd::new(name.as_str())))
            .map_err(write_error)?;
    }

    scopes.pop();
    Ok(())
}

/// Render `name` using a prefix bound in `scopes`.
///
/// The prefix the name was read with wins when it is still bound to the same
/// namespace; otherwise the innermost usable binding is taken. Attributes
/// never use the default namespace.
fn qualified_name(
    name: &QName,
    scopes: &[&[NamespaceBinding]],
    is_element: bool,
) -> Result<String, XmlError> {
    let Some(uri) = name.namespace() else {
        return Ok(name.local_name().to_string());
    };
    if uri == ns::XML {
        return Ok(format!("xml:{}", name.local_name()));
    }

    let candidates: Vec<Option<&str>> = scopes
        .iter()
        .rev()
        .flat_map(|frame| frame.iter())
        .filter(|binding| binding.uri() == uri)
        .filter(|binding| is_element || binding.prefix().is_some())
        .filter(|binding| effective_uri(scopes, binding.prefix()) == Some(uri))
        .map(NamespaceBinding::prefix)
        .collect();

    let prefix = candidates
        .iter()
        .find(|prefix| **prefix == name.prefix())
        .or_else(|| candidates.first())
        .ok_or_else(|| XmlError::UnboundNamespace(uri.to_string()))?;

    Ok(match prefix {
        Some(prefix) => format!("{prefix}:{}", name.local_name()),
        None => name.local_name().to_string(),
    })
}

/// The namespace `prefix` currently resolves to, taking shadowing into account.
fn effective_uri<'a>(scopes: &[&'a [NamespaceBinding]], prefix: Option<&str>) -> Option<&'a str> {
    scopes
        .iter()
        .rev()
        .flat_map(|frame| frame.iter())
        .find(|binding| binding.prefix() == prefix)
        .map(NamespaceBinding::uri)
}

fn write_error(err: impl fmt::Display) -> XmlError {
    XmlError::Io(io::Error::other(err.to_string()))
}
