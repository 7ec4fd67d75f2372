//! Namespace-aware XML reader.
//!
//! Builds a [`Document`] from source text with `quick-xml`. Every element and
//! attribute name is resolved against the `xmlns` declarations in scope, so
//! later stages can match on namespace URIs regardless of which prefixes a
//! file happens to use.
//!
//! Comments, processing instructions, the doctype and the XML declaration
//! are skipped. Whitespace-only text is kept as-is inside the root element.

use std::fmt;

use log::{debug, trace};
use quick_xml::{
    Reader,
    events::{BytesStart, Event},
};

use crate::{
    document::{Attribute, Document, Element, XmlNode},
    error::XmlError,
    name::{NamespaceBinding, QName, ns},
};

/// Parse `source` into a [`Document`].
///
/// # Errors
///
/// Returns [`XmlError::Syntax`] for malformed markup, unknown entities,
/// unclosed elements or content outside the root element,
/// [`XmlError::UnboundPrefix`] for names using an undeclared prefix, and
/// [`XmlError::MissingRoot`] if the source contains no element at all.
pub fn parse(source: &str) -> Result<Document, XmlError> {
    let mut reader = Reader::from_str(source);
    let mut scopes = Scopes::default();
    let mut open: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let position = reader.buffer_position() as usize;
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(err) => return Err(syntax_error(err, reader.error_position() as usize)),
        };

        match event {
            Event::Start(start) => {
                let element = open_element(&start, &mut scopes, position)?;
                trace!(name:% = element.name(); "Opened element");
                open.push(element);
            }
            Event::Empty(start) => {
                let element = open_element(&start, &mut scopes, position)?;
                scopes.pop();
                attach(element, &mut open, &mut root, position)?;
            }
            Event::End(_) => {
                scopes.pop();
                let element = open.pop().ok_or_else(|| XmlError::Syntax {
                    message: "closing tag without matching opening tag".to_string(),
                    position,
                })?;
                attach(element, &mut open, &mut root, position)?;
            }
            Event::Text(text) => {
                let text = text
                    .unescape()
                    .map_err(|err| syntax_error(err, position))?;
                match open.last_mut() {
                    Some(parent) => parent.push_node(XmlNode::Text(text.into_owned())),
                    None if text.trim().is_empty() => {}
                    None => {
                        return Err(XmlError::Syntax {
                            message: "text outside of the root element".to_string(),
                            position,
                        });
                    }
                }
            }
            Event::CData(cdata) => {
                let content = String::from_utf8_lossy(&cdata.into_inner()).into_owned();
                match open.last_mut() {
                    Some(parent) => parent.push_node(XmlNode::CData(content)),
                    None => {
                        return Err(XmlError::Syntax {
                            message: "CDATA section outside of the root element".to_string(),
                            position,
                        });
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(unclosed) = open.last() {
        return Err(XmlError::Syntax {
            message: format!("element <{}> is never closed", unclosed.name()),
            position: source.len(),
        });
    }

    let root = root.ok_or(XmlError::MissingRoot)?;
    debug!(root:% = root.name(); "Document parsed");
    Ok(Document::new(root))
}

/// Build an element from a start tag, pushing its namespace scope.
fn open_element(
    start: &BytesStart<'_>,
    scopes: &mut Scopes,
    position: usize,
) -> Result<Element, XmlError> {
    let mut declarations = Vec::new();
    let mut attributes = Vec::new();

    for attr in start.attributes() {
        let attr = attr.map_err(|err| syntax_error(err, position))?;
        let key = utf8(attr.key.as_ref(), position)?.to_string();
        let value = attr
            .unescape_value()
            .map_err(|err| syntax_error(err, position))?
            .into_owned();

        if key == "xmlns" {
            declarations.push(NamespaceBinding::default_namespace(value));
        } else if let Some(prefix) = key.strip_prefix("xmlns:") {
            declarations.push(NamespaceBinding::prefixed(prefix, value));
        } else {
            attributes.push((key, value));
        }
    }

    scopes.push(declarations.clone());

    let raw_name = start.name();
    let name = scopes.resolve(utf8(raw_name.as_ref(), position)?, true, position)?;

    let mut element = Element::new(name);
    for binding in declarations {
        element.push_namespace(binding);
    }
    for (key, value) in attributes {
        let name = scopes.resolve(&key, false, position)?;
        element.push_attribute(Attribute::new(name, value));
    }

    Ok(element)
}

/// Hand a finished element to its parent, or make it the root.
fn attach(
    element: Element,
    open: &mut [Element],
    root: &mut Option<Element>,
    position: usize,
) -> Result<(), XmlError> {
    if let Some(parent) = open.last_mut() {
        parent.push_element(element);
        return Ok(());
    }
    if root.is_some() {
        return Err(XmlError::Syntax {
            message: format!("second root element <{}>", element.name()),
            position,
        });
    }
    *root = Some(element);
    Ok(())
}

fn utf8(bytes: &[u8], position: usize) -> Result<&str, XmlError> {
    std::str::from_utf8(bytes).map_err(|err| syntax_error(err, position))
}

fn syntax_error(err: impl fmt::Display, position: usize) -> XmlError {
    XmlError::Syntax {
        message: err.to_string(),
        position,
    }
}

/// Stack of namespace declarations, one frame per open element.
#[derive(Debug, Default)]
struct Scopes {
    frames: Vec<Vec<NamespaceBinding>>,
}

impl Scopes {
    fn push(&mut self, frame: Vec<NamespaceBinding>) {
        self.frames.push(frame);
    }

    fn pop(&mut self) {
        self.frames.pop();
    }

    fn lookup(&self, prefix: Option<&str>) -> Option<&str> {
        self.frames
            .iter()
            .rev()
            .flat_map(|frame| frame.iter())
            .find(|binding| binding.prefix() == prefix)
            .map(NamespaceBinding::uri)
    }

    /// Resolve a raw `prefix:local` name.
    ///
    /// Unprefixed element names take the default namespace; unprefixed
    /// attribute names are in no namespace. An empty URI undeclares the
    /// default namespace.
    fn resolve(&self, raw: &str, is_element: bool, position: usize) -> Result<QName, XmlError> {
        match raw.split_once(':') {
            Some((prefix, local)) => {
                let namespace = match prefix {
                    "xml" => ns::XML,
                    _ => self
                        .lookup(Some(prefix))
                        .filter(|uri| !uri.is_empty())
                        .ok_or_else(|| XmlError::UnboundPrefix {
                            prefix: prefix.to_string(),
                            position,
                        })?,
                };
                Ok(QName::new(
                    Some(prefix.to_string()),
                    Some(namespace.to_string()),
                    local,
                ))
            }
            None if is_element => {
                let namespace = self
                    .lookup(None)
                    .filter(|uri| !uri.is_empty())
                    .map(str::to_string);
                Ok(QName::new(None, namespace, raw))
            }
            None => Ok(QName::local(raw)),
        }
    }
}
