//! Owned XML element tree.
//!
//! The tree is built once by the [reader](crate::reader), mutated in place,
//! and handed to the [writer](crate::writer). Only the parts of XML needed to
//! carry GraphML content are represented: elements, attributes, namespace
//! declarations, text and CDATA sections.

use crate::name::{NamespaceBinding, QName};

/// A parsed XML document with a single root element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    root: Element,
}

impl Document {
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }

    pub fn into_root(self) -> Element {
        self.root
    }
}

/// A child of an [`Element`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element(Element),
    /// Character data, stored unescaped.
    Text(String),
    /// Contents of a `<![CDATA[...]]>` section, without the markers.
    CData(String),
}

impl XmlNode {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            XmlNode::Element(element) => Some(element),
            XmlNode::Text(_) | XmlNode::CData(_) => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            XmlNode::Element(element) => Some(element),
            XmlNode::Text(_) | XmlNode::CData(_) => None,
        }
    }

    /// Whether this node is text consisting only of whitespace.
    fn is_blank_text(&self) -> bool {
        matches!(self, XmlNode::Text(text) if text.trim().is_empty())
    }
}

/// An attribute with its unescaped value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    name: QName,
    value: String,
}

impl Attribute {
    pub fn new(name: QName, value: impl Into<String>) -> Self {
        Self {
            name,
            value: value.into(),
        }
    }

    pub fn name(&self) -> &QName {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// An XML element.
///
/// Namespace declarations made on the element are kept apart from its
/// attributes in [`Element::namespaces`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: QName,
    attributes: Vec<Attribute>,
    namespaces: Vec<NamespaceBinding>,
    children: Vec<XmlNode>,
}

impl Element {
    /// Create an empty element.
    pub fn new(name: QName) -> Self {
        Self {
            name,
            attributes: Vec::new(),
            namespaces: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &QName {
        &self.name
    }

    /// Check whether this element is `local` in `namespace`.
    pub fn is(&self, namespace: &str, local: &str) -> bool {
        self.name.is(namespace, local)
    }

    // =========================================================================
    // Attributes
    // =========================================================================

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Value of the unprefixed attribute `local`, if present.
    pub fn attribute(&self, local: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name.namespace().is_none() && attr.name.local_name() == local)
            .map(Attribute::value)
    }

    /// Set the unprefixed attribute `local`, replacing an existing value.
    pub fn set_attribute(&mut self, local: &str, value: impl Into<String>) {
        let value = value.into();
        match self
            .attributes
            .iter_mut()
            .find(|attr| attr.name.namespace().is_none() && attr.name.local_name() == local)
        {
            Some(attr) => attr.value = value,
            None => self.attributes.push(Attribute::new(QName::local(local), value)),
        }
    }

    /// Remove the unprefixed attribute `local`, returning its value.
    pub fn remove_attribute(&mut self, local: &str) -> Option<String> {
        let index = self
            .attributes
            .iter()
            .position(|attr| attr.name.namespace().is_none() && attr.name.local_name() == local)?;
        Some(self.attributes.remove(index).value)
    }

    /// Append an attribute without checking for duplicates.
    pub fn push_attribute(&mut self, attribute: Attribute) {
        self.attributes.push(attribute);
    }

    /// Keep only the attributes matching `keep`, returning how many were removed.
    pub fn retain_attributes(&mut self, mut keep: impl FnMut(&Attribute) -> bool) -> usize {
        let before = self.attributes.len();
        self.attributes.retain(|attr| keep(attr));
        before - self.attributes.len()
    }

    // =========================================================================
    // Namespace declarations
    // =========================================================================

    /// Namespace declarations made on this element.
    pub fn namespaces(&self) -> &[NamespaceBinding] {
        &self.namespaces
    }

    /// Replace the namespace declarations made on this element.
    pub fn set_namespaces(&mut self, namespaces: Vec<NamespaceBinding>) {
        self.namespaces = namespaces;
    }

    pub fn push_namespace(&mut self, binding: NamespaceBinding) {
        self.namespaces.push(binding);
    }

    // =========================================================================
    // Children
    // =========================================================================

    pub fn children(&self) -> &[XmlNode] {
        &self.children
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(XmlNode::as_element)
    }

    pub fn child_elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(XmlNode::as_element_mut)
    }

    /// Concatenated direct text and CDATA content.
    ///
    /// Text inside child elements is not included.
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|child| match child {
                XmlNode::Text(text) | XmlNode::CData(text) => Some(text.as_str()),
                XmlNode::Element(_) => None,
            })
            .collect()
    }

    /// First descendant (pre-order, excluding `self`) that is `local` in `namespace`.
    pub fn find_descendant(&self, namespace: &str, local: &str) -> Option<&Element> {
        self.find_descendant_by(&|element: &Element| element.is(namespace, local))
    }

    /// First descendant (pre-order, excluding `self`) matching `predicate`.
    pub fn find_descendant_by<F>(&self, predicate: &F) -> Option<&Element>
    where
        F: Fn(&Element) -> bool,
    {
        for child in self.child_elements() {
            if predicate(child) {
                return Some(child);
            }
            if let Some(found) = child.find_descendant_by(predicate) {
                return Some(found);
            }
        }
        None
    }

    pub fn push_node(&mut self, node: XmlNode) {
        self.children.push(node);
    }

    pub fn push_element(&mut self, element: Element) {
        self.children.push(XmlNode::Element(element));
    }

    pub fn push_text(&mut self, text: impl Into<String>) {
        self.children.push(XmlNode::Text(text.into()));
    }

    pub fn clear_children(&mut self) {
        self.children.clear();
    }

    /// Remove the direct child elements matching `predicate` and return them
    /// in document order.
    ///
    /// Matches are collected first and removed in a second pass. Whitespace
    /// text that directly follows a removed element goes with it, so the
    /// surrounding indentation does not pile up as blank lines.
    pub fn remove_child_elements(
        &mut self,
        mut predicate: impl FnMut(&Element) -> bool,
    ) -> Vec<Element> {
        let mut doomed = Vec::new();
        for (index, child) in self.children.iter().enumerate() {
            if child.as_element().is_some_and(&mut predicate) {
                doomed.push(index);
                if self
                    .children
                    .get(index + 1)
                    .is_some_and(XmlNode::is_blank_text)
                {
                    doomed.push(index + 1);
                }
            }
        }

        let mut removed = Vec::new();
        for index in doomed.into_iter().rev() {
            if let XmlNode::Element(element) = self.children.remove(index) {
                removed.push(element);
            }
        }
        removed.reverse();
        removed
    }

    /// Remove every descendant element matching `predicate`, at any depth.
    ///
    /// Returns the number of matching elements removed. Descendants of a
    /// removed element are not counted.
    pub fn remove_descendants<F>(&mut self, predicate: &F) -> usize
    where
        F: Fn(&Element) -> bool,
    {
        let mut removed = self.remove_child_elements(predicate).len();
        for child in self.child_elements_mut() {
            removed += child.remove_descendants(predicate);
        }
        removed
    }

    /// Visit this element and all descendant elements in pre-order.
    pub fn walk<F>(&self, visit: &mut F)
    where
        F: FnMut(&Element),
    {
        visit(self);
        for child in self.child_elements() {
            child.walk(visit);
        }
    }

    /// Visit this element and all descendant elements in pre-order, mutably.
    ///
    /// Children are visited after `visit` returns for their parent, so
    /// changes the visitor makes to an element's children are seen by the
    /// rest of the walk.
    pub fn walk_mut<F>(&mut self, visit: &mut F)
    where
        F: FnMut(&mut Element),
    {
        visit(self);
        for child in self.child_elements_mut() {
            child.walk_mut(visit);
        }
    }
}
