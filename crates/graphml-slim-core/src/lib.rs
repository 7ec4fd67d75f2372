//! graphml-slim core types
//!
//! This crate provides the XML plumbing for graphml-slim:
//!
//! - **Names**: Namespace-resolved element and attribute names ([`name::QName`])
//!   and the well-known GraphML/yFiles namespaces ([`name::ns`])
//! - **Document**: An owned, mutable element tree ([`document::Document`])
//! - **Reader**: Namespace-aware parsing built on `quick-xml` ([`reader::parse`])
//! - **Writer**: Serialization with an XML declaration ([`writer::write`])

pub mod document;
pub mod error;
pub mod name;
pub mod reader;
pub mod writer;

pub use document::{Document, Element, XmlNode};
pub use error::XmlError;
pub use name::{NamespaceBinding, NamespaceBindings, QName};
