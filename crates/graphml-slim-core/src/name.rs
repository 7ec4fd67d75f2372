//! Qualified names and namespace bindings.
//!
//! Names are resolved against the namespace declarations in scope when a
//! document is read. After that, code matches elements by namespace URI and
//! local name; the prefix is kept only as a hint for diagnostics.

use std::fmt;

/// Well-known namespace URIs.
pub mod ns {
    /// The GraphML namespace, bound as the default namespace.
    pub const GRAPHML: &str = "http://graphml.graphdrawing.org/xmlns";
    /// yFiles common types (`y:`), including labels.
    pub const YFILES: &str = "http://www.yworks.com/xml/yfiles-common/3.0";
    /// yFiles markup extensions (`x:`).
    pub const MARKUP: &str = "http://www.yworks.com/xml/yfiles-common/markup/3.0";
    /// yFiles for HTML XAML types (`yjs:`). Accepted on read only.
    pub const YJS: &str = "http://www.yworks.com/xml/yfiles-for-html/3.0/xaml";
    /// The `yjs:` namespace of yFiles for HTML 2.x exports. Accepted on read only.
    pub const YJS_V2: &str = "http://www.yworks.com/xml/yfiles-for-html/2.0/xaml";
    /// The implicitly bound `xml:` namespace.
    pub const XML: &str = "http://www.w3.org/XML/1998/namespace";
}

/// A namespace-resolved element or attribute name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QName {
    prefix: Option<String>,
    namespace: Option<String>,
    local: String,
}

impl QName {
    /// Create a name with a resolved namespace and the prefix it was read with.
    pub fn new(prefix: Option<String>, namespace: Option<String>, local: impl Into<String>) -> Self {
        Self {
            prefix,
            namespace,
            local: local.into(),
        }
    }

    /// Create a name in `namespace` with no particular prefix.
    pub fn namespaced(namespace: impl Into<String>, local: impl Into<String>) -> Self {
        Self {
            prefix: None,
            namespace: Some(namespace.into()),
            local: local.into(),
        }
    }

    /// Create a name in no namespace, as used by unprefixed attributes.
    pub fn local(local: impl Into<String>) -> Self {
        Self {
            prefix: None,
            namespace: None,
            local: local.into(),
        }
    }

    /// The prefix this name was written with in the source, if any.
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn local_name(&self) -> &str {
        &self.local
    }

    /// Check whether this name is `local` in `namespace`.
    pub fn is(&self, namespace: &str, local: &str) -> bool {
        self.namespace.as_deref() == Some(namespace) && self.local == local
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.prefix {
            Some(prefix) => write!(f, "{prefix}:{}", self.local),
            None => write!(f, "{}", self.local),
        }
    }
}

/// A single `xmlns` / `xmlns:prefix` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceBinding {
    prefix: Option<String>,
    uri: String,
}

impl NamespaceBinding {
    /// Bind `uri` as the default namespace.
    pub fn default_namespace(uri: impl Into<String>) -> Self {
        Self {
            prefix: None,
            uri: uri.into(),
        }
    }

    /// Bind `uri` to `prefix`.
    pub fn prefixed(prefix: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
            uri: uri.into(),
        }
    }

    /// The bound prefix, or `None` for the default namespace.
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// The attribute name used to declare this binding.
    pub fn attribute_name(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("xmlns:{prefix}"),
            None => "xmlns".to_string(),
        }
    }
}

/// An immutable set of namespace bindings.
///
/// The set is fixed once per run; it is never extended while a document is
/// being processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceBindings {
    bindings: Vec<NamespaceBinding>,
}

impl NamespaceBindings {
    /// Create a binding set. Later duplicates of a prefix are ignored.
    pub fn new(bindings: impl IntoIterator<Item = NamespaceBinding>) -> Self {
        let mut unique: Vec<NamespaceBinding> = Vec::new();
        for binding in bindings {
            if unique.iter().all(|b| b.prefix != binding.prefix) {
                unique.push(binding);
            }
        }
        Self { bindings: unique }
    }

    /// The three bindings emitted on simplified documents: GraphML as the
    /// default namespace, `y` and `x`.
    pub fn yfiles() -> Self {
        Self::new([
            NamespaceBinding::default_namespace(ns::GRAPHML),
            NamespaceBinding::prefixed("y", ns::YFILES),
            NamespaceBinding::prefixed("x", ns::MARKUP),
        ])
    }

    pub fn iter(&self) -> impl Iterator<Item = &NamespaceBinding> {
        self.bindings.iter()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Whether an element or attribute in `namespace` can be written with
    /// these bindings alone.
    ///
    /// `None` (no namespace) and the `xml:` namespace are always expressible.
    pub fn covers(&self, namespace: Option<&str>) -> bool {
        match namespace {
            None => true,
            Some(ns::XML) => true,
            Some(uri) => self.bindings.iter().any(|b| b.uri == uri),
        }
    }

    pub fn to_vec(&self) -> Vec<NamespaceBinding> {
        self.bindings.clone()
    }
}
