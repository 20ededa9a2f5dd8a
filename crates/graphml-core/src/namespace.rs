//! Namespace registry and type dispatch.
//!
//! A foreign vocabulary (yWorks, a UML extension, ...) plugs into the loader
//! by registering a [`NamespaceDescriptor`] under its URI. The descriptor maps
//! local tag names to representation constructors and may carry a setup hook
//! that runs once per document after the hierarchy is assembled.

use log::{debug, warn};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, LazyLock};

use crate::error::RepresentationResult;
use crate::model::{Document, ElementKind, Representation};
use crate::parse::{GRAPHML_NAMESPACE, RawElement};
use crate::yworks;

/// Builds a representation from the typed element (e.g. `<y:ShapeNode>`).
pub type RepresentationConstructor = fn(&RawElement) -> RepresentationResult<Representation>;

/// Document-wide post-processing, given the document and the root markup.
pub type SetupHook = Arc<dyn Fn(&mut Document, &RawElement) + Send + Sync>;

pub struct NamespaceDescriptor {
    uri: String,
    constructors: BTreeMap<String, RepresentationConstructor>,
    setup: Option<SetupHook>,
}

impl fmt::Debug for NamespaceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamespaceDescriptor")
            .field("uri", &self.uri)
            .field("constructors", &self.constructors.keys().collect::<Vec<_>>())
            .field("setup", &self.setup.is_some())
            .finish()
    }
}

impl NamespaceDescriptor {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            constructors: BTreeMap::new(),
            setup: None,
        }
    }

    pub fn with_constructor(
        mut self,
        tag: impl Into<String>,
        constructor: RepresentationConstructor,
    ) -> Self {
        self.constructors.insert(tag.into(), constructor);
        self
    }

    pub fn with_setup<F>(mut self, setup: F) -> Self
    where
        F: Fn(&mut Document, &RawElement) + Send + Sync + 'static,
    {
        self.setup = Some(Arc::new(setup));
        self
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn get_constructor(&self, tag: &str) -> Option<RepresentationConstructor> {
        self.constructors.get(tag).copied()
    }

    pub fn has_setup(&self) -> bool {
        self.setup.is_some()
    }

    /// Run the setup hook; a namespace without one does nothing.
    pub fn setup(&self, document: &mut Document, raw: &RawElement) {
        if let Some(setup) = &self.setup {
            setup(document, raw);
        }
    }
}

/// Table of known vocabularies keyed by namespace URI.
#[derive(Debug, Default, Clone)]
pub struct NamespaceRegistry {
    namespaces: BTreeMap<String, Arc<NamespaceDescriptor>>,
}

static DEFAULT_REGISTRY: LazyLock<NamespaceRegistry> =
    LazyLock::new(NamespaceRegistry::with_defaults);

impl NamespaceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every vocabulary this crate ships.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(yworks::descriptor());
        registry
    }

    /// Process-wide registry with the shipped vocabularies, built on first use.
    pub fn global() -> &'static NamespaceRegistry {
        &DEFAULT_REGISTRY
    }

    /// Register a descriptor, replacing any previous one for the same URI.
    pub fn register(
        &mut self,
        descriptor: NamespaceDescriptor,
    ) -> Option<Arc<NamespaceDescriptor>> {
        let uri = descriptor.uri.clone();
        let previous = self.namespaces.insert(uri.clone(), Arc::new(descriptor));
        if previous.is_some() {
            warn!(uri = uri.as_str(); "Replacing registered namespace");
        } else {
            debug!(uri = uri.as_str(); "Registered namespace");
        }
        previous
    }

    pub fn lookup(&self, uri: &str) -> Option<&Arc<NamespaceDescriptor>> {
        self.namespaces.get(uri)
    }

    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty()
    }
}

/// Foreign type of a structural element.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedType<'a> {
    pub uri: String,
    pub type_name: String,
    /// The typed element itself, handed to the constructor.
    pub element: &'a RawElement,
}

/// Resolves tag prefixes against the declarations on the document root.
#[derive(Debug, Clone)]
pub struct TypeResolver<'r> {
    prefixes: BTreeMap<String, String>,
    registry: &'r NamespaceRegistry,
}

impl<'r> TypeResolver<'r> {
    pub fn new(root: &RawElement, registry: &'r NamespaceRegistry) -> Self {
        Self {
            prefixes: root.namespace_declarations(),
            registry,
        }
    }

    /// Namespace URI of a tag, `None` when its prefix is undeclared.
    pub fn namespace_of(&self, element: &RawElement) -> Option<&str> {
        match element.prefix() {
            None => Some(GRAPHML_NAMESPACE),
            Some(prefix) => self.prefixes.get(prefix).map(String::as_str),
        }
    }

    /// Whether the element belongs to the GraphML core vocabulary.
    pub fn is_core(&self, element: &RawElement) -> bool {
        self.namespace_of(element) == Some(GRAPHML_NAMESPACE)
    }

    /// First foreign descendant of `element` whose namespace is registered.
    ///
    /// Children are scanned in document order. Structural core elements
    /// (nested graphs, nodes, ports, ...) are skipped; any other element
    /// without a match is searched recursively, so a type wrapped in
    /// `<data>` is still found.
    pub fn resolve<'a>(&self, element: &'a RawElement) -> Option<ResolvedType<'a>> {
        for child in &element.children {
            let core = self.is_core(child);
            if core && is_structural(child.local_name()) {
                continue;
            }
            if !core
                && let Some(uri) = self.namespace_of(child)
                && self.registry.lookup(uri).is_some()
            {
                return Some(ResolvedType {
                    uri: uri.to_string(),
                    type_name: child.local_name().to_string(),
                    element: child,
                });
            }
            if let Some(found) = self.resolve(child) {
                return Some(found);
            }
        }
        None
    }
}

fn is_structural(local: &str) -> bool {
    ElementKind::ALL.iter().any(|kind| kind.tag() == local)
        || matches!(local, "graphml" | "endpoint" | "port" | "key")
}
