//! Load GraphML markup into a typed, hierarchical document model.
//!
//! Loading runs as a pipeline:
//!
//! - [`parse`] reads the markup and validates the root
//! - [`extract`] collects every structural element in document order
//! - [`factory`] builds elements and their namespace representations
//! - [`assemble`] links them into the graph hierarchy
//! - each used namespace's setup hook runs last (for yWorks markup this is
//!   the geometry pass in [`finalize`])
//!
//! ```
//! let markup = r#"<graphml xmlns="http://graphml.graphdrawing.org/xmlns">
//!   <graph id="G" edgedefault="directed">
//!     <node id="a"/><node id="b"/>
//!     <edge id="e" source="a" target="b"/>
//!   </graph>
//! </graphml>"#;
//! let document = graphml_core::load(markup).unwrap();
//! assert_eq!(document.root_graph_id(), "G");
//! assert!(document.get_edge("e").unwrap().is_directed());
//! ```

pub mod assemble;
pub mod config;
pub mod error;
pub mod extract;
pub mod factory;
pub mod finalize;
pub mod geometry;
pub mod model;
pub mod namespace;
pub mod parse;
pub mod yworks;

pub use config::LoaderConfig;
pub use error::{LoadError, LoadResult, ModelError, RepresentationError};
pub use model::{Document, Element};
pub use namespace::{NamespaceDescriptor, NamespaceRegistry};

use log::{debug, info};

use crate::factory::{ElementFactory, NamespaceUsage};
use crate::namespace::TypeResolver;

/// Runs the load pipeline against a namespace registry.
#[derive(Debug, Clone, Copy)]
pub struct Loader<'r> {
    registry: &'r NamespaceRegistry,
    config: LoaderConfig,
}

impl Default for Loader<'static> {
    fn default() -> Self {
        Self::new(NamespaceRegistry::global(), LoaderConfig::default())
    }
}

impl<'r> Loader<'r> {
    pub fn new(registry: &'r NamespaceRegistry, config: LoaderConfig) -> Self {
        Self { registry, config }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Load one GraphML document.
    ///
    /// Only malformed markup, a non-GraphML root and a document without any
    /// `<graph>` are errors. Everything else degrades with a warning.
    pub fn load(&self, markup: &str) -> LoadResult<Document> {
        let root = parse::parse_markup(markup)?;
        parse::validate_root(&root, &self.config)?;

        let resolver = TypeResolver::new(&root, self.registry);
        let records = extract::extract(&root, &resolver);

        let mut usage = NamespaceUsage::default();
        let elements = ElementFactory::new(self.registry).build(&records, &mut usage);
        debug!(namespaces:? = usage.uris().collect::<Vec<_>>(); "Namespaces in use");

        let mut document = assemble::assemble(elements, usage)?;
        if self.config.run_setup_hooks {
            assemble::run_setup_hooks(&mut document, &root);
        }

        info!(root = document.root_graph_id(); "GraphML document loaded");
        Ok(document)
    }
}

/// Load with the shipped vocabularies and default settings.
pub fn load(markup: &str) -> LoadResult<Document> {
    Loader::default().load(markup)
}
