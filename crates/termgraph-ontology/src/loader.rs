//! Loader - fetch, parse and assemble ontologies

use crate::imports::resolve_imports;
use crate::{DefaultTransport, Ontology, OntologyConfig, OntologyError, ParserRegistry};
use std::sync::Arc;
use std::time::Instant;
use termgraph_domain::{Locator, ParsedOntology, RelationshipCatalog, Transport};
use termgraph_store::TermCollection;

/// Builds [`Ontology`] values from locators
///
/// Holds the collaborators a load needs: the transport that fetches bytes,
/// the parsers that read them and the catalog every term is checked
/// against.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use termgraph_ontology::{Loader, MockTransport, OntologyConfig};
///
/// let mut transport = MockTransport::new();
/// transport.add_document("mem/a.json", r#"{"A": {"id": "A", "name": "Alpha"}}"#);
///
/// let loader = Loader::new(OntologyConfig::default()).with_transport(Arc::new(transport));
/// let ontology = loader.load("mem/a.json").unwrap();
/// assert_eq!(ontology.get("A").unwrap().name, "Alpha");
/// ```
pub struct Loader {
    config: OntologyConfig,
    transport: Arc<dyn Transport>,
    parsers: ParserRegistry,
    catalog: Arc<RelationshipCatalog>,
}

impl Loader {
    /// Create a loader with the filesystem/HTTP transport and default parsers
    pub fn new(config: OntologyConfig) -> Self {
        let transport = Arc::new(DefaultTransport::new(config.fetch_timeout()));
        Self {
            config,
            transport,
            parsers: ParserRegistry::default(),
            catalog: Arc::new(RelationshipCatalog::standard()),
        }
    }

    /// Replace the byte transport
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = transport;
        self
    }

    /// Replace the parser registry
    pub fn with_parsers(mut self, parsers: ParserRegistry) -> Self {
        self.parsers = parsers;
        self
    }

    /// Replace the relationship catalog
    pub fn with_catalog(mut self, catalog: Arc<RelationshipCatalog>) -> Self {
        self.catalog = catalog;
        self
    }

    /// Active configuration
    pub fn config(&self) -> &OntologyConfig {
        &self.config
    }

    /// Load the document at `locator` and, if configured, its imports
    ///
    /// # Errors
    /// - [`OntologyError::Config`] if the locator or configuration is invalid
    /// - [`OntologyError::NotFound`] if a local path does not exist
    /// - [`OntologyError::Transport`], [`OntologyError::NoParser`],
    ///   [`OntologyError::ParseTimeout`] or [`OntologyError::Parse`] if the
    ///   primary document cannot be read
    /// - [`OntologyError::Catalog`] if any term uses an undeclared relationship
    pub fn load(&self, locator: &str) -> Result<Ontology, OntologyError> {
        self.config.validate().map_err(OntologyError::Config)?;
        let locator = Locator::parse(locator).map_err(OntologyError::Config)?;
        let depth = if self.config.follows_imports() {
            self.config.import_depth
        } else {
            0
        };

        let mut ancestry = Vec::new();
        let ontology = self.load_at(&locator, depth, &mut ancestry)?;
        tracing::info!(
            locator = %locator,
            terms = ontology.len(),
            warnings = ontology.warnings().len(),
            "Ontology loaded"
        );
        Ok(ontology)
    }

    /// Load one document with `depth` import levels left
    ///
    /// `ancestry` lists the documents currently being loaded above this one.
    pub(crate) fn load_at(
        &self,
        locator: &Locator,
        depth: i64,
        ancestry: &mut Vec<Locator>,
    ) -> Result<Ontology, OntologyError> {
        let parsed = self.read(locator)?;
        let collection = TermCollection::from_parsed(Arc::clone(&self.catalog), parsed)?;
        // Only the outermost document adopts placeholders
        let mut ontology = Ontology::parsed(locator.clone(), depth, collection)
            .with_adopt_stubs(self.config.adopt_stubs && ancestry.is_empty());

        ontology.adopt()?;

        // Zero whenever the configuration does not follow imports
        if depth != 0 {
            ancestry.push(locator.clone());
            let result = resolve_imports(&mut ontology, self, ancestry);
            ancestry.pop();
            result?;
        }

        ontology.finish()?;
        Ok(ontology)
    }

    fn read(&self, locator: &Locator) -> Result<ParsedOntology, OntologyError> {
        let name = locator.to_string();
        tracing::debug!(locator = %name, "Fetching document");
        let bytes = self
            .transport
            .fetch(locator)
            .map_err(|e| OntologyError::from_transport(&name, e))?;

        let parser = self
            .parsers
            .parser_for(locator)
            .ok_or_else(|| OntologyError::NoParser(name.clone()))?;
        let deadline = Instant::now()
            .checked_add(self.config.parse_timeout())
            .ok_or_else(|| {
                OntologyError::Config(format!(
                    "parse_timeout_secs = {} is out of range",
                    self.config.parse_timeout_secs
                ))
            })?;
        let parsed = parser
            .parse(&bytes, deadline)
            .map_err(|e| OntologyError::from_parse(&name, e))?;

        tracing::debug!(
            locator = %name,
            format = parser.format_name(),
            terms = parsed.terms.len(),
            imports = parsed.imports.len(),
            "Parsed document"
        );
        Ok(parsed)
    }
}

impl std::fmt::Debug for Loader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Loader")
            .field("config", &self.config)
            .field("parsers", &self.parsers)
            .finish_non_exhaustive()
    }
}
