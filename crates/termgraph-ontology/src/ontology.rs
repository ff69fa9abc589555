//! Ontology - one loaded, fully linked term graph

use crate::imports::ImportWarning;
use crate::{Loader, OntologyConfig, OntologyError};
use std::collections::BTreeMap;
use std::sync::Arc;
use termgraph_domain::{Locator, RelationshipCatalog, Term};
use termgraph_store::{
    adopt, exchange_form, exchange_json, reference, text_form, TermCollection, TermProjection,
    TermRef,
};

/// Construction stage of an [`Ontology`]
///
/// Loading walks `Empty -> Parsed -> Adopted -> (ImportsResolved) -> Referenced`;
/// every public constructor returns a `Referenced` ontology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum OntologyState {
    /// Nothing loaded yet
    Empty,
    /// Parser output stored, links unresolved
    Parsed,
    /// Reverse edges added
    Adopted,
    /// Imports merged
    ImportsResolved,
    /// Every link resolved inside the collection
    Referenced,
}

/// A term graph with its header, imports and load warnings
///
/// # Examples
///
/// ```
/// use termgraph_domain::Term;
/// use termgraph_ontology::Ontology;
///
/// let mut ontology = Ontology::new();
/// ontology
///     .include([
///         Term::new("ONT:001", "my 1st term"),
///         Term::new("ONT:002", "my 2nd term").with_relation("part_of", ["ONT:001"]),
///     ])
///     .unwrap();
///
/// assert!(ontology.contains("ONT:002"));
/// assert_eq!(ontology.get("ONT:001").unwrap().children().ids(), vec!["ONT:002"]);
/// ```
#[derive(Debug)]
pub struct Ontology {
    pub(crate) locator: Option<Locator>,
    pub(crate) import_depth: i64,
    pub(crate) state: OntologyState,
    pub(crate) collection: TermCollection,
    pub(crate) warnings: Vec<ImportWarning>,
    pub(crate) adopt_stubs: bool,
}

impl Ontology {
    /// Create an empty ontology over the standard relationship catalog
    pub fn new() -> Self {
        Self::with_catalog(Arc::new(RelationshipCatalog::standard()))
    }

    /// Create an empty ontology over a custom catalog
    pub fn with_catalog(catalog: Arc<RelationshipCatalog>) -> Self {
        Self {
            locator: None,
            import_depth: 0,
            state: OntologyState::Referenced,
            collection: TermCollection::new(catalog),
            warnings: Vec::new(),
            adopt_stubs: false,
        }
    }

    /// Re-run adopt after stub materialization on later edits
    pub fn with_adopt_stubs(mut self, adopt_stubs: bool) -> Self {
        self.adopt_stubs = adopt_stubs;
        self
    }

    /// Load a document with the default configuration
    ///
    /// # Errors
    /// Primary load failures are returned as-is; failures of secondary
    /// imports are recorded in [`Ontology::warnings`].
    pub fn load(locator: &str) -> Result<Self, OntologyError> {
        Loader::new(OntologyConfig::default()).load(locator)
    }

    /// Load a document with an explicit configuration
    pub fn load_with(locator: &str, config: OntologyConfig) -> Result<Self, OntologyError> {
        Loader::new(config).load(locator)
    }

    pub(crate) fn parsed(locator: Locator, import_depth: i64, collection: TermCollection) -> Self {
        Self {
            locator: Some(locator),
            import_depth,
            state: OntologyState::Parsed,
            collection,
            warnings: Vec::new(),
            adopt_stubs: false,
        }
    }

    /// Where the document came from, if it was loaded
    pub fn locator(&self) -> Option<&Locator> {
        self.locator.as_ref()
    }

    /// Import depth used during construction
    pub fn import_depth(&self) -> i64 {
        self.import_depth
    }

    /// Current construction stage
    pub fn state(&self) -> OntologyState {
        self.state
    }

    /// Non-fatal failures recorded while resolving imports
    pub fn warnings(&self) -> &[ImportWarning] {
        &self.warnings
    }

    /// The underlying term table
    pub fn collection(&self) -> &TermCollection {
        &self.collection
    }

    /// Look up a term
    ///
    /// # Errors
    /// Returns [`OntologyError::NotFound`] if the id is absent
    pub fn get(&self, id: &str) -> Result<TermRef<'_>, OntologyError> {
        Ok(self.collection.get(id)?)
    }

    /// Whether a term with this id is present
    pub fn contains(&self, id: &str) -> bool {
        self.collection.contains(id)
    }

    /// Whether a term with the same id is present
    pub fn contains_term(&self, term: &Term) -> bool {
        self.collection.contains_term(term)
    }

    /// Iterate terms in id order
    pub fn iter(&self) -> impl Iterator<Item = TermRef<'_>> {
        self.collection.iter()
    }

    /// Number of terms, stubs included
    pub fn len(&self) -> usize {
        self.collection.len()
    }

    /// Whether the ontology holds no terms
    pub fn is_empty(&self) -> bool {
        self.collection.is_empty()
    }

    /// Header fields
    pub fn metadata(&self) -> &BTreeMap<String, String> {
        self.collection.metadata()
    }

    /// Declared imports
    pub fn imports(&self) -> &[String] {
        self.collection.imports()
    }

    /// Add terms, replacing any with the same id, then relink the graph
    ///
    /// Links held by the incoming terms are re-resolved against this
    /// ontology, so ids pointing at absent terms become stubs.
    ///
    /// # Errors
    /// Returns [`OntologyError::Catalog`] if any term uses an undeclared
    /// relationship; nothing is inserted in that case.
    pub fn include<I>(&mut self, terms: I) -> Result<(), OntologyError>
    where
        I: IntoIterator<Item = Term>,
    {
        let count = self.collection.insert_all(terms.into_iter().map(|mut term| {
            term.unresolve_links();
            term
        }))?;
        tracing::debug!(count, "Included terms");

        adopt(&mut self.collection)?;
        self.finish()
    }

    /// Add a single term
    pub fn include_term(&mut self, term: Term) -> Result<(), OntologyError> {
        self.include([term])
    }

    /// Overlay another ontology onto this one
    ///
    /// Incoming terms replace terms with the same id and incoming metadata
    /// keys win. Warnings of `other` are kept.
    ///
    /// # Errors
    /// Returns [`OntologyError::Catalog`] if an incoming term uses a
    /// relationship this ontology's catalog does not declare; `self` is
    /// left unchanged in that case.
    pub fn merge(&mut self, other: Ontology) -> Result<(), OntologyError> {
        self.absorb(other)?;
        self.finish()
    }

    /// Merge without relinking; the caller runs [`Ontology::finish`]
    pub(crate) fn absorb(&mut self, other: Ontology) -> Result<(), OntologyError> {
        self.overlay(other, TermCollection::absorb)
    }

    /// Merge a loaded import without relinking
    ///
    /// Stubs the import made for this ontology's terms are dropped.
    pub(crate) fn absorb_import(&mut self, other: Ontology) -> Result<(), OntologyError> {
        self.overlay(other, TermCollection::absorb_import)
    }

    fn overlay(
        &mut self,
        other: Ontology,
        apply: fn(&mut TermCollection, TermCollection),
    ) -> Result<(), OntologyError> {
        for term in other.collection.terms() {
            self.collection.validate_relations(term)?;
        }
        tracing::debug!(
            incoming = other.collection.len(),
            into = self.collection.len(),
            "Merging ontologies"
        );
        apply(&mut self.collection, other.collection);
        self.warnings.extend(other.warnings);
        Ok(())
    }

    pub(crate) fn adopt(&mut self) -> Result<(), OntologyError> {
        adopt(&mut self.collection)?;
        self.state = OntologyState::Adopted;
        Ok(())
    }

    /// Resolve every link, then optionally adopt the freshly made stubs
    pub(crate) fn finish(&mut self) -> Result<(), OntologyError> {
        let stubs = reference(&mut self.collection);
        if self.adopt_stubs && adopt(&mut self.collection)? > 0 {
            reference(&mut self.collection);
        }
        if stubs > 0 {
            tracing::debug!(stubs, "Materialized placeholder terms");
        }
        self.state = OntologyState::Referenced;
        Ok(())
    }

    /// Text form, one `[Term]` stanza per term
    pub fn to_text_form(&self) -> String {
        text_form(&self.collection)
    }

    /// Id-keyed projections of every term
    pub fn to_exchange_form(&self) -> BTreeMap<String, TermProjection> {
        exchange_form(&self.collection)
    }

    /// Exchange form serialized as pretty JSON
    pub fn to_exchange_json(&self) -> Result<String, OntologyError> {
        Ok(exchange_json(&self.collection)?)
    }
}

impl Default for Ontology {
    fn default() -> Self {
        Self::new()
    }
}
