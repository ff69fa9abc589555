//! Term collection - the owning table of one ontology's terms

use crate::view::TermRef;
use crate::StoreError;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use termgraph_domain::{CatalogError, Link, ParsedOntology, RelationshipCatalog, Term};

/// Ordered, id-addressable table of terms
///
/// The collection is the sole owner of its terms. Links between terms are
/// ids looked up through this table, so a term can never outlive the
/// collection it belongs to. Iteration is always in id order.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use termgraph_domain::{RelationshipCatalog, Term};
/// use termgraph_store::TermCollection;
///
/// let mut collection = TermCollection::new(Arc::new(RelationshipCatalog::standard()));
/// collection.insert_or_replace(Term::new("A", "Alpha")).unwrap();
///
/// assert!(collection.contains("A"));
/// assert_eq!(collection.get("A").unwrap().name, "Alpha");
/// assert!(collection.get("B").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct TermCollection {
    catalog: Arc<RelationshipCatalog>,
    entries: BTreeMap<String, Term>,
    metadata: BTreeMap<String, String>,
    imports: Vec<String>,
}

impl TermCollection {
    /// Create an empty collection
    pub fn new(catalog: Arc<RelationshipCatalog>) -> Self {
        Self {
            catalog,
            entries: BTreeMap::new(),
            metadata: BTreeMap::new(),
            imports: Vec::new(),
        }
    }

    /// Build a collection from parser output
    ///
    /// Terms declared twice keep the last declaration.
    pub fn from_parsed(
        catalog: Arc<RelationshipCatalog>,
        parsed: ParsedOntology,
    ) -> Result<Self, StoreError> {
        let mut collection = Self::new(catalog);
        collection.metadata = parsed.metadata;
        collection.imports = parsed.imports;
        // Fresh terms carry empty caches
        for term in parsed.terms {
            collection.validate_relations(&term)?;
            collection.entries.insert(term.id.clone(), term);
        }
        Ok(collection)
    }

    /// The relationship catalog shared by every term in this collection
    pub fn catalog(&self) -> &Arc<RelationshipCatalog> {
        &self.catalog
    }

    /// Look up a term with its traversal view
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if the id is absent
    pub fn get(&self, id: &str) -> Result<TermRef<'_>, StoreError> {
        self.entries
            .get(id)
            .map(|term| TermRef::new(term, self))
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// Look up the raw term
    pub fn term(&self, id: &str) -> Option<&Term> {
        self.entries.get(id)
    }

    /// Whether a term with this id is present
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Whether a term with the same id as `term` is present
    pub fn contains_term(&self, term: &Term) -> bool {
        self.contains(&term.id)
    }

    /// Insert a term, replacing any term with the same id
    ///
    /// Links are stored as given; ids absent from the table are resolved
    /// later by [`crate::reference`].
    ///
    /// # Errors
    /// Returns [`CatalogError::UnknownRelationship`] if the term uses a
    /// relationship the catalog does not declare.
    pub fn insert_or_replace(&mut self, term: Term) -> Result<Option<Term>, StoreError> {
        self.validate_relations(&term)?;
        let previous = self.entries.insert(term.id.clone(), term);
        self.invalidate_traversal_caches();
        Ok(previous)
    }

    /// Insert many terms, replacing any with the same id
    ///
    /// Every term is checked before the first insert, so an unknown
    /// relationship leaves the collection unchanged. Caches are cleared
    /// once for the whole batch.
    ///
    /// Returns the number of terms inserted.
    pub fn insert_all<I>(&mut self, terms: I) -> Result<usize, StoreError>
    where
        I: IntoIterator<Item = Term>,
    {
        let incoming: Vec<Term> = terms.into_iter().collect();
        for term in &incoming {
            self.validate_relations(term)?;
        }
        let count = incoming.len();
        for term in incoming {
            self.entries.insert(term.id.clone(), term);
        }
        if count > 0 {
            self.invalidate_traversal_caches();
        }
        Ok(count)
    }

    /// Add an edge to a stored term
    ///
    /// Returns false if the edge already existed.
    pub fn relate(&mut self, id: &str, relationship: &str, target: &str) -> Result<bool, StoreError> {
        self.catalog.get(relationship)?;
        let term = self
            .entries
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let added = term.add_link(relationship, Link::Unresolved(target.to_string()));
        if added {
            self.invalidate_traversal_caches();
        }
        Ok(added)
    }

    /// Iterate terms in id order
    pub fn iter(&self) -> impl Iterator<Item = TermRef<'_>> {
        self.entries.values().map(move |term| TermRef::new(term, self))
    }

    /// Iterate raw terms in id order
    pub fn terms(&self) -> impl Iterator<Item = &Term> {
        self.entries.values()
    }

    /// Iterate ids in order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of terms
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the collection holds no terms
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of placeholder terms
    pub fn stub_count(&self) -> usize {
        self.entries.values().filter(|t| t.is_stub()).count()
    }

    /// Ontology-level header fields
    pub fn metadata(&self) -> &BTreeMap<String, String> {
        &self.metadata
    }

    /// Mutable header fields
    pub fn metadata_mut(&mut self) -> &mut BTreeMap<String, String> {
        &mut self.metadata
    }

    /// Declared imports, as parsed
    pub fn imports(&self) -> &[String] {
        &self.imports
    }

    /// Declared imports with duplicates removed, first occurrence kept
    pub fn unique_imports(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.imports
            .iter()
            .map(String::as_str)
            .filter(|import| seen.insert(*import))
            .collect()
    }

    /// Overlay another collection onto this one
    ///
    /// Terms and metadata from `other` replace entries with the same key.
    /// New imports are appended. Every traversal cache is cleared.
    pub fn absorb(&mut self, other: TermCollection) {
        self.overlay(other, false);
    }

    /// Overlay an imported collection onto this one
    ///
    /// Same as [`TermCollection::absorb`], except that a stub in `other`
    /// never displaces a stored term. An import materializes stubs for the
    /// importing document's terms it refers to.
    pub fn absorb_import(&mut self, other: TermCollection) {
        self.overlay(other, true);
    }

    fn overlay(&mut self, other: TermCollection, keep_over_stubs: bool) {
        for (id, term) in other.entries {
            if keep_over_stubs && term.is_stub() && self.entries.contains_key(&id) {
                continue;
            }
            self.entries.insert(id, term);
        }
        self.metadata.extend(other.metadata);
        for import in other.imports {
            if !self.imports.contains(&import) {
                self.imports.push(import);
            }
        }
        self.invalidate_traversal_caches();
    }

    /// Clear the traversal cache of every term
    pub fn invalidate_traversal_caches(&self) {
        for term in self.entries.values() {
            term.invalidate_traversal_cache();
        }
    }

    /// Check every relation name of `term` against the catalog
    pub fn validate_relations(&self, term: &Term) -> Result<(), CatalogError> {
        for relationship in term.relations().keys() {
            self.catalog.get(relationship)?;
        }
        Ok(())
    }

    pub(crate) fn entries_mut(&mut self) -> &mut BTreeMap<String, Term> {
        &mut self.entries
    }
}
