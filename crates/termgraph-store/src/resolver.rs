//! Graph resolution passes: adopt, reference, dereference

use crate::{StoreError, TermCollection};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use termgraph_domain::{AttributeValue, Direction, Link, Term};

/// Derive missing inverse edges from declared child-to-parent edges
///
/// For every `BottomUp` relationship with a complement, each parent present
/// in the collection receives the child under the complement relationship.
/// Parents absent from the collection are skipped. The pass is additive and
/// idempotent: an edge is only appended if no link to the same child exists
/// under the complement already.
///
/// Returns the number of edges added.
///
/// # Errors
/// Returns [`StoreError::Catalog`] if a term uses an undeclared relationship.
pub fn adopt(collection: &mut TermCollection) -> Result<usize, StoreError> {
    let catalog = Arc::clone(collection.catalog());

    let mut edges = Vec::new();
    for term in collection.terms() {
        for (relationship, links) in term.relations() {
            if catalog.direction_of(relationship)? != Direction::BottomUp {
                continue;
            }
            let Some(complement) = catalog.complement_of(relationship)? else {
                continue;
            };
            for link in links {
                edges.push((link.id().to_string(), complement.to_string(), term.id.clone()));
            }
        }
    }

    let mut added = 0;
    let mut skipped = 0;
    let entries = collection.entries_mut();
    for (parent, complement, child) in edges {
        match entries.get_mut(&parent) {
            Some(term) => {
                if term.add_link(&complement, Link::Unresolved(child)) {
                    added += 1;
                }
            }
            None => skipped += 1,
        }
    }

    if added > 0 {
        collection.invalidate_traversal_caches();
    }
    tracing::debug!(added, skipped, "adopt pass complete");
    Ok(added)
}

/// Resolve every bare-id link against the collection
///
/// Ids absent from the collection get a stub term (empty name and
/// description, no relations) inserted for them. Safe to call repeatedly.
///
/// Returns the number of stubs created.
pub fn reference(collection: &mut TermCollection) -> usize {
    let missing: BTreeSet<String> = collection
        .terms()
        .flat_map(Term::link_targets)
        .filter(|id| !collection.contains(id))
        .map(str::to_string)
        .collect();
    let stubs = missing.len();

    let entries = collection.entries_mut();
    for id in missing {
        tracing::trace!(id = %id, "materializing stub term");
        entries.insert(id.clone(), Term::stub(id));
    }

    let upgraded: usize = entries.values_mut().map(Term::resolve_links).sum();

    if stubs > 0 || upgraded > 0 {
        collection.invalidate_traversal_caches();
    }
    tracing::debug!(stubs, upgraded, "reference pass complete");
    stubs
}

/// Id-only projection of a term, used by the exchange form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermProjection {
    /// Term id
    pub id: String,

    /// Term name
    #[serde(default)]
    pub name: String,

    /// Definition text
    #[serde(default)]
    pub description: String,

    /// Extension fields
    #[serde(default)]
    pub attributes: BTreeMap<String, AttributeValue>,

    /// Relationship name to linked ids
    #[serde(default)]
    pub relations: BTreeMap<String, Vec<String>>,
}

impl TermProjection {
    /// Rebuild a raw term; every link comes back unresolved
    pub fn into_term(self) -> Term {
        let mut term = Term::new(self.id, self.name).with_description(self.description);
        term.attributes = self.attributes;
        for (relationship, ids) in self.relations {
            term = term.with_relation(relationship, ids);
        }
        term
    }
}

/// Project a term to its id-only form
///
/// Does not mutate the term and works whether or not its links are resolved.
pub fn dereference(term: &Term) -> TermProjection {
    TermProjection {
        id: term.id.clone(),
        name: term.name.clone(),
        description: term.description.clone(),
        attributes: term.attributes.clone(),
        relations: term
            .relations()
            .iter()
            .map(|(relationship, links)| {
                (
                    relationship.clone(),
                    links.iter().map(|link| link.id().to_string()).collect(),
                )
            })
            .collect(),
    }
}
