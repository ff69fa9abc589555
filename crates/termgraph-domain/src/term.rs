//! Term module - the nodes of the term graph

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

/// A link from one term to another
///
/// Links never own their target: both variants carry the target id, and a
/// resolved link is looked up through the collection that owns the term.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Link {
    /// Bare id, not yet checked against the owning collection
    Unresolved(String),

    /// Id known to be present in the owning collection
    Resolved(String),
}

impl Link {
    /// Target id regardless of resolution state
    pub fn id(&self) -> &str {
        match self {
            Link::Unresolved(id) | Link::Resolved(id) => id,
        }
    }

    /// Whether the link has been resolved
    pub fn is_resolved(&self) -> bool {
        matches!(self, Link::Resolved(_))
    }

    /// Upgrade to `Resolved`; returns true if the link changed
    pub fn resolve(&mut self) -> bool {
        match self {
            Link::Unresolved(id) => {
                *self = Link::Resolved(std::mem::take(id));
                true
            }
            Link::Resolved(_) => false,
        }
    }

    /// Downgrade to `Unresolved`
    pub fn unresolve(&mut self) {
        if let Link::Resolved(id) = self {
            *self = Link::Unresolved(std::mem::take(id));
        }
    }
}

impl From<&str> for Link {
    fn from(id: &str) -> Self {
        Link::Unresolved(id.to_string())
    }
}

impl From<String> for Link {
    fn from(id: String) -> Self {
        Link::Unresolved(id)
    }
}

/// Free-form extension field value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// A single value
    Single(String),

    /// A repeated field
    Many(Vec<String>),
}

impl AttributeValue {
    /// Every value, one per repeated field
    pub fn values(&self) -> Vec<&str> {
        match self {
            AttributeValue::Single(value) => vec![value.as_str()],
            AttributeValue::Many(values) => values.iter().map(String::as_str).collect(),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Single(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Single(value)
    }
}

impl From<Vec<String>> for AttributeValue {
    fn from(values: Vec<String>) -> Self {
        AttributeValue::Many(values)
    }
}

/// Memoized traversal results of one term
///
/// Filled lazily by the store's traversal views and cleared as a whole by
/// [`Term::invalidate_traversal_cache`].
#[derive(Debug, Default)]
pub struct TraversalCache {
    /// Direct parent ids
    pub parents: Option<Vec<String>>,

    /// Direct child ids
    pub children: Option<Vec<String>>,

    /// Transitive parents keyed by `(level, include_intermediate)`
    pub transitive_parents: HashMap<(i64, bool), BTreeSet<String>>,

    /// Transitive children keyed by `(level, include_intermediate)`
    pub transitive_children: HashMap<(i64, bool), BTreeSet<String>>,
}

impl TraversalCache {
    /// Drop every memoized result
    pub fn clear(&mut self) {
        self.parents = None;
        self.children = None;
        self.transitive_parents.clear();
        self.transitive_children.clear();
    }

    /// Whether nothing is memoized
    pub fn is_empty(&self) -> bool {
        self.parents.is_none()
            && self.children.is_none()
            && self.transitive_parents.is_empty()
            && self.transitive_children.is_empty()
    }
}

/// An ontology term
///
/// # Examples
///
/// ```
/// use termgraph_domain::Term;
///
/// let term = Term::new("TR:002", "other new")
///     .with_description("another term")
///     .with_relation("is_a", ["TR:001"]);
///
/// assert_eq!(term.links("is_a")[0].id(), "TR:001");
/// assert!(!term.links("is_a")[0].is_resolved());
/// ```
#[derive(Debug)]
pub struct Term {
    /// Stable identifier, e.g. `MS:1000031`
    pub id: String,

    /// Human-readable name
    pub name: String,

    /// Definition text
    pub description: String,

    /// Extension fields
    pub attributes: BTreeMap<String, AttributeValue>,

    relations: BTreeMap<String, Vec<Link>>,
    placeholder: bool,
    cache: RefCell<TraversalCache>,
}

impl Term {
    /// Create a term with no relations
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            attributes: BTreeMap::new(),
            relations: BTreeMap::new(),
            placeholder: false,
            cache: RefCell::new(TraversalCache::default()),
        }
    }

    /// Placeholder for an id referenced but never declared
    pub fn stub(id: impl Into<String>) -> Self {
        Self {
            placeholder: true,
            ..Self::new(id, "")
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Append unresolved links under `relationship`
    pub fn with_relation<I, S>(mut self, relationship: impl Into<String>, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let links = self.relations.entry(relationship.into()).or_default();
        links.extend(targets.into_iter().map(|id| Link::Unresolved(id.into())));
        self
    }

    /// Set an extension field
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// All relations, keyed by relationship name
    pub fn relations(&self) -> &BTreeMap<String, Vec<Link>> {
        &self.relations
    }

    /// Mutable access to the relations; clears the traversal cache
    pub fn relations_mut(&mut self) -> &mut BTreeMap<String, Vec<Link>> {
        self.invalidate_traversal_cache();
        &mut self.relations
    }

    /// Links under one relationship (empty if absent)
    pub fn links(&self, relationship: &str) -> &[Link] {
        self.relations
            .get(relationship)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether a link to `target` exists under `relationship`, resolved or not
    pub fn has_link(&self, relationship: &str, target: &str) -> bool {
        self.links(relationship).iter().any(|link| link.id() == target)
    }

    /// Append a link unless one to the same target already exists
    ///
    /// Returns true if the link was added.
    pub fn add_link(&mut self, relationship: &str, link: Link) -> bool {
        if self.has_link(relationship, link.id()) {
            return false;
        }
        self.relations_mut()
            .entry(relationship.to_string())
            .or_default()
            .push(link);
        true
    }

    /// Ids of every linked term, in relation order
    pub fn link_targets(&self) -> impl Iterator<Item = &str> {
        self.relations.values().flatten().map(Link::id)
    }

    /// Mark every link as resolved; returns the number upgraded
    ///
    /// The caller guarantees every target is present in the owning collection.
    pub fn resolve_links(&mut self) -> usize {
        let upgraded = self
            .relations
            .values_mut()
            .flatten()
            .map(|link| link.resolve())
            .filter(|changed| *changed)
            .count();
        if upgraded > 0 {
            self.invalidate_traversal_cache();
        }
        upgraded
    }

    /// Reset every link to its bare-id form
    pub fn unresolve_links(&mut self) {
        for link in self.relations.values_mut().flatten() {
            link.unresolve();
        }
        self.invalidate_traversal_cache();
    }

    /// Whether this term was materialized for an undeclared id
    ///
    /// Stays true after adopt appends edges to the placeholder. A declared
    /// term is never a stub, even with an empty name.
    pub fn is_stub(&self) -> bool {
        self.placeholder
    }

    /// Memoized traversal results
    pub fn traversal_cache(&self) -> &RefCell<TraversalCache> {
        &self.cache
    }

    /// Clear every memoized traversal result
    pub fn invalidate_traversal_cache(&self) {
        self.cache.borrow_mut().clear();
    }
}

impl Clone for Term {
    /// Clones term data; the copy starts with an empty cache
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            attributes: self.attributes.clone(),
            relations: self.relations.clone(),
            placeholder: self.placeholder,
            cache: RefCell::new(TraversalCache::default()),
        }
    }
}

impl PartialEq for Term {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.name == other.name
            && self.description == other.description
            && self.attributes == other.attributes
            && self.relations == other.relations
    }
}

impl Eq for Term {}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}: {}>", self.id, self.name)
    }
}
