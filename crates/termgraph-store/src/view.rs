//! Traversal views over terms of a collection

use crate::TermCollection;
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::ops::Deref;
use termgraph_domain::{Direction, Link, Term};

/// A term together with the collection that owns it
///
/// Derefs to [`Term`]. Parent and child queries follow resolved links
/// through the owning collection and are memoized in the term's cache.
#[derive(Clone, Copy)]
pub struct TermRef<'a> {
    term: &'a Term,
    collection: &'a TermCollection,
}

impl<'a> TermRef<'a> {
    pub(crate) fn new(term: &'a Term, collection: &'a TermCollection) -> Self {
        Self { term, collection }
    }

    /// The underlying term
    pub fn term(&self) -> &'a Term {
        self.term
    }

    /// Terms reached through `BottomUp` relationships
    ///
    /// Unresolved links are not followed, so a term loaded but not yet
    /// referenced has no parents.
    pub fn parents(&self) -> TermSet<'a> {
        TermSet::new(self.collection, self.direct(Direction::BottomUp))
    }

    /// Terms reached through `TopDown` relationships
    pub fn children(&self) -> TermSet<'a> {
        TermSet::new(self.collection, self.direct(Direction::TopDown))
    }

    /// Ancestors up to `level` steps away
    ///
    /// `level == 0` yields nothing and a negative level is unbounded. With
    /// `include_intermediate == false` only terms exactly `level` steps away
    /// are returned. Cycles are cut by never expanding the same
    /// `(term, remaining level)` state twice.
    pub fn transitive_parents(&self, level: i64, include_intermediate: bool) -> TermSet<'a> {
        TermSet::new(
            self.collection,
            self.transitive(Direction::BottomUp, level, include_intermediate),
        )
    }

    /// Descendants up to `level` steps away
    pub fn transitive_children(&self, level: i64, include_intermediate: bool) -> TermSet<'a> {
        TermSet::new(
            self.collection,
            self.transitive(Direction::TopDown, level, include_intermediate),
        )
    }

    fn direct(&self, direction: Direction) -> Vec<String> {
        {
            let cache = self.term.traversal_cache().borrow();
            let slot = match direction {
                Direction::BottomUp => &cache.parents,
                _ => &cache.children,
            };
            if let Some(ids) = slot {
                return ids.clone();
            }
        }

        let catalog = self.collection.catalog();
        let mut seen = HashSet::new();
        let mut ids = Vec::new();
        for (relationship, links) in self.term.relations() {
            if catalog.direction_of(relationship).ok() != Some(direction) {
                continue;
            }
            for link in links {
                if let Link::Resolved(id) = link {
                    if seen.insert(id.as_str()) {
                        ids.push(id.clone());
                    }
                }
            }
        }

        let mut cache = self.term.traversal_cache().borrow_mut();
        match direction {
            Direction::BottomUp => cache.parents = Some(ids.clone()),
            _ => cache.children = Some(ids.clone()),
        }
        ids
    }

    fn transitive(&self, direction: Direction, level: i64, include_intermediate: bool) -> BTreeSet<String> {
        let key = (level, include_intermediate);
        {
            let cache = self.term.traversal_cache().borrow();
            let memo = match direction {
                Direction::BottomUp => &cache.transitive_parents,
                _ => &cache.transitive_children,
            };
            if let Some(ids) = memo.get(&key) {
                return ids.clone();
            }
        }

        let mut result = BTreeSet::new();
        let mut expanded: HashSet<(String, i64)> = HashSet::new();
        let mut stack = vec![(self.term.id.clone(), level)];

        while let Some((id, remaining)) = stack.pop() {
            if remaining == 0 || !expanded.insert((id.clone(), remaining)) {
                continue;
            }
            let Some(term) = self.collection.term(&id) else {
                continue;
            };
            let next_remaining = if remaining < 0 { remaining } else { remaining - 1 };
            for next in TermRef::new(term, self.collection).direct(direction) {
                if include_intermediate || remaining == 1 {
                    result.insert(next.clone());
                }
                stack.push((next, next_remaining));
            }
        }

        let mut cache = self.term.traversal_cache().borrow_mut();
        let memo = match direction {
            Direction::BottomUp => &mut cache.transitive_parents,
            _ => &mut cache.transitive_children,
        };
        memo.insert(key, result.clone());
        result
    }
}

impl Deref for TermRef<'_> {
    type Target = Term;

    fn deref(&self) -> &Term {
        self.term
    }
}

impl fmt::Debug for TermRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.term)
    }
}

impl PartialEq for TermRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.term.id == other.term.id
    }
}

/// A set of terms of one collection, ordered by id
///
/// Set-level queries are the union of the member queries.
#[derive(Clone)]
pub struct TermSet<'a> {
    collection: &'a TermCollection,
    ids: BTreeSet<String>,
}

impl<'a> TermSet<'a> {
    pub(crate) fn new(collection: &'a TermCollection, ids: impl IntoIterator<Item = String>) -> Self {
        Self {
            collection,
            ids: ids.into_iter().collect(),
        }
    }

    /// Member ids, sorted
    pub fn ids(&self) -> Vec<&str> {
        self.ids.iter().map(String::as_str).collect()
    }

    /// Member names, in id order
    pub fn names(&self) -> Vec<&'a str> {
        self.iter().map(|t| t.term().name.as_str()).collect()
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Whether `id` is a member
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Iterate members in id order
    pub fn iter(&self) -> impl Iterator<Item = TermRef<'a>> + '_ {
        let collection = self.collection;
        self.ids
            .iter()
            .filter_map(move |id| collection.term(id).map(|term| TermRef::new(term, collection)))
    }

    /// Union of the members' parents
    pub fn parents(&self) -> TermSet<'a> {
        self.union(|t| t.parents())
    }

    /// Union of the members' children
    pub fn children(&self) -> TermSet<'a> {
        self.union(|t| t.children())
    }

    /// Union of the members' transitive parents
    pub fn transitive_parents(&self, level: i64, include_intermediate: bool) -> TermSet<'a> {
        self.union(|t| t.transitive_parents(level, include_intermediate))
    }

    /// Union of the members' transitive children
    pub fn transitive_children(&self, level: i64, include_intermediate: bool) -> TermSet<'a> {
        self.union(|t| t.transitive_children(level, include_intermediate))
    }

    fn union(&self, query: impl Fn(&TermRef<'a>) -> TermSet<'a>) -> TermSet<'a> {
        let ids = self.iter().flat_map(|t| query(&t).ids).collect::<BTreeSet<_>>();
        TermSet::new(self.collection, ids)
    }
}

impl fmt::Debug for TermSet<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::{adopt, reference, TermCollection};
    use std::sync::Arc;
    use termgraph_domain::{RelationshipCatalog, Term};

    fn build(terms: Vec<Term>) -> TermCollection {
        let mut c = TermCollection::new(Arc::new(RelationshipCatalog::standard()));
        for term in terms {
            c.insert_or_replace(term).unwrap();
        }
        adopt(&mut c).unwrap();
        reference(&mut c);
        c
    }

    fn chain() -> TermCollection {
        // D is_a C is_a B is_a A
        build(vec![
            Term::new("A", "a"),
            Term::new("B", "b").with_relation("is_a", ["A"]),
            Term::new("C", "c").with_relation("is_a", ["B"]),
            Term::new("D", "d").with_relation("is_a", ["C"]),
        ])
    }

    #[test]
    fn test_direct_parents_and_children() {
        let c = chain();
        assert_eq!(c.get("B").unwrap().parents().ids(), vec!["A"]);
        assert_eq!(c.get("B").unwrap().children().ids(), vec!["C"]);
        assert!(c.get("A").unwrap().parents().is_empty());
    }

    #[test]
    fn test_unresolved_links_are_not_parents() {
        let mut c = TermCollection::new(Arc::new(RelationshipCatalog::standard()));
        c.insert_or_replace(Term::new("A", "a")).unwrap();
        c.insert_or_replace(Term::new("B", "b").with_relation("is_a", ["A"]))
            .unwrap();
        assert!(c.get("B").unwrap().parents().is_empty());

        reference(&mut c);
        assert_eq!(c.get("B").unwrap().parents().ids(), vec!["A"]);
    }

    #[test]
    fn test_transitive_levels() {
        let c = chain();
        let d = c.get("D").unwrap();

        assert!(d.transitive_parents(0, true).is_empty());
        assert_eq!(d.transitive_parents(1, true).ids(), vec!["C"]);
        assert_eq!(d.transitive_parents(2, true).ids(), vec!["B", "C"]);
        assert_eq!(d.transitive_parents(2, false).ids(), vec!["B"]);
        assert_eq!(d.transitive_parents(-1, true).ids(), vec!["A", "B", "C"]);
        assert_eq!(c.get("A").unwrap().transitive_children(-1, true).ids(), vec!["B", "C", "D"]);
    }

    #[test]
    fn test_unbounded_without_intermediate_is_empty() {
        let c = chain();
        assert!(c.get("D").unwrap().transitive_parents(-1, false).is_empty());
    }

    #[test]
    fn test_cycle_terminates_without_duplicates() {
        let c = build(vec![
            Term::new("A", "a").with_relation("is_a", ["B"]),
            Term::new("B", "b").with_relation("is_a", ["A"]),
        ]);

        let ancestors = c.get("A").unwrap().transitive_parents(-1, true);
        assert_eq!(ancestors.ids(), vec!["A", "B"]);
        let descendants = c.get("A").unwrap().transitive_children(-1, true);
        assert_eq!(descendants.ids(), vec!["A", "B"]);
    }

    #[test]
    fn test_self_reference_terminates() {
        let c = build(vec![Term::new("A", "a").with_relation("is_a", ["A"])]);
        let a = c.get("A").unwrap();
        assert_eq!(a.parents().ids(), vec!["A"]);
        assert_eq!(a.transitive_parents(-1, true).ids(), vec!["A"]);
        assert_eq!(a.transitive_parents(5, false).ids(), vec!["A"]);
    }

    #[test]
    fn test_results_are_memoized_and_invalidated() {
        let mut c = chain();
        let ids = c.get("D").unwrap().transitive_parents(-1, true).ids().len();
        assert_eq!(ids, 3);
        assert!(c
            .term("D")
            .unwrap()
            .traversal_cache()
            .borrow()
            .transitive_parents
            .contains_key(&(-1, true)));

        c.insert_or_replace(Term::new("Z", "z")).unwrap();
        assert!(c.term("D").unwrap().traversal_cache().borrow().is_empty());

        c.relate("A", "is_a", "Z").unwrap();
        reference(&mut c);
        assert_eq!(
            c.get("D").unwrap().transitive_parents(-1, true).ids(),
            vec!["A", "B", "C", "Z"]
        );
    }

    #[test]
    fn test_set_level_queries() {
        let c = build(vec![
            Term::new("A", "a"),
            Term::new("B", "b").with_relation("is_a", ["A"]),
            Term::new("C", "c").with_relation("part_of", ["A"]),
            Term::new("D", "d").with_relation("is_a", ["B"]),
        ]);

        let children = c.get("A").unwrap().children();
        assert_eq!(children.ids(), vec!["B", "C"]);
        assert_eq!(children.names(), vec!["b", "c"]);
        assert_eq!(children.children().ids(), vec!["D"]);
        assert_eq!(children.parents().ids(), vec!["A"]);
        assert_eq!(
            c.get("D").unwrap().parents().transitive_parents(-1, true).ids(),
            vec!["A"]
        );
    }
}
