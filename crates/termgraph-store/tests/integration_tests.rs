//! Integration tests for termgraph-store
//!
//! These tests verify the resolution passes over whole collections.

use proptest::prelude::*;
use std::collections::BTreeMap;
use std::sync::Arc;
use termgraph_domain::{Link, RelationshipCatalog, Term};
use termgraph_store::{adopt, dereference, exchange_form, reference, text_form, TermCollection};

fn catalog() -> Arc<RelationshipCatalog> {
    Arc::new(RelationshipCatalog::standard())
}

fn snapshot(collection: &TermCollection) -> BTreeMap<String, BTreeMap<String, Vec<String>>> {
    collection
        .terms()
        .map(|t| {
            let mut relations = dereference(t).relations;
            for ids in relations.values_mut() {
                ids.sort();
            }
            (t.id.clone(), relations)
        })
        .collect()
}

/// Build a collection of `n` terms with arbitrary `is_a` / `part_of` edges,
/// some of them pointing outside the collection.
fn arbitrary_collection() -> impl Strategy<Value = TermCollection> {
    let edge = (0usize..8, prop::sample::select(vec!["is_a", "part_of", "regulates"]), 0usize..10);
    (1usize..8, prop::collection::vec(edge, 0..20)).prop_map(|(n, edges)| {
        let mut terms: Vec<Term> = (0..n)
            .map(|i| Term::new(format!("T:{}", i), format!("term {}", i)))
            .collect();
        for (from, relationship, to) in edges {
            let from = from % n;
            let target = format!("T:{}", to);
            terms[from] = std::mem::replace(&mut terms[from], Term::stub("tmp"))
                .with_relation(relationship, [target]);
        }
        let mut collection = TermCollection::new(catalog());
        for term in terms {
            collection.insert_or_replace(term).unwrap();
        }
        collection
    })
}

proptest! {
    /// Property: adopt(adopt(C)) == adopt(C)
    #[test]
    fn test_adopt_idempotent(mut collection in arbitrary_collection()) {
        adopt(&mut collection).unwrap();
        let once = snapshot(&collection);

        prop_assert_eq!(adopt(&mut collection).unwrap(), 0);
        prop_assert_eq!(snapshot(&collection), once);
    }

    /// Property: every parent reached through a complemented relationship
    /// lists the child under the complement
    #[test]
    fn test_parent_child_symmetry(mut collection in arbitrary_collection()) {
        adopt(&mut collection).unwrap();
        reference(&mut collection);

        let catalog = catalog();
        let declared: Vec<(String, String, String)> = collection
            .terms()
            .flat_map(|t| {
                t.relations().iter().flat_map(move |(r, links)| {
                    links.iter().map(move |l| (t.id.clone(), r.clone(), l.id().to_string()))
                })
            })
            .collect();

        for (child, relationship, parent) in declared {
            let Some(complement) = catalog.complement_of(&relationship).unwrap() else {
                continue;
            };
            if catalog.direction_of(&relationship).unwrap() != termgraph_domain::Direction::BottomUp {
                continue;
            }
            let parent_term = collection.get(&parent).unwrap();
            if parent_term.is_stub() {
                // Parents outside the collection are skipped by adopt
                continue;
            }
            prop_assert!(parent_term.has_link(complement, &child));
            prop_assert!(parent_term.children().contains(&child));
        }
    }

    /// Property: after reference every link is resolved inside the collection
    #[test]
    fn test_reference_closes_collection(mut collection in arbitrary_collection()) {
        adopt(&mut collection).unwrap();
        reference(&mut collection);

        for term in collection.terms() {
            for link in term.relations().values().flatten() {
                prop_assert!(matches!(link, Link::Resolved(_)));
                prop_assert!(collection.contains(link.id()));
            }
        }
    }

    /// Property: adopt result does not depend on insertion order
    #[test]
    fn test_adopt_order_independent(collection in arbitrary_collection()) {
        let mut forward = collection.clone();
        let mut backward = TermCollection::new(catalog());
        let mut terms: Vec<Term> = collection.terms().cloned().collect();
        terms.reverse();
        for term in terms {
            backward.insert_or_replace(term).unwrap();
        }

        adopt(&mut forward).unwrap();
        adopt(&mut backward).unwrap();
        prop_assert_eq!(snapshot(&forward), snapshot(&backward));
    }
}

#[test]
fn test_dangling_reference_adds_one_stub_per_id() {
    let mut collection = TermCollection::new(catalog());
    collection
        .insert_or_replace(Term::new("B", "Beta").with_relation("is_a", ["GHOST:1"]))
        .unwrap();
    collection
        .insert_or_replace(Term::new("C", "Gamma").with_relation("is_a", ["GHOST:1"]))
        .unwrap();
    let before = collection.len();

    adopt(&mut collection).unwrap();
    reference(&mut collection);

    assert_eq!(collection.len(), before + 1);
    let stub = collection.get("GHOST:1").unwrap();
    assert_eq!(stub.name, "");
    assert_eq!(collection.get("B").unwrap().parents().ids(), vec!["GHOST:1"]);
    // Not adopted: the stub did not exist during adopt
    assert!(stub.children().is_empty());
    assert_eq!(collection.stub_count(), 1);
}

#[test]
fn test_exports_agree_on_terms() {
    let mut collection = TermCollection::new(catalog());
    collection.insert_or_replace(Term::new("A", "Alpha")).unwrap();
    collection
        .insert_or_replace(Term::new("B", "Beta").with_relation("part_of", ["A"]))
        .unwrap();
    adopt(&mut collection).unwrap();
    reference(&mut collection);

    let text = text_form(&collection);
    let exchange = exchange_form(&collection);
    for id in exchange.keys() {
        assert!(text.contains(&format!("id: {}", id)));
    }
    assert!(text.contains("relationship: part_of: A ! Alpha"));
}
