//! Text and exchange export of a collection

use crate::resolver::{dereference, TermProjection};
use crate::{StoreError, TermCollection};
use std::collections::BTreeMap;
use termgraph_domain::{Direction, Term};

/// Render one term as a `[Term]` stanza
///
/// Only child-to-parent relationships are written; the complement edges are
/// derived again on load.
pub fn term_stanza(term: &Term, collection: &TermCollection) -> String {
    let catalog = collection.catalog();
    let mut lines = vec![
        "[Term]".to_string(),
        format!("id: {}", term.id),
        format!("name: {}", term.name),
    ];

    if !term.description.is_empty() {
        lines.push(format!("def: {}", term.description));
    }

    for (key, value) in &term.attributes {
        for v in value.values() {
            lines.push(format!("{}: {}", key, v));
        }
    }

    for (relationship, links) in term.relations() {
        if catalog.direction_of(relationship).ok() != Some(Direction::BottomUp) {
            continue;
        }
        let prefix = if relationship == catalog.default_relationship() {
            String::new()
        } else {
            "relationship: ".to_string()
        };
        for link in links {
            let target = match collection.term(link.id()) {
                Some(t) if !t.name.is_empty() => format!("{} ! {}", t.id, t.name),
                _ => link.id().to_string(),
            };
            lines.push(format!("{}{}: {}", prefix, relationship, target));
        }
    }

    lines.join("\n").trim_end().to_string()
}

/// Render the whole collection, one stanza per term in id order
pub fn text_form(collection: &TermCollection) -> String {
    collection
        .terms()
        .map(|term| term_stanza(term, collection))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Map every term id to its dereferenced projection
///
/// Ontology-level metadata is not part of the exchange form.
pub fn exchange_form(collection: &TermCollection) -> BTreeMap<String, TermProjection> {
    collection
        .terms()
        .map(|term| (term.id.clone(), dereference(term)))
        .collect()
}

/// Serialize the exchange form as pretty-printed JSON
pub fn exchange_json(collection: &TermCollection) -> Result<String, StoreError> {
    Ok(serde_json::to_string_pretty(&exchange_form(collection))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{adopt, reference};
    use std::sync::Arc;
    use termgraph_domain::RelationshipCatalog;

    fn two_terms() -> TermCollection {
        let mut c = TermCollection::new(Arc::new(RelationshipCatalog::standard()));
        c.insert_or_replace(Term::new("A", "Alpha")).unwrap();
        c.insert_or_replace(Term::new("B", "Beta").with_relation("is_a", ["A"]))
            .unwrap();
        adopt(&mut c).unwrap();
        reference(&mut c);
        c
    }

    #[test]
    fn test_text_form_two_stanzas() {
        let text = text_form(&two_terms());
        let stanzas: Vec<&str> = text.split("\n\n").collect();

        assert_eq!(stanzas.len(), 2);
        assert_eq!(stanzas[0], "[Term]\nid: A\nname: Alpha");
        assert_eq!(stanzas[1], "[Term]\nid: B\nname: Beta\nis_a: A ! Alpha");
        assert_eq!(text.matches("is_a:").count(), 1);
        assert!(!text.contains("relationship:"));
        assert!(!text.contains("can_be"));
    }

    #[test]
    fn test_stanza_fields() {
        let mut c = TermCollection::new(Arc::new(RelationshipCatalog::standard()));
        c.insert_or_replace(
            Term::new("MS:1000031", "instrument model")
                .with_description("\"Instrument model name.\" [PSI:MS]")
                .with_attribute("synonym", vec!["model".to_string(), "instrument".to_string()])
                .with_relation("part_of", ["MS:1000463"]),
        )
        .unwrap();
        c.insert_or_replace(Term::new("MS:1000463", "instrument")).unwrap();
        reference(&mut c);

        let stanza = term_stanza(c.term("MS:1000031").unwrap(), &c);
        assert_eq!(
            stanza,
            "[Term]\n\
             id: MS:1000031\n\
             name: instrument model\n\
             def: \"Instrument model name.\" [PSI:MS]\n\
             synonym: model\n\
             synonym: instrument\n\
             relationship: part_of: MS:1000463 ! instrument"
        );
    }

    #[test]
    fn test_stub_target_has_no_name_suffix() {
        let mut c = TermCollection::new(Arc::new(RelationshipCatalog::standard()));
        c.insert_or_replace(Term::new("B", "Beta").with_relation("is_a", ["X"]))
            .unwrap();
        reference(&mut c);

        let stanza = term_stanza(c.term("B").unwrap(), &c);
        assert!(stanza.ends_with("is_a: X"));
        assert_eq!(term_stanza(c.term("X").unwrap(), &c), "[Term]\nid: X\nname:");
    }

    #[test]
    fn test_exchange_form_has_every_term() {
        let c = two_terms();
        let form = exchange_form(&c);
        assert_eq!(form.keys().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(form["A"].relations["can_be"], vec!["B".to_string()]);

        let json = exchange_json(&c).unwrap();
        let parsed: BTreeMap<String, TermProjection> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, form);
    }
}
