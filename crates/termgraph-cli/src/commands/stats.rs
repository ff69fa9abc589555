//! Stats command implementation.

use super::load;
use crate::cli::StatsArgs;
use crate::error::Result;
use crate::output::{Formatter, Stats};
use termgraph_ontology::{Ontology, OntologyConfig};

/// Execute the stats command.
pub fn execute_stats(args: StatsArgs, config: &OntologyConfig, formatter: &Formatter) -> Result<()> {
    let ontology = load(&args.locator, config)?;
    println!("{}", formatter.format_stats(&collect(&ontology))?);
    Ok(())
}

/// Count terms, stubs and edges.
pub fn collect(ontology: &Ontology) -> Stats {
    let mut stats = Stats {
        terms: ontology.len(),
        stubs: ontology.collection().stub_count(),
        imports: ontology.imports().to_vec(),
        warnings: ontology.warnings().to_vec(),
        ..Stats::default()
    };
    for term in ontology.collection().terms() {
        for (relationship, links) in term.relations() {
            *stats.relations.entry(relationship.clone()).or_default() += links.len();
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use termgraph_domain::Term;

    #[test]
    fn test_collect_counts_both_directions() {
        let mut ontology = Ontology::new();
        ontology
            .include([
                Term::new("B", "Beta").with_relation("is_a", ["A"]),
                Term::new("C", "Gamma").with_relation("is_a", ["B"]),
            ])
            .unwrap();

        let stats = collect(&ontology);
        assert_eq!(stats.terms, 3);
        assert_eq!(stats.stubs, 1);
        assert_eq!(stats.relations["is_a"], 2);
        // B adopted C; the stub A did not exist during adopt
        assert_eq!(stats.relations["can_be"], 1);
        assert!(stats.warnings.is_empty());
    }

    #[test]
    fn test_collect_counts_adopted_stubs() {
        let mut ontology = Ontology::new().with_adopt_stubs(true);
        ontology
            .include_term(Term::new("B", "Beta").with_relation("is_a", ["A"]))
            .unwrap();
        assert_eq!(ontology.get("A").unwrap().children().ids(), vec!["B"]);

        let stats = collect(&ontology);
        assert_eq!(stats.terms, 2);
        assert_eq!(stats.stubs, 1);
        assert_eq!(stats.relations["can_be"], 1);
    }
}
