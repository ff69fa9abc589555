//! Ancestors and descendants command implementations.

use super::load;
use crate::cli::TraverseArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use termgraph_ontology::{Ontology, OntologyConfig};
use termgraph_store::TermSet;

/// Which way to walk the hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Walk {
    /// Towards parents
    Up,
    /// Towards children
    Down,
}

/// Execute the ancestors command.
pub fn execute_ancestors(
    args: TraverseArgs,
    config: &OntologyConfig,
    formatter: &Formatter,
) -> Result<()> {
    execute(args, Walk::Up, config, formatter)
}

/// Execute the descendants command.
pub fn execute_descendants(
    args: TraverseArgs,
    config: &OntologyConfig,
    formatter: &Formatter,
) -> Result<()> {
    execute(args, Walk::Down, config, formatter)
}

fn execute(
    args: TraverseArgs,
    walk: Walk,
    config: &OntologyConfig,
    formatter: &Formatter,
) -> Result<()> {
    let ontology = load(&args.locator, config)?;
    let terms = traverse(&ontology, &args.id, walk, args.depth, args.leaves_only)?;
    println!("{}", formatter.format_terms(&terms)?);
    Ok(())
}

/// Walk from `id` for `depth` levels.
///
/// `leaves_only` keeps only the terms exactly `depth` levels away, which
/// needs a positive depth.
pub fn traverse<'a>(
    ontology: &'a Ontology,
    id: &str,
    walk: Walk,
    depth: i64,
    leaves_only: bool,
) -> Result<TermSet<'a>> {
    if leaves_only && depth <= 0 {
        return Err(CliError::InvalidInput(
            "--leaves-only needs a positive --depth".to_string(),
        ));
    }

    let term = ontology.get(id)?;
    Ok(match walk {
        Walk::Up => term.transitive_parents(depth, !leaves_only),
        Walk::Down => term.transitive_children(depth, !leaves_only),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use termgraph_domain::Term;

    fn chain() -> Ontology {
        let mut ontology = Ontology::new();
        ontology
            .include([
                Term::new("A", "Alpha"),
                Term::new("B", "Beta").with_relation("is_a", ["A"]),
                Term::new("C", "Gamma").with_relation("is_a", ["B"]),
            ])
            .unwrap();
        ontology
    }

    #[test]
    fn test_unbounded_ancestors() {
        let ontology = chain();
        let terms = traverse(&ontology, "C", Walk::Up, -1, false).unwrap();
        assert_eq!(terms.ids(), vec!["A", "B"]);
    }

    #[test]
    fn test_leaves_only_descendants() {
        let ontology = chain();
        let terms = traverse(&ontology, "A", Walk::Down, 2, true).unwrap();
        assert_eq!(terms.ids(), vec!["C"]);
    }

    #[test]
    fn test_leaves_only_needs_depth() {
        let ontology = chain();
        let result = traverse(&ontology, "A", Walk::Down, -1, true);
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
    }

    #[test]
    fn test_unknown_term() {
        let ontology = chain();
        assert!(matches!(
            traverse(&ontology, "Z", Walk::Up, 1, false),
            Err(CliError::Ontology(_))
        ));
    }
}
