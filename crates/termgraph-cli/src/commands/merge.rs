//! Merge command implementation.

use super::export::render;
use super::load;
use crate::cli::MergeArgs;
use crate::error::Result;
use termgraph_ontology::{Ontology, OntologyConfig};

/// Execute the merge command.
pub fn execute_merge(args: MergeArgs, config: &OntologyConfig) -> Result<()> {
    let merged = merge_all(&args.locators, config)?;
    println!("{}", render(&merged, args.form)?);
    Ok(())
}

/// Load every locator and merge them left to right.
pub fn merge_all(locators: &[String], config: &OntologyConfig) -> Result<Ontology> {
    let mut merged = Ontology::new();
    for locator in locators {
        let ontology = load(locator, config)?;
        tracing::info!(locator = %locator, terms = ontology.len(), "Merging");
        merged.merge(ontology)?;
    }
    Ok(merged)
}
