//! Show command implementation.

use super::load;
use crate::cli::ShowArgs;
use crate::error::Result;
use crate::output::Formatter;
use termgraph_ontology::OntologyConfig;

/// Execute the show command.
pub fn execute_show(args: ShowArgs, config: &OntologyConfig, formatter: &Formatter) -> Result<()> {
    let ontology = load(&args.locator, config)?;
    let term = ontology.get(&args.id)?;
    println!("{}", formatter.format_term(term)?);
    Ok(())
}
