//! Command implementations.

pub mod export;
pub mod merge;
pub mod show;
pub mod stats;
pub mod traverse;

pub use self::export::execute_export;
pub use self::merge::execute_merge;
pub use self::show::execute_show;
pub use self::stats::execute_stats;
pub use self::traverse::{execute_ancestors, execute_descendants};

use crate::error::Result;
use termgraph_ontology::{Ontology, OntologyConfig};

/// Load one ontology with the effective loader settings.
pub fn load(locator: &str, config: &OntologyConfig) -> Result<Ontology> {
    Ok(Ontology::load_with(locator, config.clone())?)
}
