//! Import resolution
//!
//! Each declared import is loaded as a child ontology one level shallower
//! and overlaid onto its parent. Environmental failures (missing files,
//! network errors, bad documents) are recorded as warnings and skipped.

use crate::{Loader, Ontology, OntologyError, OntologyState};
use serde::Serialize;
use std::fmt;
use termgraph_domain::Locator;

/// A secondary import that could not be loaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportWarning {
    /// Resolved locator of the import
    pub locator: String,
    /// Failure kind, such as `NotFound` or `TransportFailure`
    pub kind: String,
    /// Human-readable cause
    pub message: String,
}

impl ImportWarning {
    fn from_error(locator: &str, error: &OntologyError) -> Self {
        Self {
            locator: locator.to_string(),
            kind: error.kind().to_string(),
            message: error.to_string(),
        }
    }
}

impl fmt::Display for ImportWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} occurred during import of {}", self.kind, self.locator)
    }
}

/// Merge every import of `ontology` that can be loaded
///
/// Imports already being loaded further up `ancestry` are skipped, so
/// mutually importing documents terminate.
pub(crate) fn resolve_imports(
    ontology: &mut Ontology,
    loader: &Loader,
    ancestry: &mut Vec<Locator>,
) -> Result<(), OntologyError> {
    let Some(parent) = ontology.locator.clone() else {
        return Ok(());
    };
    let depth = ontology.import_depth.saturating_sub(1);
    let imports: Vec<String> = ontology
        .collection
        .unique_imports()
        .into_iter()
        .map(str::to_string)
        .collect();

    for import in imports {
        let locator = match parent.join(&import) {
            Ok(locator) => locator,
            Err(message) => {
                tracing::warn!(import = %import, %message, "Skipping malformed import");
                ontology.warnings.push(ImportWarning {
                    locator: import,
                    kind: "Config".to_string(),
                    message,
                });
                continue;
            }
        };

        if ancestry.contains(&locator) {
            tracing::debug!(locator = %locator, "Import already being loaded, skipping");
            continue;
        }

        match loader.load_at(&locator, depth, ancestry) {
            Ok(child) => ontology.absorb_import(child)?,
            Err(e) if e.is_recoverable_import_failure() => {
                let warning = ImportWarning::from_error(&locator.to_string(), &e);
                tracing::warn!(
                    locator = %warning.locator,
                    kind = %warning.kind,
                    error = %e,
                    "Import skipped"
                );
                ontology.warnings.push(warning);
            }
            Err(e) => return Err(e),
        }
    }

    ontology.state = OntologyState::ImportsResolved;
    Ok(())
}
