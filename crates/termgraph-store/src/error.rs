//! Error types for collection operations

use termgraph_domain::CatalogError;
use thiserror::Error;

/// Errors that can occur during collection operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Indexed lookup of an absent id
    #[error("Term not found: {0}")]
    NotFound(String),

    /// Relation name missing from the catalog
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Exchange serialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
