//! Error types for ontology loading

use termgraph_domain::{CatalogError, ParseError, TransportError};
use termgraph_store::StoreError;
use thiserror::Error;

/// Errors that can occur while loading or editing an ontology
#[derive(Error, Debug)]
pub enum OntologyError {
    /// Local file missing, or lookup of an absent term id
    #[error("Not found: {0}")]
    NotFound(String),

    /// Network or I/O failure fetching a document
    #[error("Transport failure for {locator}: {message}")]
    Transport {
        /// Offending locator
        locator: String,
        /// Underlying failure
        message: String,
    },

    /// Parser exceeded its time limit
    #[error("Parsing of {0} timed out")]
    ParseTimeout(String),

    /// Document rejected by its parser
    #[error("Failed to parse {locator}: {message}")]
    Parse {
        /// Offending locator
        locator: String,
        /// Parser message
        message: String,
    },

    /// No registered parser accepts the locator
    #[error("No parser accepts {0}")]
    NoParser(String),

    /// Relationship missing from the catalog
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Invalid locator or configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Exchange serialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl OntologyError {
    /// Whether a failure while loading a secondary import is downgraded to a warning
    pub fn is_recoverable_import_failure(&self) -> bool {
        matches!(
            self,
            OntologyError::NotFound(_)
                | OntologyError::Transport { .. }
                | OntologyError::ParseTimeout(_)
                | OntologyError::Parse { .. }
                | OntologyError::NoParser(_)
        )
    }

    /// Short kind name used in warnings
    pub fn kind(&self) -> &'static str {
        match self {
            OntologyError::NotFound(_) => "NotFound",
            OntologyError::Transport { .. } => "TransportFailure",
            OntologyError::ParseTimeout(_) => "ParseTimeout",
            OntologyError::Parse { .. } => "Parse",
            OntologyError::NoParser(_) => "NoParser",
            OntologyError::Catalog(_) => "UnknownRelationship",
            OntologyError::Config(_) => "Config",
            OntologyError::Serialization(_) => "Serialization",
        }
    }

    pub(crate) fn from_transport(locator: &str, error: TransportError) -> Self {
        match error {
            TransportError::NotFound(path) => OntologyError::NotFound(path),
            TransportError::Failure(message) => OntologyError::Transport {
                locator: locator.to_string(),
                message,
            },
        }
    }

    pub(crate) fn from_parse(locator: &str, error: ParseError) -> Self {
        match error {
            ParseError::Timeout => OntologyError::ParseTimeout(locator.to_string()),
            ParseError::Malformed(message) => OntologyError::Parse {
                locator: locator.to_string(),
                message,
            },
        }
    }
}

impl From<StoreError> for OntologyError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => OntologyError::NotFound(id),
            StoreError::Catalog(e) => OntologyError::Catalog(e),
            StoreError::Serialization(e) => OntologyError::Serialization(e),
        }
    }
}
