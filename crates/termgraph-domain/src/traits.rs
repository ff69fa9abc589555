//! Trait definitions for external collaborators
//!
//! Format parsers and byte transports live outside the core graph logic.
//! Implementations are provided by `termgraph-ontology` or by callers.

use crate::{Locator, Term};
use std::collections::BTreeMap;
use std::time::Instant;
use thiserror::Error;

/// Output of a format parser
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedOntology {
    /// Ontology-level header fields
    pub metadata: BTreeMap<String, String>,

    /// Raw terms; links are bare ids
    pub terms: Vec<Term>,

    /// Locators of imported ontologies, as declared
    pub imports: Vec<String>,
}

/// Errors reported by a format parser
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Parser exceeded its time limit
    #[error("Parse timed out")]
    Timeout,

    /// Input is not a valid document for this parser
    #[error("Malformed document: {0}")]
    Malformed(String),
}

/// Turns a byte stream into raw ontology data
///
/// Implemented by the infrastructure layer (termgraph-ontology)
pub trait OntologyParser: Send + Sync {
    /// Human-readable format name
    fn format_name(&self) -> &'static str;

    /// Whether this parser should handle the document at `locator`
    fn accepts(&self, locator: &Locator) -> bool;

    /// Parse a document, giving up once `deadline` has passed
    fn parse(&self, bytes: &[u8], deadline: Instant) -> Result<ParsedOntology, ParseError>;
}

/// Errors reported by a transport
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Local path does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Network or I/O failure
    #[error("Transport failure: {0}")]
    Failure(String),
}

/// Fetches the bytes of an ontology document
///
/// Implemented by the infrastructure layer (termgraph-ontology)
pub trait Transport: Send + Sync {
    /// Load the full document at `locator`
    fn fetch(&self, locator: &Locator) -> Result<Vec<u8>, TransportError>;
}
