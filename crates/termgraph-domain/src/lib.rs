//! Termgraph Domain Layer
//!
//! This crate contains the value types every other termgraph layer builds on.
//! It has no knowledge of storage, transports or file formats and only defines
//! the fundamental concepts plus the trait interfaces for external collaborators.
//!
//! ## Key Concepts
//!
//! - **Term**: a node representing one ontology concept
//! - **Link**: a non-owning reference from one term to another, by id
//! - **Relationship**: a named edge kind with a direction and a complement
//! - **Relationship Catalog**: the immutable registry of relationships
//! - **Locator**: a local path or URL naming an ontology document
//!
//! ## Architecture
//!
//! - Pure value types, no I/O
//! - Traversal and resolution live in `termgraph-store`
//! - Loading, imports and merging live in `termgraph-ontology`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod locator;
pub mod relationship;
pub mod term;
pub mod traits;

// Re-exports for convenience
pub use locator::Locator;
pub use relationship::{CatalogBuilder, CatalogError, Direction, Relationship, RelationshipCatalog, IS_A};
pub use term::{AttributeValue, Link, Term, TraversalCache};
pub use traits::{OntologyParser, ParseError, ParsedOntology, Transport, TransportError};
