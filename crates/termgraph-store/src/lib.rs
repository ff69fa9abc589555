//! Termgraph Storage Layer
//!
//! Owns the terms of one ontology and implements the graph passes over them.
//!
//! # Architecture
//!
//! - [`TermCollection`]: id-ordered table, sole owner of its terms
//! - [`adopt`] / [`reference`] / [`dereference`]: resolution passes
//! - [`TermRef`] / [`TermSet`]: memoized parent/child traversal views
//! - [`text_form`] / [`exchange_form`]: export
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use termgraph_domain::{RelationshipCatalog, Term};
//! use termgraph_store::{adopt, reference, TermCollection};
//!
//! let mut collection = TermCollection::new(Arc::new(RelationshipCatalog::standard()));
//! collection.insert_or_replace(Term::new("A", "Alpha")).unwrap();
//! collection
//!     .insert_or_replace(Term::new("B", "Beta").with_relation("is_a", ["A"]))
//!     .unwrap();
//!
//! adopt(&mut collection).unwrap();
//! reference(&mut collection);
//!
//! assert_eq!(collection.get("A").unwrap().children().ids(), vec!["B"]);
//! ```

#![warn(missing_docs)]

mod collection;
mod error;
mod export;
mod resolver;
mod view;

pub use collection::TermCollection;
pub use error::StoreError;
pub use export::{exchange_form, exchange_json, term_stanza, text_form};
pub use resolver::{adopt, dereference, reference, TermProjection};
pub use view::{TermRef, TermSet};
