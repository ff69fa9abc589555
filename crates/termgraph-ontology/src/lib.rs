//! Termgraph Ontology
//!
//! Loads ontology documents into linked term graphs, follows their imports
//! and merges graphs together.
//!
//! # Overview
//!
//! Loading a document runs these stages in order:
//! - **Parse**: fetch the bytes through a [`termgraph_domain::Transport`] and
//!   hand them to the first registered parser that accepts the locator
//! - **Adopt**: add reverse (parent to child) edges
//! - **Imports**: load each declared import one level shallower and merge it;
//!   failures become [`ImportWarning`]s
//! - **Reference**: resolve every link, creating placeholder terms for
//!   unknown ids
//!
//! # Usage
//!
//! ```no_run
//! use termgraph_ontology::{Ontology, OntologyConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let ontology = Ontology::load_with("resources/cl.json", OntologyConfig::shallow())?;
//! for warning in ontology.warnings() {
//!     eprintln!("{}", warning);
//! }
//! println!("{}", ontology.to_text_form());
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! ```toml
//! resolve_imports = true
//! import_depth = -1
//! parse_timeout_secs = 60
//! fetch_timeout_secs = 30
//! adopt_stubs = false
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod imports;
mod loader;
mod ontology;
mod parser;
mod transport;

pub use config::{OntologyConfig, MAX_TIMEOUT_SECS};
pub use error::OntologyError;
pub use imports::ImportWarning;
pub use loader::Loader;
pub use ontology::{Ontology, OntologyState};
pub use parser::{ExchangeParser, ParserRegistry};
pub use transport::{DefaultTransport, FileTransport, HttpTransport, MockTransport};
