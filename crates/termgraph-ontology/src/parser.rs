//! Format parsers and the registry that selects between them

use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;
use termgraph_domain::{Locator, OntologyParser, ParseError, ParsedOntology};
use termgraph_store::TermProjection;

/// Reads the JSON exchange form
///
/// Two layouts are accepted: the bare mapping written by
/// `exchange_json` (id to term), or an envelope that also carries
/// metadata and imports:
///
/// ```json
/// { "meta": {"version": "1"}, "imports": ["uo.json"], "terms": { "A": {"id": "A"} } }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ExchangeParser;

#[derive(Deserialize)]
#[serde(untagged)]
enum ExchangeDocument {
    Envelope {
        #[serde(default)]
        meta: BTreeMap<String, String>,
        #[serde(default)]
        imports: Vec<String>,
        terms: BTreeMap<String, TermProjection>,
    },
    Bare(BTreeMap<String, TermProjection>),
}

fn check_deadline(deadline: Instant) -> Result<(), ParseError> {
    if Instant::now() >= deadline {
        Err(ParseError::Timeout)
    } else {
        Ok(())
    }
}

impl OntologyParser for ExchangeParser {
    fn format_name(&self) -> &'static str {
        "exchange-json"
    }

    fn accepts(&self, locator: &Locator) -> bool {
        locator.extension().as_deref() == Some("json")
    }

    fn parse(&self, bytes: &[u8], deadline: Instant) -> Result<ParsedOntology, ParseError> {
        check_deadline(deadline)?;
        let document: ExchangeDocument =
            serde_json::from_slice(bytes).map_err(|e| ParseError::Malformed(e.to_string()))?;

        let (metadata, imports, projections) = match document {
            ExchangeDocument::Envelope {
                meta,
                imports,
                terms,
            } => (meta, imports, terms),
            ExchangeDocument::Bare(terms) => (BTreeMap::new(), Vec::new(), terms),
        };

        let mut terms = Vec::with_capacity(projections.len());
        for (key, projection) in projections {
            check_deadline(deadline)?;
            if key != projection.id {
                return Err(ParseError::Malformed(format!(
                    "term keyed {} declares id {}",
                    key, projection.id
                )));
            }
            terms.push(projection.into_term());
        }

        Ok(ParsedOntology {
            metadata,
            terms,
            imports,
        })
    }
}

/// Registry of format parsers
///
/// Parsers are consulted in registration order; the first one whose
/// `accepts` hook matches the locator wins.
pub struct ParserRegistry {
    parsers: Vec<Arc<dyn OntologyParser>>,
}

impl ParserRegistry {
    /// Create a registry with no parsers
    pub fn empty() -> Self {
        Self {
            parsers: Vec::new(),
        }
    }

    /// Register a parser after the existing ones
    pub fn register(&mut self, parser: Arc<dyn OntologyParser>) {
        self.parsers.push(parser);
    }

    /// Get the parser for a locator
    pub fn parser_for(&self, locator: &Locator) -> Option<Arc<dyn OntologyParser>> {
        self.parsers.iter().find(|p| p.accepts(locator)).cloned()
    }

    /// Names of the registered formats
    pub fn format_names(&self) -> Vec<&'static str> {
        self.parsers.iter().map(|p| p.format_name()).collect()
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(Arc::new(ExchangeParser));
        registry
    }
}

impl std::fmt::Debug for ParserRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParserRegistry")
            .field("formats", &self.format_names())
            .finish()
    }
}
