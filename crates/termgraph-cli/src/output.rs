//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::{Color, Colorize};
use serde::Serialize;
use std::collections::BTreeMap;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};
use termgraph_ontology::ImportWarning;
use termgraph_store::{TermRef, TermSet};

/// Summary of one loaded ontology.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    /// Number of terms, stubs included
    pub terms: usize,
    /// Number of placeholder terms
    pub stubs: usize,
    /// Edge count per relationship name
    pub relations: BTreeMap<String, usize>,
    /// Declared imports
    pub imports: Vec<String>,
    /// Imports that could not be loaded
    pub warnings: Vec<ImportWarning>,
}

#[derive(Serialize)]
struct TermSummary<'a> {
    id: &'a str,
    name: &'a str,
}

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a list of terms.
    pub fn format_terms(&self, terms: &TermSet<'_>) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let rows: Vec<TermSummary<'_>> = terms
                    .iter()
                    .map(|t| TermSummary {
                        id: &t.term().id,
                        name: &t.term().name,
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&rows)?)
            }
            OutputFormat::Table => {
                if terms.is_empty() {
                    return Ok(self.colorize("No terms found.", Color::Yellow));
                }
                let mut builder = Builder::default();
                builder.push_record(["ID", "Name"]);
                for term in terms.iter() {
                    builder.push_record([term.id.as_str(), term.name.as_str()]);
                }
                Ok(self.render(builder))
            }
            OutputFormat::Quiet => Ok(terms.ids().join("\n")),
        }
    }

    /// Format one term with its direct neighbours.
    pub fn format_term(&self, term: TermRef<'_>) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let value = serde_json::json!({
                    "term": termgraph_store::dereference(term.term()),
                    "parents": term.parents().ids(),
                    "children": term.children().ids(),
                });
                Ok(serde_json::to_string_pretty(&value)?)
            }
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Field", "Value"]);
                builder.push_record(["ID", term.id.as_str()]);
                builder.push_record(["Name", term.name.as_str()]);
                if !term.description.is_empty() {
                    builder.push_record(["Definition", term.description.as_str()]);
                }
                for (key, value) in &term.attributes {
                    builder.push_record([key.clone(), value.values().join(", ")]);
                }
                builder.push_record(["Parents".to_string(), describe(&term.parents())]);
                builder.push_record(["Children".to_string(), describe(&term.children())]);
                Ok(self.render(builder))
            }
            OutputFormat::Quiet => Ok(term.id.clone()),
        }
    }

    /// Format an ontology summary.
    pub fn format_stats(&self, stats: &Stats) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(stats)?),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Metric", "Value"]);
                builder.push_record(["Terms".to_string(), stats.terms.to_string()]);
                builder.push_record(["Stubs".to_string(), stats.stubs.to_string()]);
                for (relationship, count) in &stats.relations {
                    builder.push_record([relationship.clone(), count.to_string()]);
                }
                builder.push_record(["Imports".to_string(), stats.imports.len().to_string()]);
                builder.push_record(["Warnings".to_string(), stats.warnings.len().to_string()]);

                let mut output = self.render(builder);
                for warning in &stats.warnings {
                    output.push('\n');
                    output.push_str(&self.warning(&warning.to_string()));
                }
                Ok(output)
            }
            OutputFormat::Quiet => Ok(stats.terms.to_string()),
        }
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), Color::Yellow)
    }

    fn render(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: Color) -> String {
        if self.color_enabled {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }
}

/// `id (name)` pairs joined by commas, or `-` for an empty set.
fn describe(terms: &TermSet<'_>) -> String {
    if terms.is_empty() {
        return "-".to_string();
    }
    terms
        .iter()
        .map(|t| {
            if t.name.is_empty() {
                t.id.clone()
            } else {
                format!("{} ({})", t.id, t.name)
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use termgraph_domain::Term;
    use termgraph_ontology::Ontology;

    fn ontology() -> Ontology {
        let mut ontology = Ontology::new();
        ontology
            .include([
                Term::new("A", "Alpha").with_description("the first"),
                Term::new("B", "Beta").with_relation("is_a", ["A"]),
            ])
            .unwrap();
        ontology
    }

    #[test]
    fn test_json_term() {
        let ontology = ontology();
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_term(ontology.get("A").unwrap()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["term"]["name"], "Alpha");
        assert_eq!(value["children"][0], "B");
    }

    #[test]
    fn test_table_term() {
        let ontology = ontology();
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_term(ontology.get("B").unwrap()).unwrap();
        assert!(output.contains("Parents"));
        assert!(output.contains("A (Alpha)"));
    }

    #[test]
    fn test_quiet_terms() {
        let ontology = ontology();
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let parents = ontology.get("B").unwrap().transitive_parents(-1, true);
        assert_eq!(formatter.format_terms(&parents).unwrap(), "A");
    }

    #[test]
    fn test_empty_terms_table() {
        let ontology = ontology();
        let formatter = Formatter::new(OutputFormat::Table, false);
        let parents = ontology.get("A").unwrap().parents();
        assert!(formatter.format_terms(&parents).unwrap().contains("No terms found"));
    }

    #[test]
    fn test_stats_table_lists_warnings() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let stats = Stats {
            terms: 2,
            warnings: vec![ImportWarning {
                locator: "gone.json".into(),
                kind: "NotFound".into(),
                message: "Not found: gone.json".into(),
            }],
            ..Stats::default()
        };
        let output = formatter.format_stats(&stats).unwrap();
        assert!(output.contains("Terms"));
        assert!(output.contains("NotFound occurred during import of gone.json"));
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.warning("test"), "⚠ test");
    }
}
