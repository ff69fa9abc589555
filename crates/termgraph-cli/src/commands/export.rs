//! Export command implementation.

use super::load;
use crate::cli::{ExportArgs, ExportForm};
use crate::error::Result;
use termgraph_ontology::{Ontology, OntologyConfig};

/// Execute the export command.
pub fn execute_export(args: ExportArgs, config: &OntologyConfig) -> Result<()> {
    let ontology = load(&args.locator, config)?;
    println!("{}", render(&ontology, args.form)?);
    Ok(())
}

/// Serialize a whole ontology in the requested form.
pub fn render(ontology: &Ontology, form: ExportForm) -> Result<String> {
    match form {
        ExportForm::Text => Ok(ontology.to_text_form()),
        ExportForm::Json => Ok(ontology.to_exchange_json()?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use termgraph_domain::Term;

    #[test]
    fn test_render_both_forms() {
        let mut ontology = Ontology::new();
        ontology
            .include([
                Term::new("A", "Alpha"),
                Term::new("B", "Beta").with_relation("is_a", ["A"]),
            ])
            .unwrap();

        let text = render(&ontology, ExportForm::Text).unwrap();
        assert!(text.contains("is_a: A ! Alpha"));

        let json = render(&ontology, ExportForm::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["B"]["relations"]["is_a"][0], "A");
    }
}
