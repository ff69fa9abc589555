//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};

/// Termgraph CLI - Load, query and export ontology term graphs.
#[derive(Debug, Parser)]
#[command(name = "termgraph")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "TERMGRAPH_CONFIG")]
    pub config: Option<String>,

    /// Do not load declared imports
    #[arg(long, global = true)]
    pub no_imports: bool,

    /// Import levels to follow (negative for unbounded)
    #[arg(long, global = true, allow_hyphen_values = true)]
    pub import_depth: Option<i64>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (IDs only)
    Quiet,
}

/// Serialized form of a whole ontology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportForm {
    /// `[Term]` stanzas
    Text,
    /// JSON exchange form keyed by id
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print an ontology in text or exchange form
    Export(ExportArgs),

    /// Show one term with its direct parents and children
    Show(ShowArgs),

    /// List the ancestors of a term
    Ancestors(TraverseArgs),

    /// List the descendants of a term
    Descendants(TraverseArgs),

    /// Summarize an ontology
    Stats(StatsArgs),

    /// Load several ontologies and merge them left to right
    Merge(MergeArgs),
}

/// Arguments for the export command.
#[derive(Debug, Parser)]
pub struct ExportArgs {
    /// Path or URL of the ontology
    pub locator: String,

    /// Serialized form
    #[arg(long, value_enum, default_value = "text")]
    pub form: ExportForm,
}

/// Arguments for the show command.
#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// Path or URL of the ontology
    pub locator: String,

    /// Term id
    pub id: String,
}

/// Arguments for the ancestors and descendants commands.
#[derive(Debug, Parser)]
pub struct TraverseArgs {
    /// Path or URL of the ontology
    pub locator: String,

    /// Term id
    pub id: String,

    /// Levels to walk (negative for unbounded)
    #[arg(short, long, default_value_t = -1, allow_hyphen_values = true)]
    pub depth: i64,

    /// Only report terms exactly `depth` levels away
    #[arg(long)]
    pub leaves_only: bool,
}

/// Arguments for the stats command.
#[derive(Debug, Parser)]
pub struct StatsArgs {
    /// Path or URL of the ontology
    pub locator: String,
}

/// Arguments for the merge command.
#[derive(Debug, Parser)]
pub struct MergeArgs {
    /// Paths or URLs, later ones win on conflicting ids
    #[arg(required = true, num_args = 1..)]
    pub locators: Vec<String>,

    /// Serialized form
    #[arg(long, value_enum, default_value = "text")]
    pub form: ExportForm,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
