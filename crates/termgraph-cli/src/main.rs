//! Termgraph CLI - Command-line interface for ontology term graphs.

use clap::Parser;
use termgraph_cli::commands;
use termgraph_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr; `RUST_LOG` takes precedence over `-v`.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

fn run(cli: Cli) -> termgraph_cli::Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let ontology_config = config.ontology_config(&cli);
    ontology_config
        .validate()
        .map_err(termgraph_cli::CliError::Config)?;

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Export(args) => commands::execute_export(args, &ontology_config),
        Command::Show(args) => commands::execute_show(args, &ontology_config, &formatter),
        Command::Ancestors(args) => {
            commands::execute_ancestors(args, &ontology_config, &formatter)
        }
        Command::Descendants(args) => {
            commands::execute_descendants(args, &ontology_config, &formatter)
        }
        Command::Stats(args) => commands::execute_stats(args, &ontology_config, &formatter),
        Command::Merge(args) => commands::execute_merge(args, &ontology_config),
    }
}
