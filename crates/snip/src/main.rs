//! snip CLI - snippet documentation site generator.
//!
//! Provides commands for:
//! - `build`: Render the static site
//! - `topics`: List the built-in topics
//! - `outline`: Print the "On this page" outline of a topic

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BuildArgs, OutlineArgs, TopicsArgs};
use output::Output;

/// snip - snippet documentation site generator.
#[derive(Parser)]
#[command(name = "snip", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the static documentation site.
    Build(BuildArgs),
    /// List topics grouped as in the sidebar.
    Topics(TopicsArgs),
    /// Print the outline of a topic.
    Outline(OutlineArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let verbose = matches!(&cli.command, Commands::Build(args) if args.verbose);
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Build(args) => args.execute(),
        Commands::Topics(args) => args.execute(),
        Commands::Outline(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
