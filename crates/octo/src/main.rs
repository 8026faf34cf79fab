//! octo CLI - Markdown to Octopress/Jekyll post exporter.
//!
//! Provides commands for:
//! - `export`: Export a markdown file as a post
//! - `rename`: Rename a post after its publish date
//! - `date`: Show the date prefix of a post's file name

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{DateArgs, ExportArgs, RenameArgs};
use output::Output;

/// octo - Markdown to Octopress/Jekyll post exporter.
#[derive(Parser)]
#[command(name = "octo", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a markdown file as a post.
    Export(ExportArgs),
    /// Rename a post so its file name starts with its publish date.
    Rename(RenameArgs),
    /// Print the date prefix of a post's file name.
    Date(DateArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Export(args) => args.verbose,
            Self::Rename(args) => args.verbose,
            Self::Date(_) => false,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.command.verbose() {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Export(args) => args.execute(),
        Commands::Rename(args) => args.execute(),
        Commands::Date(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
