//! # panreader CLI
//!
//! Command-line front end for the pandoc-backed Markdown reader.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "panreader")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to settings file (defaults to panreader.yml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a document and print its HTML
    Read {
        /// Source document
        file: PathBuf,

        /// Emit JSON with content and metadata
        #[arg(long)]
        json: bool,
    },

    /// Print a document's metadata as JSON
    Metadata {
        /// Source document
        file: PathBuf,
    },

    /// Show the pandoc invocation for a document without running it
    Args {
        /// Source document
        file: PathBuf,

        /// Emit JSON instead of a command line
        #[arg(long)]
        json: bool,
    },

    /// Check documents (or directories of documents) for problems
    Check {
        /// Files or directories to inspect
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print a single setting by option name (e.g. PANDOC_BIBDIR)
    Config {
        key: String,
    },

    /// List the file extensions handled by the reader
    Extensions,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(if cli.verbose {
                tracing::Level::DEBUG.into()
            } else {
                tracing::Level::INFO.into()
            }),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let workspace = commands::Workspace::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Read { file, json } => commands::read_document(&workspace, &file, json),
        Commands::Metadata { file } => commands::show_metadata(&workspace, &file),
        Commands::Args { file, json } => commands::show_args(&workspace, &file, json),
        Commands::Check { paths, json } => commands::check_documents(&workspace, &paths, json),
        Commands::Config { key } => commands::show_setting(&workspace, &key),
        Commands::Extensions => commands::list_extensions(&workspace),
    }
}
