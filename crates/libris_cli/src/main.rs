//! Libris CLI
//!
//! Command-line tools for Libris snapshot files.
//!
//! # Commands
//!
//! - `inspect` - Display snapshot metadata and counts
//! - `export` - Write the catalog to a delimited text file
//! - `import` - Read a delimited text file into the catalog
//! - `report` - Print leaderboards, category counts and overdue actors

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Libris command-line tools.
#[derive(Parser)]
#[command(name = "libris")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the snapshot file
    #[arg(global = true, short, long)]
    snapshot: Option<PathBuf>,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display snapshot metadata and counts
    Inspect {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Export the catalog to a delimited text file
    Export {
        /// Output file
        csv: PathBuf,

        /// Field delimiter (defaults to the configured one)
        #[arg(short, long)]
        delimiter: Option<String>,
    },

    /// Import a delimited text file into the catalog
    Import {
        /// Input file
        csv: PathBuf,

        /// Field delimiter (defaults to the configured one)
        #[arg(short, long)]
        delimiter: Option<String>,

        /// Replace the catalog instead of appending to it
        #[arg(short, long)]
        replace: bool,
    },

    /// Print leaderboards, category counts and overdue actors
    Report {
        /// Maximum rows per leaderboard
        #[arg(short, long, default_value = "5")]
        limit: usize,
    },

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Inspect { format } => {
            let path = cli.snapshot.ok_or("Snapshot path required for inspect")?;
            commands::inspect::run(&path, &format)?;
        }
        Commands::Export { csv, delimiter } => {
            let path = cli.snapshot.ok_or("Snapshot path required for export")?;
            commands::export::run(&path, &csv, delimiter.as_deref())?;
        }
        Commands::Import {
            csv,
            delimiter,
            replace,
        } => {
            let path = cli.snapshot.ok_or("Snapshot path required for import")?;
            commands::import::run(&path, &csv, delimiter.as_deref(), replace)?;
        }
        Commands::Report { limit } => {
            let path = cli.snapshot.ok_or("Snapshot path required for report")?;
            commands::report::run(&path, limit)?;
        }
        Commands::Version => {
            println!("Libris CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("Libris Core v{}", libris_core::VERSION);
        }
    }

    Ok(())
}
