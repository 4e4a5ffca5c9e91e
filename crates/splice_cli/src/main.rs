//! Splice CLI
//!
//! Command-line tools for publishing, resolving, and inspecting content
//! in a file-backed splice ledger.
//!
//! # Commands
//!
//! - `publish` - Publish a file's content to the ledger
//! - `resolve` - Resolve a record id to its full content
//! - `inspect` - Show a parent record's envelope and segment set
//! - `verify` - Verify that a record's content resolves cleanly

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Splice command-line ledger tools.
#[derive(Parser)]
#[command(name = "splice")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the ledger directory
    #[arg(global = true, short, long)]
    ledger: Option<PathBuf>,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Publish a file's content to the ledger
    Publish {
        /// File to publish
        file: PathBuf,

        /// Media type of the content
        #[arg(short, long, default_value = "application/octet-stream")]
        content_type: String,

        /// Maximum payload bytes per segment record
        #[arg(long, default_value_t = 10 * 1024)]
        segment_size: usize,

        /// Largest content stored inline in the parent record
        #[arg(long, default_value_t = 10 * 1024)]
        inline_limit: usize,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Resolve a record id to its full content
    Resolve {
        /// Record id (hex, optional 0x prefix)
        id: String,

        /// Write the content to this file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Show a parent record's envelope and segment set
    Inspect {
        /// Record id (hex, optional 0x prefix)
        id: String,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Verify that a record's content resolves cleanly
    Verify {
        /// Record id (hex, optional 0x prefix)
        id: String,
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
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Publish {
            file,
            content_type,
            segment_size,
            inline_limit,
            format,
        } => {
            let ledger = cli.ledger.ok_or("Ledger path required for publish")?;
            commands::publish::run(
                &ledger,
                &file,
                &content_type,
                segment_size,
                inline_limit,
                &format,
            )?;
        }
        Commands::Resolve { id, out } => {
            let ledger = cli.ledger.ok_or("Ledger path required for resolve")?;
            commands::resolve::run(&ledger, &id, out.as_deref())?;
        }
        Commands::Inspect { id, format } => {
            let ledger = cli.ledger.ok_or("Ledger path required for inspect")?;
            commands::inspect::run(&ledger, &id, &format)?;
        }
        Commands::Verify { id } => {
            let ledger = cli.ledger.ok_or("Ledger path required for verify")?;
            commands::verify::run(&ledger, &id)?;
        }
        Commands::Version => {
            println!("splice CLI v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
