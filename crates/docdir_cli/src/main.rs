//! docdir CLI
//!
//! Command-line access to a docdir store.
//!
//! # Commands
//!
//! - `write` - Store a JSON document
//! - `read` - Print a document
//! - `read-all` - Print every document of a collection
//! - `delete` - Remove a document or a whole collection
//! - `list` / `collections` - Show resource and collection names
//! - `seed` - Populate the `users` collection with sample records

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// docdir command-line document store tools.
#[derive(Parser)]
#[command(name = "docdir")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the store root directory
    #[arg(global = true, short, long, default_value = "./db")]
    path: PathBuf,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Store a JSON document (read from stdin when omitted)
    Write {
        /// Collection name
        collection: String,
        /// Resource name
        resource: String,
        /// Document as JSON text
        json: Option<String>,
    },

    /// Print a document
    Read {
        /// Collection name
        collection: String,
        /// Resource name
        resource: String,
    },

    /// Print every document of a collection
    ReadAll {
        /// Collection name
        collection: String,

        /// Decode the documents and print them as one JSON array
        #[arg(short, long)]
        decode: bool,
    },

    /// Delete a document, or the whole collection if no resource is given
    Delete {
        /// Collection name
        collection: String,
        /// Resource name
        resource: Option<String>,
    },

    /// List the resources of a collection
    List {
        /// Collection name
        collection: String,
    },

    /// List the collections of the store
    Collections,

    /// Populate the `users` collection with sample records
    Seed,

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Write {
            collection,
            resource,
            json,
        } => {
            commands::document::write(&cli.path, &collection, &resource, json.as_deref())?;
        }
        Commands::Read {
            collection,
            resource,
        } => {
            commands::document::read(&cli.path, &collection, &resource)?;
        }
        Commands::ReadAll { collection, decode } => {
            commands::collection::read_all(&cli.path, &collection, decode)?;
        }
        Commands::Delete {
            collection,
            resource,
        } => match resource {
            Some(resource) => commands::document::delete(&cli.path, &collection, &resource)?,
            None => commands::collection::delete(&cli.path, &collection)?,
        },
        Commands::List { collection } => {
            commands::collection::list(&cli.path, &collection)?;
        }
        Commands::Collections => {
            commands::collection::collections(&cli.path)?;
        }
        Commands::Seed => {
            commands::seed::run(&cli.path)?;
        }
        Commands::Version => {
            println!("docdir CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("docdir Core v{}", docdir_core::VERSION);
        }
    }

    Ok(())
}
