//! CLI argument definitions using clap
//!
//! Commands:
//! - flexdb [--config <path>] schema create|get|list|update|delete|exists
//! - flexdb [--config <path>] doc create|get|list|update|delete
//!
//! JSON inputs come from `--data`, `--file`, or stdin, in that order.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// flexdb - a schema-driven dynamic document store
#[derive(Parser, Debug)]
#[command(name = "flexdb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file; defaults apply when omitted
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage collection schemas
    Schema {
        #[command(subcommand)]
        action: SchemaAction,
    },

    /// Manage documents of a collection
    Doc {
        #[command(subcommand)]
        action: DocAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum SchemaAction {
    /// Register a schema from a JSON object with `collectionName` and `fields`
    Create {
        #[command(flatten)]
        input: JsonInput,

        /// Creator identity recorded on the schema
        #[arg(long)]
        created_by: Option<String>,
    },

    /// Show one schema
    Get { name: String },

    /// Show all schemas
    List,

    /// Replace a schema's fields with a JSON array of field definitions
    Update {
        name: String,

        #[command(flatten)]
        input: JsonInput,
    },

    /// Remove a schema and all documents of its collection
    Delete { name: String },

    /// Report whether a schema is registered
    Exists { name: String },
}

#[derive(Subcommand, Debug)]
pub enum DocAction {
    /// Insert a document from a JSON object
    Create {
        collection: String,

        #[command(flatten)]
        input: JsonInput,
    },

    /// Show one document
    Get { collection: String, id: String },

    /// Show the documents of a collection, optionally filtered
    List {
        collection: String,

        /// Equality filter, repeatable; VALUE is read as JSON when it parses
        #[arg(long = "where", value_name = "FIELD=VALUE")]
        filters: Vec<String>,
    },

    /// Merge a JSON object into a stored document
    Update {
        collection: String,
        id: String,

        #[command(flatten)]
        input: JsonInput,
    },

    /// Remove a document
    Delete { collection: String, id: String },
}

/// Where a JSON argument is read from
#[derive(Args, Debug, Default)]
pub struct JsonInput {
    /// Inline JSON
    #[arg(long, conflicts_with = "file")]
    pub data: Option<String>,

    /// Path to a JSON file
    #[arg(long)]
    pub file: Option<PathBuf>,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
