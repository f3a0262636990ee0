//! CLI argument definitions using clap
//!
//! Commands:
//! - fieldmap [--config <path>] schemas
//! - fieldmap [--config <path>] check --schema <name>
//! - fieldmap [--config <path>] convert --schema <name>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// fieldmap - typed field declarations for document stores
#[derive(Parser, Debug)]
#[command(name = "fieldmap")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (defaults apply when omitted)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the schema directory from the configuration
    #[arg(long, global = true)]
    pub schema_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List loaded schemas and their fields
    Schemas,

    /// Validate one stored document read from stdin
    Check {
        /// Schema the document belongs to
        #[arg(long)]
        schema: String,
    },

    /// Convert one document read from stdin to its storage representation
    Convert {
        /// Schema the document belongs to
        #[arg(long)]
        schema: String,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
