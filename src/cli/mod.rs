//! CLI module for fieldmap
//!
//! Provides command-line interface for:
//! - schemas: list loaded schema declarations
//! - check: validate a stored document
//! - convert: produce the storage representation of a document

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{check, convert, describe_schemas, load_schemas, run, run_command};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::read_document;
