//! CLI-specific error types
//!
//! Every CLI error ends the process with a non-zero exit code.

use std::fmt;
use std::io;

use crate::fields::ValidationError;
use crate::schema::LoaderError;

/// CLI error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration or schema loading failed
    ConfigError,
    /// I/O error (stdin/stdout)
    IoError,
    /// Requested schema is not loaded
    UnknownSchema,
    /// Document failed conversion or validation
    InvalidDocument,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "FIELDMAP_CLI_CONFIG_ERROR",
            Self::IoError => "FIELDMAP_CLI_IO_ERROR",
            Self::UnknownSchema => "FIELDMAP_CLI_UNKNOWN_SCHEMA",
            Self::InvalidDocument => "FIELDMAP_CLI_INVALID_DOCUMENT",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    pub fn unknown_schema(name: &str) -> Self {
        Self::new(
            CliErrorCode::UnknownSchema,
            format!("Schema '{}' is not loaded", name),
        )
    }

    /// Get the error code
    pub fn code(&self) -> CliErrorCode {
        self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<LoaderError> for CliError {
    fn from(e: LoaderError) -> Self {
        Self::config_error(e.to_string())
    }
}

impl From<ValidationError> for CliError {
    fn from(e: ValidationError) -> Self {
        Self::new(CliErrorCode::InvalidDocument, e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
