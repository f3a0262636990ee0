//! Schema loading errors
//!
//! Field-level problems keep their `ValidationError` as the source; the
//! loader adds which schema (and file) they came from.

use std::io;

use thiserror::Error;

use crate::fields::ValidationError;

/// Result type for schema loading
pub type LoaderResult<T> = Result<T, LoaderError>;

#[derive(Debug, Error)]
pub enum LoaderError {
    /// Schema directory or file could not be read or written
    #[error("Failed to access '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Schema file is not a valid declaration
    #[error("Malformed schema file '{path}': {source}")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// A field or the schema itself failed construction
    #[error("Schema '{schema}' is invalid: {source}")]
    Invalid {
        schema: String,
        #[source]
        source: ValidationError,
    },

    /// Two schemas share a name
    #[error("Schema '{0}' is declared more than once")]
    DuplicateSchema(String),

    /// An embedded reference names no loadable schema (or forms a cycle)
    #[error("Schema '{schema}' embeds unknown or cyclic schema '{reference}'")]
    UnresolvedReference { schema: String, reference: String },

    /// min_value > max_value with strict bounds enabled
    #[error("Field '{field}' of schema '{schema}' has min_value greater than max_value")]
    InvertedBounds { schema: String, field: String },

    /// Configuration file could not be used
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl LoaderError {
    pub(crate) fn io(path: impl Into<String>, source: io::Error) -> Self {
        LoaderError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn malformed(path: impl Into<String>, source: serde_json::Error) -> Self {
        LoaderError::Malformed {
            path: path.into(),
            source,
        }
    }

    /// The underlying field error, if this is a construction failure
    pub fn validation_error(&self) -> Option<&ValidationError> {
        match self {
            LoaderError::Invalid { source, .. } => Some(source),
            _ => None,
        }
    }
}
