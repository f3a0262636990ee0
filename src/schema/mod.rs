//! Schema declarations, registry and loader
//!
//! Schemas can be declared in code with [`crate::document::Schema::builder`]
//! or in JSON files loaded at startup. Loading is all-or-nothing: any bad
//! declaration aborts it.

mod config;
mod errors;
mod loader;
mod registry;
mod types;

pub use config::LoaderConfig;
pub use errors::{LoaderError, LoaderResult};
pub use loader::SchemaLoader;
pub use registry::SchemaRegistry;
pub use types::{FieldDecl, SchemaDecl, GENERATE_DEFAULT};
