//! Document schemas and instances
//!
//! A [`Schema`] is an ordered set of named field declarations. Schemas are
//! shared as `Arc<Schema>` and their identity is the `Arc` itself: two
//! schemas built separately are different document types even when their
//! fields are identical.
//!
//! A [`Document`] is one instance of a schema. It holds the per-instance
//! values; fields never do.

mod instance;
mod schema;

pub use instance::Document;
pub use schema::{DocumentSchema, EmbeddedDocument, Schema, SchemaBuilder, SchemaKind};
