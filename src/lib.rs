//! fieldmap - typed field declarations for document stores
//!
//! Declare a document's shape once and get input validation, conversion
//! between native and storage values, and embedded documents.
//!
//! ```ignore
//! use fieldmap::document::{Document, Schema, SchemaKind};
//! use fieldmap::fields::{Field, FieldOptions, IntOptions, StringOptions};
//!
//! let user = Schema::builder("User", SchemaKind::Document)
//!     .field("name", Field::string(StringOptions::default(), FieldOptions::required())?)
//!     .field("age", Field::int(IntOptions { min_value: Some(0), max_value: None }, FieldOptions::default()))
//!     .build()?;
//!
//! let mut doc = Document::new(user);
//! doc.set("name", "Ada")?;
//! doc.set_raw("age", "36")?;
//! let stored = doc.prepare()?; // {"name": "Ada", "age": 36}
//! ```

pub mod cli;
pub mod document;
pub mod fields;
pub mod observability;
pub mod schema;

pub use document::{Document, DocumentSchema, EmbeddedDocument, Schema, SchemaBuilder, SchemaKind};
pub use fields::{
    EmbeddedDocumentField, Field, FieldOptions, FieldValue, IntField, ObjectId, ObjectIdField,
    StringField, ValidationError, ValidationResult,
};
