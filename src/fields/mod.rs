//! Field types for document schemas
//!
//! Each field value flows through three steps:
//!
//! 1. `to_python`: normalize raw input (may fail with a conversion error)
//! 2. `validate`: accept or reject the normalized value
//! 3. `to_storage`: render it for the document store client
//!
//! Field types are immutable after construction and hold no per-document
//! state, so a single declaration can be shared across threads.

mod base;
mod embedded;
mod errors;
mod int;
mod object_id;
mod string;
mod value;

pub use base::{Field, FieldDefault, FieldKind, FieldOptions, FieldType};
pub use embedded::EmbeddedDocumentField;
pub use errors::{ValidationError, ValidationErrorCode, ValidationResult};
pub use int::{IntField, IntOptions};
pub use object_id::{ObjectId, ObjectIdField};
pub use string::{StringField, StringOptions};
pub use value::FieldValue;
