//! Schema declarations as stored in schema files
//!
//! ```json
//! {
//!   "name": "User",
//!   "kind": "document",
//!   "fields": [
//!     {"name": "_id", "type": "object_id", "default": "generate"},
//!     {"name": "email", "type": "string", "required": true, "regex": "[^@]+@"},
//!     {"name": "age", "type": "int", "min_value": 0},
//!     {"name": "address", "type": "embedded_document", "document": "Address"}
//!   ]
//! }
//! ```
//!
//! Unknown keys are rejected, so a misspelled option fails at load time
//! instead of being ignored.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::{LoaderError, LoaderResult};
use super::registry::SchemaRegistry;
use crate::document::{Schema, SchemaKind};
use crate::fields::{
    EmbeddedDocumentField, Field, FieldDefault, FieldKind, FieldOptions, FieldValue, IntField,
    IntOptions, ObjectIdField, StringField, StringOptions, ValidationError,
};

/// Default marker that makes an object id field generate fresh ids
pub const GENERATE_DEFAULT: &str = "generate";

/// One field declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", deny_unknown_fields)]
pub enum FieldDecl {
    String {
        name: String,
        #[serde(default)]
        required: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default: Option<Value>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        regex: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_length: Option<usize>,
    },
    Int {
        name: String,
        #[serde(default)]
        required: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default: Option<Value>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_value: Option<i64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_value: Option<i64>,
    },
    ObjectId {
        name: String,
        #[serde(default)]
        required: bool,
        /// A fixed id, or `"generate"` for a fresh id per document
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default: Option<Value>,
    },
    EmbeddedDocument {
        name: String,
        #[serde(default)]
        required: bool,
        /// Name of an embedded schema
        document: String,
    },
}

impl FieldDecl {
    pub fn name(&self) -> &str {
        match self {
            FieldDecl::String { name, .. }
            | FieldDecl::Int { name, .. }
            | FieldDecl::ObjectId { name, .. }
            | FieldDecl::EmbeddedDocument { name, .. } => name,
        }
    }

    /// Name of the schema this field embeds, if any
    pub fn reference(&self) -> Option<&str> {
        match self {
            FieldDecl::EmbeddedDocument { document, .. } => Some(document),
            _ => None,
        }
    }

    /// Returns true for an int field declared with min_value > max_value
    pub fn has_inverted_bounds(&self) -> bool {
        matches!(
            self,
            FieldDecl::Int { min_value: Some(min), max_value: Some(max), .. } if min > max
        )
    }

    /// Build the field, resolving embedded references in `registry`.
    pub fn build(&self, schema: &str, registry: &SchemaRegistry) -> LoaderResult<Field> {
        let name = self.name();
        let invalid = |source: ValidationError| LoaderError::Invalid {
            schema: schema.to_string(),
            source: source.at(name),
        };

        let (kind, required, default) = match self {
            FieldDecl::String {
                required,
                default,
                regex,
                max_length,
                ..
            } => {
                let config = StringOptions {
                    regex: regex.clone(),
                    max_length: *max_length,
                };
                let kind = FieldKind::String(StringField::new(config).map_err(invalid)?);
                (kind, *required, default.as_ref())
            }
            FieldDecl::Int {
                required,
                default,
                min_value,
                max_value,
                ..
            } => {
                let config = IntOptions {
                    min_value: *min_value,
                    max_value: *max_value,
                };
                (FieldKind::Int(IntField::new(config)), *required, default.as_ref())
            }
            FieldDecl::ObjectId {
                required, default, ..
            } => {
                if let Some(Value::String(marker)) = default {
                    if marker == GENERATE_DEFAULT {
                        let options = FieldOptions {
                            required: *required,
                            ..FieldOptions::with_producer(ObjectIdField::generate)
                        };
                        return Ok(Field::object_id(options));
                    }
                }
                (FieldKind::ObjectId(ObjectIdField), *required, default.as_ref())
            }
            FieldDecl::EmbeddedDocument {
                required, document, ..
            } => {
                let target = registry
                    .get(document)
                    .ok_or_else(|| LoaderError::UnresolvedReference {
                        schema: schema.to_string(),
                        reference: document.clone(),
                    })?;
                let kind =
                    FieldKind::EmbeddedDocument(EmbeddedDocumentField::new(target).map_err(invalid)?);
                (kind, *required, None)
            }
        };

        let default = match default {
            Some(raw) => Some(
                kind.as_field_type()
                    .to_python(FieldValue::from_json(raw.clone()))
                    .map_err(invalid)?,
            ),
            None => None,
        };

        Ok(Field::new(
            kind,
            FieldOptions {
                required,
                default: default.map(FieldDefault::Value),
            },
        ))
    }
}

/// One schema declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaDecl {
    /// Unique schema name, used by embedded references
    pub name: String,
    /// Top-level or embedded
    pub kind: SchemaKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Fields in declaration order
    pub fields: Vec<FieldDecl>,
}

impl SchemaDecl {
    /// Names of the schemas this one embeds
    pub fn references(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().filter_map(FieldDecl::reference)
    }

    /// Build the schema; every reference must already be in `registry`.
    pub fn build(&self, registry: &SchemaRegistry) -> LoaderResult<Arc<Schema>> {
        let mut builder = Schema::builder(&self.name, self.kind);
        for decl in &self.fields {
            builder = builder.field(decl.name(), decl.build(&self.name, registry)?);
        }
        builder.build().map_err(|source| LoaderError::Invalid {
            schema: self.name.clone(),
            source,
        })
    }
}
