//! Schema definitions

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::fields::{Field, ValidationError, ValidationResult};

/// Whether a schema describes top-level documents or nested ones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaKind {
    /// Stored on its own in a collection
    Document,
    /// Only stored inside another document
    Embedded,
}

impl SchemaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaKind::Document => "document",
            SchemaKind::Embedded => "embedded",
        }
    }
}

/// An ordered, immutable set of named field declarations
#[derive(Debug)]
pub struct Schema {
    name: String,
    kind: SchemaKind,
    fields: Vec<Field>,
}

impl Schema {
    /// Start declaring a schema
    pub fn builder(name: impl Into<String>, kind: SchemaKind) -> SchemaBuilder {
        SchemaBuilder {
            name: name.into(),
            kind,
            fields: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> SchemaKind {
        self.kind
    }

    /// Returns true if instances may be nested in other documents
    pub fn is_embedded(&self) -> bool {
        self.kind == SchemaKind::Embedded
    }

    /// Fields in declaration order; every one has its name bound
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Looks up a field by name
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name() == Some(name))
    }

    /// Field names in declaration order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().filter_map(Field::name)
    }

    /// Type identity: true only for the very same schema
    pub fn same_type(a: &Arc<Schema>, b: &Arc<Schema>) -> bool {
        Arc::ptr_eq(a, b)
    }
}

/// Collects field declarations and binds their names
pub struct SchemaBuilder {
    name: String,
    kind: SchemaKind,
    fields: Vec<(String, Field)>,
}

impl SchemaBuilder {
    /// Declare a field under `name`
    pub fn field(mut self, name: impl Into<String>, field: Field) -> Self {
        self.fields.push((name.into(), field));
        self
    }

    /// Bind every field name and freeze the schema.
    ///
    /// Fails on duplicate or empty names, or on a field that is already
    /// bound to another schema.
    pub fn build(self) -> ValidationResult<Arc<Schema>> {
        let mut seen = HashSet::new();
        let mut fields = Vec::with_capacity(self.fields.len());

        for (name, mut field) in self.fields {
            if name.is_empty() {
                return Err(ValidationError::new(format!(
                    "Schema '{}' declares a field with an empty name",
                    self.name
                )));
            }
            if !seen.insert(name.clone()) {
                return Err(ValidationError::new(format!(
                    "Schema '{}' declares field '{}' more than once",
                    self.name, name
                ))
                .at(&name));
            }
            field.bind_name(&name).map_err(|e| e.at(&name))?;
            fields.push(field);
        }

        Ok(Arc::new(Schema {
            name: self.name,
            kind: self.kind,
            fields,
        }))
    }
}

/// A Rust type that declares a document layout.
///
/// `schema()` must return the same `Arc` on every call (typically cached in
/// a `OnceLock`), since that `Arc` is the type identity of the instances.
pub trait DocumentSchema {
    fn schema() -> Arc<Schema>;
}

/// Capability marker for document types that can be embedded.
pub trait EmbeddedDocument: DocumentSchema {}
