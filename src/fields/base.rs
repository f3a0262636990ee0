//! Field type abstraction
//!
//! Every field type implements [`FieldType`]: `to_python` normalizes raw
//! input, `validate` accepts or rejects a normalized value, and `to_storage`
//! renders it for the store client. The defaults are identity, accept-all
//! and plain JSON; concrete types override what they need.
//!
//! [`Field`] wraps one of the closed set of field types together with the
//! options every field shares (`required`, `default`) and the name bound by
//! the owning schema.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use super::embedded::EmbeddedDocumentField;
use super::errors::{ValidationError, ValidationResult};
use super::int::{IntField, IntOptions};
use super::object_id::ObjectIdField;
use super::string::{StringField, StringOptions};
use super::value::FieldValue;
use crate::document::{EmbeddedDocument, Schema};

/// Conversion and validation contract shared by all field types.
///
/// Implementations must be pure: no interior mutation, no I/O, and only the
/// value passed in may be inspected.
pub trait FieldType: fmt::Debug + Send + Sync {
    /// Type name used in declarations and messages
    fn type_name(&self) -> &'static str;

    /// Coerce a raw value into the field's native form.
    fn to_python(&self, value: FieldValue) -> ValidationResult<FieldValue> {
        Ok(value)
    }

    /// Render a (pre-validated) value in its storage representation.
    fn to_storage(&self, value: &FieldValue) -> Value {
        value.to_json()
    }

    /// Check a native value against the field's constraints.
    fn validate(&self, _value: &FieldValue) -> ValidationResult<()> {
        Ok(())
    }
}

/// Default value of a field: a fixed value or a zero-argument producer
#[derive(Clone)]
pub enum FieldDefault {
    /// Cloned on every use
    Value(FieldValue),
    /// Called on every use
    Producer(Arc<dyn Fn() -> FieldValue + Send + Sync>),
}

impl FieldDefault {
    /// Wrap a producer function
    pub fn producer<F>(f: F) -> Self
    where
        F: Fn() -> FieldValue + Send + Sync + 'static,
    {
        FieldDefault::Producer(Arc::new(f))
    }

    /// Produce the default value
    pub fn materialize(&self) -> FieldValue {
        match self {
            FieldDefault::Value(v) => v.clone(),
            FieldDefault::Producer(f) => f(),
        }
    }
}

impl fmt::Debug for FieldDefault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldDefault::Value(v) => f.debug_tuple("Value").field(v).finish(),
            FieldDefault::Producer(_) => f.write_str("Producer(..)"),
        }
    }
}

/// Options recognized by every field type
#[derive(Debug, Clone, Default)]
pub struct FieldOptions {
    /// Whether a document must carry a value for the field
    pub required: bool,
    /// Value used when the document has none
    pub default: Option<FieldDefault>,
}

impl FieldOptions {
    /// Options for a required field without default
    pub fn required() -> Self {
        Self {
            required: true,
            default: None,
        }
    }

    /// Options for an optional field with a fixed default
    pub fn with_default(value: impl Into<FieldValue>) -> Self {
        Self {
            required: false,
            default: Some(FieldDefault::Value(value.into())),
        }
    }

    /// Options for an optional field with a default producer
    pub fn with_producer<F>(f: F) -> Self
    where
        F: Fn() -> FieldValue + Send + Sync + 'static,
    {
        Self {
            required: false,
            default: Some(FieldDefault::producer(f)),
        }
    }
}

/// The closed set of supported field types
#[derive(Debug, Clone)]
pub enum FieldKind {
    String(StringField),
    Int(IntField),
    ObjectId(ObjectIdField),
    EmbeddedDocument(EmbeddedDocumentField),
}

impl FieldKind {
    /// Borrow the variant as its field type contract
    pub fn as_field_type(&self) -> &dyn FieldType {
        match self {
            FieldKind::String(f) => f,
            FieldKind::Int(f) => f,
            FieldKind::ObjectId(f) => f,
            FieldKind::EmbeddedDocument(f) => f,
        }
    }
}

/// A field declaration: type, shared options and bound name
#[derive(Debug, Clone)]
pub struct Field {
    name: Option<String>,
    required: bool,
    default: Option<FieldDefault>,
    kind: FieldKind,
}

impl Field {
    /// Create a field from a configured type and shared options
    pub fn new(kind: FieldKind, options: FieldOptions) -> Self {
        Self {
            name: None,
            required: options.required,
            default: options.default,
            kind,
        }
    }

    /// Create a string field; fails if the regex does not compile
    pub fn string(config: StringOptions, options: FieldOptions) -> ValidationResult<Self> {
        Ok(Self::new(FieldKind::String(StringField::new(config)?), options))
    }

    /// Create an integer field
    pub fn int(config: IntOptions, options: FieldOptions) -> Self {
        Self::new(FieldKind::Int(IntField::new(config)), options)
    }

    /// Create an object id field
    pub fn object_id(options: FieldOptions) -> Self {
        Self::new(FieldKind::ObjectId(ObjectIdField), options)
    }

    /// Create an embedded document field; fails unless `document` is an
    /// embedded schema
    pub fn embedded(document: Arc<Schema>, options: FieldOptions) -> ValidationResult<Self> {
        Ok(Self::new(
            FieldKind::EmbeddedDocument(EmbeddedDocumentField::new(document)?),
            options,
        ))
    }

    /// Create an embedded document field for a typed embedded schema
    pub fn embedded_of<E: EmbeddedDocument>(options: FieldOptions) -> ValidationResult<Self> {
        Ok(Self::new(
            FieldKind::EmbeddedDocument(EmbeddedDocumentField::of::<E>()?),
            options,
        ))
    }

    /// Bind the attribute name. Only the owning schema does this, once.
    pub(crate) fn bind_name(&mut self, name: &str) -> ValidationResult<()> {
        if let Some(ref existing) = self.name {
            return Err(ValidationError::new(format!(
                "Field is already bound to name '{}'",
                existing
            )));
        }
        self.name = Some(name.to_string());
        Ok(())
    }

    /// Returns the bound name, if any
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn default(&self) -> Option<&FieldDefault> {
        self.default.as_ref()
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    /// Materialize the default value, calling the producer if there is one
    pub fn default_value(&self) -> Option<FieldValue> {
        self.default.as_ref().map(FieldDefault::materialize)
    }

    pub fn type_name(&self) -> &'static str {
        self.kind.as_field_type().type_name()
    }

    pub fn to_python(&self, value: FieldValue) -> ValidationResult<FieldValue> {
        self.kind.as_field_type().to_python(value)
    }

    pub fn to_storage(&self, value: &FieldValue) -> Value {
        self.kind.as_field_type().to_storage(value)
    }

    pub fn validate(&self, value: &FieldValue) -> ValidationResult<()> {
        self.kind.as_field_type().validate(value)
    }
}
