//! Embedded document field type
//!
//! The field holds a reference to an embedded schema, never an instance.
//! Storage conversion is delegated to the instance itself, so nesting
//! composes to any depth without this type knowing the nested layout.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use super::base::FieldType;
use super::errors::{ValidationError, ValidationResult};
use super::value::FieldValue;
use crate::document::{EmbeddedDocument, Schema};

/// A field whose value is an instance of an embedded schema
#[derive(Clone)]
pub struct EmbeddedDocumentField {
    document: Arc<Schema>,
}

impl EmbeddedDocumentField {
    /// Fails unless `document` is an embedded schema.
    pub fn new(document: Arc<Schema>) -> ValidationResult<Self> {
        if !document.is_embedded() {
            return Err(ValidationError::new(
                "Invalid embedded document class provided to an EmbeddedDocumentField",
            ));
        }
        Ok(Self { document })
    }

    /// Field for a typed embedded schema
    pub fn of<E: EmbeddedDocument>() -> ValidationResult<Self> {
        Self::new(E::schema())
    }

    /// The configured schema
    pub fn document(&self) -> &Arc<Schema> {
        &self.document
    }
}

impl fmt::Debug for EmbeddedDocumentField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmbeddedDocumentField")
            .field("document", &self.document.name())
            .finish()
    }
}

impl FieldType for EmbeddedDocumentField {
    fn type_name(&self) -> &'static str {
        "embedded_document"
    }

    // to_python stays identity: values arrive as instances already.

    fn to_storage(&self, value: &FieldValue) -> Value {
        match value.as_document() {
            Some(doc) => Value::Object(doc.to_storage()),
            None => value.to_json(),
        }
    }

    fn validate(&self, value: &FieldValue) -> ValidationResult<()> {
        match value.as_document() {
            Some(doc) if doc.is_instance_of(&self.document) => Ok(()),
            _ => Err(ValidationError::new(
                "Invalid embedded document instance provided to an EmbeddedDocumentField",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Document, DocumentSchema, SchemaKind};
    use crate::fields::{Field, FieldOptions, StringOptions};
    use serde_json::json;
    use std::sync::OnceLock;

    struct Point;

    impl DocumentSchema for Point {
        fn schema() -> Arc<Schema> {
            static SCHEMA: OnceLock<Arc<Schema>> = OnceLock::new();
            Arc::clone(SCHEMA.get_or_init(|| {
                Schema::builder("Point", SchemaKind::Embedded)
                    .field(
                        "label",
                        Field::string(StringOptions::default(), FieldOptions::default())
                            .expect("valid field"),
                    )
                    .build()
                    .expect("valid schema")
            }))
        }
    }

    impl EmbeddedDocument for Point {}

    struct Misdeclared;

    impl DocumentSchema for Misdeclared {
        fn schema() -> Arc<Schema> {
            static SCHEMA: OnceLock<Arc<Schema>> = OnceLock::new();
            Arc::clone(SCHEMA.get_or_init(|| {
                Schema::builder("Misdeclared", SchemaKind::Document)
                    .build()
                    .expect("valid schema")
            }))
        }
    }

    impl EmbeddedDocument for Misdeclared {}

    #[test]
    fn test_construction_rejects_top_level_schema() {
        let top = Schema::builder("User", SchemaKind::Document).build().unwrap();
        let err = EmbeddedDocumentField::new(top).unwrap_err();
        assert_eq!(
            err.message(),
            "Invalid embedded document class provided to an EmbeddedDocumentField"
        );
        assert!(!err.is_conversion());
    }

    #[test]
    fn test_typed_construction() {
        let field = EmbeddedDocumentField::of::<Point>().unwrap();
        assert!(Schema::same_type(field.document(), &Point::schema()));
        assert!(EmbeddedDocumentField::of::<Misdeclared>().is_err());
    }

    #[test]
    fn test_validate_exact_type() {
        let field = EmbeddedDocumentField::of::<Point>().unwrap();
        let point = Document::new(Point::schema()).with("label", "a").unwrap();
        assert!(field.validate(&FieldValue::Embedded(point)).is_ok());
    }

    #[test]
    fn test_validate_rejects_lookalike() {
        let field = EmbeddedDocumentField::of::<Point>().unwrap();

        // Same name, same fields, different schema
        let lookalike = Schema::builder("Point", SchemaKind::Embedded)
            .field(
                "label",
                Field::string(StringOptions::default(), FieldOptions::default()).unwrap(),
            )
            .build()
            .unwrap();
        let value = Document::new(lookalike).with("label", "a").unwrap();

        let err = field.validate(&FieldValue::Embedded(value)).unwrap_err();
        assert_eq!(
            err.message(),
            "Invalid embedded document instance provided to an EmbeddedDocumentField"
        );
    }

    #[test]
    fn test_validate_rejects_non_documents() {
        let field = EmbeddedDocumentField::of::<Point>().unwrap();
        assert!(field.validate(&FieldValue::from(json!({"label": "a"}))).is_err());
        assert!(field.validate(&FieldValue::from("a")).is_err());
    }

    #[test]
    fn test_to_python_is_identity() {
        let field = EmbeddedDocumentField::of::<Point>().unwrap();
        let point = FieldValue::Embedded(Document::new(Point::schema()));
        assert_eq!(field.to_python(point.clone()).unwrap(), point);
    }

    #[test]
    fn test_to_storage_delegates_to_instance() {
        let field = EmbeddedDocumentField::of::<Point>().unwrap();
        let point = Document::new(Point::schema()).with("label", "origin").unwrap();
        assert_eq!(
            field.to_storage(&FieldValue::Embedded(point)),
            json!({"label": "origin"})
        );
    }
}
