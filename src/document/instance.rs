//! Document instances
//!
//! Write path: `set_raw` (to_python) -> `validate` -> `to_storage`, or
//! `prepare` for all three at once. Read path: `from_storage` (to_python
//! only).

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{Map, Value};

use super::schema::Schema;
use crate::fields::{Field, FieldKind, FieldValue, ValidationError, ValidationResult};

/// One instance of a schema
#[derive(Debug, Clone)]
pub struct Document {
    schema: Arc<Schema>,
    values: HashMap<String, FieldValue>,
}

impl Document {
    /// Create an empty instance
    pub fn new(schema: Arc<Schema>) -> Self {
        Self {
            schema,
            values: HashMap::new(),
        }
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Strict type check against a schema
    pub fn is_instance_of(&self, schema: &Arc<Schema>) -> bool {
        Schema::same_type(&self.schema, schema)
    }

    fn declared(&self, name: &str) -> ValidationResult<&Field> {
        self.schema.field(name).ok_or_else(|| {
            ValidationError::new(format!(
                "Field '{}' is not declared by '{}'",
                name,
                self.schema.name()
            ))
            .at(name)
        })
    }

    /// Store a native value as is
    pub fn set(&mut self, name: &str, value: impl Into<FieldValue>) -> ValidationResult<()> {
        self.declared(name)?;
        self.values.insert(name.to_string(), value.into());
        Ok(())
    }

    /// Convert a raw value with the field's `to_python`, then store it
    pub fn set_raw(&mut self, name: &str, value: impl Into<FieldValue>) -> ValidationResult<()> {
        let converted = self
            .declared(name)?
            .to_python(value.into())
            .map_err(|e| e.at(name))?;
        self.values.insert(name.to_string(), converted);
        Ok(())
    }

    /// Builder-style `set`
    pub fn with(mut self, name: &str, value: impl Into<FieldValue>) -> ValidationResult<Self> {
        self.set(name, value)?;
        Ok(self)
    }

    /// Remove a stored value, returning it
    pub fn unset(&mut self, name: &str) -> Option<FieldValue> {
        self.values.remove(name)
    }

    /// The explicitly stored value, if any
    pub fn raw(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    /// The stored value, or the field's default when nothing (or null) is
    /// stored. Producers are called on every lookup.
    pub fn get(&self, name: &str) -> Option<FieldValue> {
        let field = self.schema.field(name)?;
        self.value_of(field)
    }

    fn value_of(&self, field: &Field) -> Option<FieldValue> {
        let name = field.name().unwrap_or_default();
        match self.values.get(name) {
            Some(v) if !v.is_null() => Some(v.clone()),
            _ => field.default_value().filter(|v| !v.is_null()),
        }
    }

    /// Store defaults for every unset field, recursing into embedded
    /// documents, so that producers run exactly once.
    pub fn fill_defaults(&mut self) {
        for field in self.schema.fields() {
            let name = field.name().unwrap_or_default();
            let unset = self.values.get(name).map_or(true, FieldValue::is_null);
            if unset {
                if let Some(default) = field.default_value() {
                    self.values.insert(name.to_string(), default);
                }
            }
        }
        for value in self.values.values_mut() {
            if let FieldValue::Embedded(doc) = value {
                doc.fill_defaults();
            }
        }
    }

    /// Validate every declared field in order, stopping at the first failure.
    ///
    /// Missing required fields fail; present values go through the field's
    /// `validate`, and embedded documents are validated recursively. Error
    /// paths are dotted (`address.city`).
    pub fn validate(&self) -> ValidationResult<()> {
        for field in self.schema.fields() {
            let name = field.name().unwrap_or_default();
            match self.value_of(field) {
                Some(value) => {
                    field.validate(&value).map_err(|e| e.at(name))?;
                    if let FieldValue::Embedded(ref doc) = value {
                        doc.validate().map_err(|e| e.at(name))?;
                    }
                }
                None if field.is_required() => {
                    return Err(ValidationError::required(name));
                }
                None => {}
            }
        }
        Ok(())
    }

    /// Storage representation: field name -> `to_storage` value, in
    /// declaration order. Unset fields without default are omitted.
    pub fn to_storage(&self) -> Map<String, Value> {
        let mut out = Map::new();
        for field in self.schema.fields() {
            if let Some(value) = self.value_of(field) {
                let name = field.name().unwrap_or_default();
                out.insert(name.to_string(), field.to_storage(&value));
            }
        }
        out
    }

    /// Write path: materialize defaults, validate, convert.
    pub fn prepare(&self) -> ValidationResult<Map<String, Value>> {
        let mut doc = self.clone();
        doc.fill_defaults();
        doc.validate()?;
        Ok(doc.to_storage())
    }

    /// Read path: rebuild an instance from its storage representation.
    ///
    /// Each declared field present in `stored` goes through `to_python`;
    /// mappings under embedded document fields become nested instances of
    /// the declared schema first. Undeclared keys and nulls are skipped.
    pub fn from_storage(schema: &Arc<Schema>, stored: &Value) -> ValidationResult<Self> {
        let map = stored.as_object().ok_or_else(|| {
            ValidationError::conversion(format!(
                "Stored '{}' document must be a mapping",
                schema.name()
            ))
        })?;

        let mut doc = Document::new(Arc::clone(schema));
        for field in schema.fields() {
            let name = field.name().unwrap_or_default();
            let raw = match map.get(name) {
                Some(Value::Null) | None => continue,
                Some(raw) => raw,
            };

            let value = match (field.kind(), raw) {
                (FieldKind::EmbeddedDocument(embedded), Value::Object(_)) => {
                    let nested = Document::from_storage(embedded.document(), raw)
                        .map_err(|e| e.at(name))?;
                    FieldValue::Embedded(nested)
                }
                _ => FieldValue::from_json(raw.clone()),
            };

            let value = field.to_python(value).map_err(|e| e.at(name))?;
            doc.values.insert(name.to_string(), value);
        }
        Ok(doc)
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        Schema::same_type(&self.schema, &other.schema) && self.values == other.values
    }
}
