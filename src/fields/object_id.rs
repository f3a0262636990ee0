//! Object id field type
//!
//! Identifier parsing and rendering belong to the store client's `bson`
//! crate; this field only routes values through it. No constraints are
//! checked.

pub use bson::oid::ObjectId;
use serde_json::Value;

use super::base::FieldType;
use super::errors::{ValidationError, ValidationResult};
use super::value::FieldValue;

/// A field holding a store-native unique identifier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ObjectIdField;

impl ObjectIdField {
    /// Fresh identifier, usable as a default producer
    pub fn generate() -> FieldValue {
        FieldValue::ObjectId(ObjectId::new())
    }
}

fn parse_hex(hex: &str) -> ValidationResult<FieldValue> {
    ObjectId::parse_str(hex)
        .map(FieldValue::ObjectId)
        .map_err(|_| ValidationError::conversion(format!("Invalid Object ID '{}'", hex)))
}

impl FieldType for ObjectIdField {
    fn type_name(&self) -> &'static str {
        "object_id"
    }

    fn to_python(&self, value: FieldValue) -> ValidationResult<FieldValue> {
        match value {
            FieldValue::String(ref hex) => parse_hex(hex),
            FieldValue::Json(Value::Object(ref map)) => {
                let hex = match map.get("$oid") {
                    Some(Value::String(hex)) if map.len() == 1 => Some(hex.clone()),
                    _ => None,
                };
                match hex {
                    Some(hex) => parse_hex(&hex),
                    None => Ok(value),
                }
            }
            other => Ok(other),
        }
    }
}
