//! Native value model for field conversion and validation
//!
//! A `FieldValue` is what flows between `to_python`, `validate` and
//! `to_storage`. Storage representations are plain `serde_json::Value`s;
//! object ids use MongoDB extended JSON (`{"$oid": "<hex>"}`).

use bson::oid::ObjectId;
use serde_json::{json, Number, Value};

use crate::document::Document;

/// A value held by (or destined for) a document field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Explicit null
    Null,
    /// Boolean
    Bool(bool),
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit floating point
    Float(f64),
    /// UTF-8 string
    String(String),
    /// Store-native unique identifier
    ObjectId(ObjectId),
    /// Instance of an embedded document schema
    Embedded(Document),
    /// Arrays and mappings with no field-level typing
    Json(Value),
}

impl FieldValue {
    /// Builds a value from its JSON form without any field-specific coercion.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    FieldValue::Int(i)
                } else if n.is_u64() {
                    // Beyond i64, keep the exact number
                    FieldValue::Json(Value::Number(n))
                } else {
                    FieldValue::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => FieldValue::String(s),
            other => FieldValue::Json(other),
        }
    }

    /// Plain JSON rendering, used as the default storage representation.
    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Null => Value::Null,
            FieldValue::Bool(b) => Value::Bool(*b),
            FieldValue::Int(i) => Value::Number((*i).into()),
            FieldValue::Float(f) => Number::from_f64(*f).map_or(Value::Null, Value::Number),
            FieldValue::String(s) => Value::String(s.clone()),
            FieldValue::ObjectId(oid) => json!({ "$oid": oid.to_hex() }),
            FieldValue::Embedded(doc) => Value::Object(doc.to_storage()),
            FieldValue::Json(v) => v.clone(),
        }
    }

    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Null => "null",
            FieldValue::Bool(_) => "bool",
            FieldValue::Int(_) => "int",
            FieldValue::Float(_) => "float",
            FieldValue::String(_) => "string",
            FieldValue::ObjectId(_) => "object_id",
            FieldValue::Embedded(_) => "embedded_document",
            FieldValue::Json(Value::Array(_)) => "array",
            FieldValue::Json(Value::Object(_)) => "mapping",
            FieldValue::Json(_) => "json",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_object_id(&self) -> Option<&ObjectId> {
        match self {
            FieldValue::ObjectId(oid) => Some(oid),
            _ => None,
        }
    }

    pub fn as_document(&self) -> Option<&Document> {
        match self {
            FieldValue::Embedded(doc) => Some(doc),
            _ => None,
        }
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        FieldValue::from_json(value)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        FieldValue::Int(i64::from(i))
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<ObjectId> for FieldValue {
    fn from(oid: ObjectId) -> Self {
        FieldValue::ObjectId(oid)
    }
}

impl From<Document> for FieldValue {
    fn from(doc: Document) -> Self {
        FieldValue::Embedded(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_scalars() {
        assert_eq!(FieldValue::from_json(json!(null)), FieldValue::Null);
        assert_eq!(FieldValue::from_json(json!(true)), FieldValue::Bool(true));
        assert_eq!(FieldValue::from_json(json!(42)), FieldValue::Int(42));
        assert_eq!(FieldValue::from_json(json!(2.5)), FieldValue::Float(2.5));
        assert_eq!(FieldValue::from_json(json!("x")), FieldValue::String("x".into()));
    }

    #[test]
    fn test_from_json_structures_stay_opaque() {
        let value = FieldValue::from_json(json!({"$oid": "abc"}));
        assert_eq!(value.type_name(), "mapping");

        let value = FieldValue::from_json(json!([1, 2]));
        assert_eq!(value.type_name(), "array");
    }

    #[test]
    fn test_object_id_renders_extended_json() {
        let oid = ObjectId::parse_str("507f1f77bcf86cd799439011").unwrap();
        assert_eq!(
            FieldValue::from(oid).to_json(),
            json!({"$oid": "507f1f77bcf86cd799439011"})
        );
    }

    #[test]
    fn test_non_finite_float_renders_null() {
        assert_eq!(FieldValue::Float(f64::NAN).to_json(), Value::Null);
    }
}
