//! Integer field type

use serde_json::Value;

use super::base::FieldType;
use super::errors::{ValidationError, ValidationResult};
use super::value::FieldValue;

/// Configuration of an integer field.
///
/// `min_value <= max_value` is not checked here: an inverted range simply
/// rejects every value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntOptions {
    pub min_value: Option<i64>,
    pub max_value: Option<i64>,
}

/// An integer field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntField {
    min_value: Option<i64>,
    max_value: Option<i64>,
}

impl IntField {
    pub fn new(options: IntOptions) -> Self {
        Self {
            min_value: options.min_value,
            max_value: options.max_value,
        }
    }

    pub fn min_value(&self) -> Option<i64> {
        self.min_value
    }

    pub fn max_value(&self) -> Option<i64> {
        self.max_value
    }

    /// Returns true if both bounds are set and min exceeds max
    pub fn has_inverted_bounds(&self) -> bool {
        matches!((self.min_value, self.max_value), (Some(min), Some(max)) if min > max)
    }
}

/// Parses base-10 text the way integer literals are accepted from user
/// input: surrounding whitespace, an optional sign, and single underscores
/// between digits.
fn parse_decimal(text: &str) -> Option<i64> {
    let trimmed = text.trim();
    let digits = trimmed.trim_start_matches(|c: char| c == '+' || c == '-');
    if digits.len() + 1 < trimmed.len() {
        // More than one sign character
        return None;
    }
    if digits.starts_with('_') || digits.ends_with('_') || digits.contains("__") {
        return None;
    }
    trimmed.replace('_', "").parse::<i64>().ok()
}

/// Truncates toward zero; fails for NaN, infinities and out-of-range values.
fn truncate_float(f: f64) -> Option<i64> {
    // 2^63 is exactly representable; i64::MAX is not
    const UPPER: f64 = 9_223_372_036_854_775_808.0;
    let t = f.trunc();
    if t.is_finite() && t >= i64::MIN as f64 && t < UPPER {
        Some(t as i64)
    } else {
        None
    }
}

impl FieldType for IntField {
    fn type_name(&self) -> &'static str {
        "int"
    }

    fn to_python(&self, value: FieldValue) -> ValidationResult<FieldValue> {
        let converted = match value {
            FieldValue::Int(i) => Some(i),
            FieldValue::Bool(b) => Some(i64::from(b)),
            FieldValue::Float(f) => truncate_float(f),
            FieldValue::String(ref s) => parse_decimal(s),
            FieldValue::Json(Value::Number(ref n)) => n.as_i64(),
            _ => None,
        };

        converted.map(FieldValue::Int).ok_or_else(|| match value {
            FieldValue::String(s) => {
                ValidationError::conversion(format!("Cannot convert '{}' to an integer", s))
            }
            other => ValidationError::conversion(format!(
                "Cannot convert {} value to an integer",
                other.type_name()
            )),
        })
    }

    fn validate(&self, value: &FieldValue) -> ValidationResult<()> {
        let n = value
            .as_int()
            .ok_or_else(|| ValidationError::new("Integer value expected"))?;

        if let Some(min) = self.min_value {
            if n < min {
                return Err(ValidationError::new("Integer value is too small"));
            }
        }

        if let Some(max) = self.max_value {
            if n > max {
                return Err(ValidationError::new("Integer value is too large"));
            }
        }

        Ok(())
    }
}
