//! Field error types
//!
//! Error codes:
//! - FIELD_VALIDATION_FAILED: a value (or a field configuration) was rejected
//! - FIELD_CONVERSION_FAILED: raw input could not be coerced into the field's type
//!
//! Both codes belong to one family. Construction-time configuration errors use
//! `FIELD_VALIDATION_FAILED` as well; callers track the phase themselves.

use std::fmt;

/// Error codes of the validation family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorCode {
    /// Value violates a field constraint, or a field was misconfigured
    ValidationFailed,
    /// Raw value could not be coerced before constraint checking
    ConversionFailed,
}

impl ValidationErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            ValidationErrorCode::ValidationFailed => "FIELD_VALIDATION_FAILED",
            ValidationErrorCode::ConversionFailed => "FIELD_CONVERSION_FAILED",
        }
    }
}

impl fmt::Display for ValidationErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Error raised by field construction, conversion and validation.
///
/// A conversion failure is a specialization of the same error: check
/// [`ValidationError::is_conversion`] to tell them apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    code: ValidationErrorCode,
    message: String,
    /// Dotted path of the field, filled in by the document layer
    field: Option<String>,
}

impl ValidationError {
    /// Create a constraint violation error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: ValidationErrorCode::ValidationFailed,
            message: message.into(),
            field: None,
        }
    }

    /// Create a conversion error
    pub fn conversion(message: impl Into<String>) -> Self {
        Self {
            code: ValidationErrorCode::ConversionFailed,
            message: message.into(),
            field: None,
        }
    }

    /// Create a missing required field error
    pub fn required(field: impl Into<String>) -> Self {
        let field = field.into();
        Self {
            code: ValidationErrorCode::ValidationFailed,
            message: format!("Field \"{}\" is required", field),
            field: Some(field),
        }
    }

    /// Attach the field name, prefixing any path already present.
    ///
    /// Nested documents report `inner`; the enclosing document turns that
    /// into `outer.inner`.
    pub fn at(mut self, field: &str) -> Self {
        self.field = Some(match self.field.take() {
            Some(inner) => format!("{}.{}", field, inner),
            None => field.to_string(),
        });
        self
    }

    /// Returns the error code
    pub fn code(&self) -> ValidationErrorCode {
        self.code
    }

    /// Returns the human-readable message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the dotted field path if known
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Returns whether this is a conversion failure
    pub fn is_conversion(&self) -> bool {
        self.code == ValidationErrorCode::ConversionFailed
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)?;
        if let Some(ref field) = self.field {
            write!(f, " (field '{}')", field)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Result type for field operations
pub type ValidationResult<T> = Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ValidationErrorCode::ValidationFailed.code(), "FIELD_VALIDATION_FAILED");
        assert_eq!(ValidationErrorCode::ConversionFailed.code(), "FIELD_CONVERSION_FAILED");
    }

    #[test]
    fn test_conversion_is_same_family() {
        let err = ValidationError::conversion("bad input");
        assert!(err.is_conversion());
        assert_eq!(err.code(), ValidationErrorCode::ConversionFailed);

        let err = ValidationError::new("too long");
        assert!(!err.is_conversion());
    }

    #[test]
    fn test_path_nesting() {
        let err = ValidationError::new("String value is too long")
            .at("city")
            .at("address");
        assert_eq!(err.field(), Some("address.city"));
        assert_eq!(err.message(), "String value is too long");
    }

    #[test]
    fn test_display_includes_code_and_field() {
        let err = ValidationError::required("email");
        let display = format!("{}", err);
        assert!(display.contains("FIELD_VALIDATION_FAILED"));
        assert!(display.contains("Field \"email\" is required"));
        assert!(display.contains("(field 'email')"));
    }
}
