//! String field type
//!
//! Constraints:
//! - `max_length`: maximum number of characters (not bytes)
//! - `regex`: pattern that must match at the start of the value. The match
//!   does not have to consume the whole string.

use regex::Regex;

use super::base::FieldType;
use super::errors::{ValidationError, ValidationResult};
use super::value::FieldValue;

/// Configuration of a string field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringOptions {
    /// Pattern anchored at the start of the value
    pub regex: Option<String>,
    /// Maximum length in characters
    pub max_length: Option<usize>,
}

/// A unicode string field
#[derive(Debug, Clone)]
pub struct StringField {
    pattern: Option<String>,
    /// Compiled unanchored; a value matches when the leftmost match starts at 0
    regex: Option<Regex>,
    max_length: Option<usize>,
}

impl StringField {
    /// Compiles the pattern once; an invalid pattern fails construction.
    pub fn new(options: StringOptions) -> ValidationResult<Self> {
        let regex = match options.regex {
            Some(ref pattern) => Some(Regex::new(pattern).map_err(|e| {
                ValidationError::new(format!("Invalid validation regex '{}': {}", pattern, e))
            })?),
            None => None,
        };

        Ok(Self {
            pattern: options.regex,
            regex,
            max_length: options.max_length,
        })
    }

    /// Returns the pattern as declared
    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }

    pub fn max_length(&self) -> Option<usize> {
        self.max_length
    }
}

impl FieldType for StringField {
    fn type_name(&self) -> &'static str {
        "string"
    }

    fn validate(&self, value: &FieldValue) -> ValidationResult<()> {
        let s = value
            .as_str()
            .ok_or_else(|| ValidationError::new("String value expected"))?;

        if let Some(max) = self.max_length {
            if s.chars().count() > max {
                return Err(ValidationError::new("String value is too long"));
            }
        }

        if let Some(ref regex) = self.regex {
            if !regex.find(s).map_or(false, |m| m.start() == 0) {
                return Err(ValidationError::new(
                    "String value did not match validation regex",
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(regex: Option<&str>, max_length: Option<usize>) -> StringField {
        StringField::new(StringOptions {
            regex: regex.map(str::to_string),
            max_length,
        })
        .unwrap()
    }

    #[test]
    fn test_unconstrained_accepts_any_string() {
        let f = field(None, None);
        assert!(f.validate(&FieldValue::from("")).is_ok());
        assert!(f.validate(&FieldValue::from("anything at all")).is_ok());
    }

    #[test]
    fn test_max_length_boundary() {
        let f = field(None, Some(5));
        assert!(f.validate(&FieldValue::from("abcde")).is_ok());

        let err = f.validate(&FieldValue::from("abcdef")).unwrap_err();
        assert_eq!(err.message(), "String value is too long");
    }

    #[test]
    fn test_max_length_counts_characters() {
        let f = field(None, Some(3));
        // 3 characters, 6 bytes
        assert!(f.validate(&FieldValue::from("äöü")).is_ok());
    }

    #[test]
    fn test_zero_max_length() {
        let f = field(None, Some(0));
        assert!(f.validate(&FieldValue::from("")).is_ok());
        assert!(f.validate(&FieldValue::from("a")).is_err());
    }

    #[test]
    fn test_regex_is_prefix_anchored() {
        let f = field(Some("[a-z]+"), None);

        assert!(f.validate(&FieldValue::from("abc")).is_ok());
        // Match at start need not consume the whole value
        assert!(f.validate(&FieldValue::from("abc123")).is_ok());

        let err = f.validate(&FieldValue::from("123abc")).unwrap_err();
        assert_eq!(err.message(), "String value did not match validation regex");
    }

    #[test]
    fn test_regex_alternation_stays_anchored() {
        let f = field(Some("a|b"), None);
        assert!(f.validate(&FieldValue::from("bz")).is_ok());
        assert!(f.validate(&FieldValue::from("zb")).is_err());
    }

    #[test]
    fn test_regex_multiline_flag_stays_anchored() {
        let f = field(Some("(?m)^b"), None);
        assert!(f.validate(&FieldValue::from("a\nb")).is_err());
    }

    #[test]
    fn test_regex_verbose_mode_with_comment() {
        let f = field(Some("(?x)[a-z]+ # letters"), None);
        assert!(f.validate(&FieldValue::from("abc1")).is_ok());
        assert!(f.validate(&FieldValue::from("1abc")).is_err());
    }

    #[test]
    fn test_regex_later_match_does_not_count() {
        let f = field(Some(r"\d+"), None);
        assert!(f.validate(&FieldValue::from("12ab")).is_ok());
        assert!(f.validate(&FieldValue::from("ab12")).is_err());
    }

    #[test]
    fn test_length_checked_before_regex() {
        let f = field(Some("x"), Some(2));
        let err = f.validate(&FieldValue::from("abc")).unwrap_err();
        assert_eq!(err.message(), "String value is too long");
    }

    #[test]
    fn test_invalid_regex_fails_construction() {
        let result = StringField::new(StringOptions {
            regex: Some("(unclosed".into()),
            max_length: None,
        });
        let err = result.unwrap_err();
        assert!(!err.is_conversion());
        assert!(err.message().contains("(unclosed"));
    }

    #[test]
    fn test_non_string_rejected() {
        let f = field(None, None);
        let err = f.validate(&FieldValue::Int(3)).unwrap_err();
        assert_eq!(err.message(), "String value expected");
    }

    #[test]
    fn test_reuse_has_no_hidden_state() {
        let f = field(Some("ok"), Some(4));
        assert!(f.validate(&FieldValue::from("nope!")).is_err());
        assert!(f.validate(&FieldValue::from("okay")).is_ok());
        assert!(f.validate(&FieldValue::from("nope!")).is_err());
        assert!(f.validate(&FieldValue::from("okay")).is_ok());
    }

    #[test]
    fn test_passthrough_conversion() {
        let f = field(None, None);
        let v = FieldValue::from("same");
        assert_eq!(f.to_python(v.clone()).unwrap(), v);
        assert_eq!(f.to_storage(&v), serde_json::json!("same"));
    }
}
