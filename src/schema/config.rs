//! Loader configuration
//!
//! ```json
//! {
//!   "schema_dir": "./schemas",
//!   "extension": "json",
//!   "strict_int_bounds": false,
//!   "log_level": "info"
//! }
//! ```
//!
//! Every key is optional.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::errors::{LoaderError, LoaderResult};
use crate::observability::Severity;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoaderConfig {
    /// Directory holding one declaration file per schema (default: "./schemas")
    #[serde(default = "default_schema_dir")]
    pub schema_dir: PathBuf,

    /// Extension of declaration files (default: "json")
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Reject int fields declared with min_value > max_value instead of
    /// only warning (default: false)
    #[serde(default)]
    pub strict_int_bounds: bool,

    /// Minimum severity written by the logger (default: info)
    #[serde(default = "default_log_level")]
    pub log_level: Severity,
}

fn default_schema_dir() -> PathBuf {
    PathBuf::from("./schemas")
}

fn default_extension() -> String {
    "json".to_string()
}

fn default_log_level() -> Severity {
    Severity::Info
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            schema_dir: default_schema_dir(),
            extension: default_extension(),
            strict_int_bounds: false,
            log_level: default_log_level(),
        }
    }
}

impl LoaderConfig {
    /// Config reading schemas from `schema_dir`
    pub fn with_schema_dir(schema_dir: impl Into<PathBuf>) -> Self {
        Self {
            schema_dir: schema_dir.into(),
            ..Default::default()
        }
    }

    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> LoaderResult<Self> {
        let content =
            fs::read_to_string(path).map_err(|e| LoaderError::io(path.display().to_string(), e))?;

        let config: LoaderConfig = serde_json::from_str(&content)
            .map_err(|e| LoaderError::malformed(path.display().to_string(), e))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> LoaderResult<()> {
        if self.extension.is_empty() || self.extension.starts_with('.') {
            return Err(LoaderError::Config(format!(
                "extension must be non-empty and given without a leading dot, got '{}'",
                self.extension
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = LoaderConfig::default();
        assert_eq!(config.schema_dir, PathBuf::from("./schemas"));
        assert_eq!(config.extension, "json");
        assert!(!config.strict_int_bounds);
        assert_eq!(config.log_level, Severity::Info);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: LoaderConfig =
            serde_json::from_str(r#"{"strict_int_bounds": true, "log_level": "warn"}"#).unwrap();
        assert!(config.strict_int_bounds);
        assert_eq!(config.log_level, Severity::Warn);
        assert_eq!(config.extension, "json");
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fieldmap.json");
        fs::write(&path, r#"{"schema_dir": "/srv/schemas"}"#).unwrap();

        let config = LoaderConfig::load(&path).unwrap();
        assert_eq!(config.schema_dir, PathBuf::from("/srv/schemas"));
    }

    #[test]
    fn test_bad_extension_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fieldmap.json");
        fs::write(&path, r#"{"extension": ".json"}"#).unwrap();

        assert!(matches!(
            LoaderConfig::load(&path),
            Err(LoaderError::Config(_))
        ));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result: Result<LoaderConfig, _> = serde_json::from_str(r#"{"schemadir": "x"}"#);
        assert!(result.is_err());
    }
}
