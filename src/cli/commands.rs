//! CLI command implementations
//!
//! Every command loads the schema directory first; a bad declaration stops
//! the command before any document is read.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde_json::{json, Value};

use crate::document::Document;
use crate::observability::{log_event_with_fields, Event, Logger};
use crate::schema::{LoaderConfig, SchemaLoader, SchemaRegistry};

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};
use super::io::{error_response, ok_response, read_document, write_line};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    run_command(Cli::parse_args())
}

/// Run an already parsed command line.
///
/// Every outcome, including configuration and input failures, is written
/// to stdout as one JSON response.
pub fn run_command(cli: Cli) -> CliResult<()> {
    respond(execute(cli), &mut io::stdout())
}

fn execute(cli: Cli) -> CliResult<Value> {
    let loader = load_schemas(cli.config.as_deref(), cli.schema_dir)?;

    match cli.command {
        Command::Schemas => Ok(describe_schemas(loader.registry())),
        Command::Check { schema } => {
            let document = read_document()?;
            check(&loader, &schema, &document)
        }
        Command::Convert { schema } => {
            let document = read_document()?;
            convert(&loader, &schema, &document)
        }
    }
}

fn respond<W: Write>(result: CliResult<Value>, writer: &mut W) -> CliResult<()> {
    match result {
        Ok(data) => write_line(writer, &ok_response(data)),
        Err(e) => {
            write_line(writer, &error_response(e.code_str(), e.message()))?;
            Err(e)
        }
    }
}

/// Resolve configuration and load every schema
pub fn load_schemas(
    config_path: Option<&Path>,
    schema_dir: Option<PathBuf>,
) -> CliResult<SchemaLoader> {
    let mut config = match config_path {
        Some(path) => LoaderConfig::load(path)?,
        None => LoaderConfig::default(),
    };
    if let Some(dir) = schema_dir {
        config.schema_dir = dir;
    }

    Logger::set_min_severity(config.log_level);
    if let Some(path) = config_path {
        let path = path.display().to_string();
        log_event_with_fields(Event::ConfigLoaded, &[("path", path.as_str())]);
    }

    let mut loader = SchemaLoader::new(config);
    loader.load_all()?;
    Ok(loader)
}

/// Summary of every registered schema
pub fn describe_schemas(registry: &SchemaRegistry) -> Value {
    let schemas: Vec<Value> = registry
        .names()
        .into_iter()
        .filter_map(|name| registry.get(name))
        .map(|schema| {
            let fields: Vec<Value> = schema
                .fields()
                .iter()
                .map(|f| {
                    json!({
                        "name": f.name(),
                        "type": f.type_name(),
                        "required": f.is_required(),
                    })
                })
                .collect();
            json!({
                "name": schema.name(),
                "kind": schema.kind().as_str(),
                "fields": fields,
            })
        })
        .collect();

    Value::Array(schemas)
}

/// Read path then validation for a stored document
pub fn check(loader: &SchemaLoader, schema: &str, stored: &Value) -> CliResult<Value> {
    let schema = loader
        .get(schema)
        .ok_or_else(|| CliError::unknown_schema(schema))?;
    let document = Document::from_storage(&schema, stored)?;
    document.validate()?;
    Ok(json!({ "valid": true }))
}

/// Read path then the full write path, yielding the storage representation
pub fn convert(loader: &SchemaLoader, schema: &str, stored: &Value) -> CliResult<Value> {
    let schema = loader
        .get(schema)
        .ok_or_else(|| CliError::unknown_schema(schema))?;
    let document = Document::from_storage(&schema, stored)?;
    Ok(Value::Object(document.prepare()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::CliErrorCode;
    use crate::observability::Severity;
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> (TempDir, SchemaLoader) {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("address.json"),
            json!({
                "name": "Address",
                "kind": "embedded",
                "fields": [{"name": "city", "type": "string", "required": true}]
            })
            .to_string(),
        )
        .unwrap();
        fs::write(
            tmp.path().join("user.json"),
            json!({
                "name": "User",
                "kind": "document",
                "fields": [
                    {"name": "name", "type": "string", "required": true, "max_length": 8},
                    {"name": "age", "type": "int", "min_value": 0},
                    {"name": "address", "type": "embedded_document", "document": "Address"}
                ]
            })
            .to_string(),
        )
        .unwrap();

        let loader = load_schemas(None, Some(tmp.path().to_path_buf())).unwrap();
        (tmp, loader)
    }

    #[test]
    fn test_describe_schemas() {
        let (_tmp, loader) = setup();
        let summary = describe_schemas(loader.registry());

        assert_eq!(summary[0]["name"], "Address");
        assert_eq!(summary[1]["name"], "User");
        assert_eq!(summary[1]["fields"][2]["type"], "embedded_document");
        assert_eq!(summary[1]["fields"][0]["required"], true);
    }

    #[test]
    fn test_check_valid_document() {
        let (_tmp, loader) = setup();
        let doc = json!({"name": "Ada", "age": "36", "address": {"city": "Utrecht"}});
        assert_eq!(check(&loader, "User", &doc).unwrap(), json!({"valid": true}));
    }

    #[test]
    fn test_check_reports_nested_path() {
        let (_tmp, loader) = setup();
        let doc = json!({"name": "Ada", "address": {}});
        let err = check(&loader, "User", &doc).unwrap_err();
        assert_eq!(err.code(), CliErrorCode::InvalidDocument);
        assert!(err.message().contains("address.city"));
    }

    #[test]
    fn test_check_unknown_schema() {
        let (_tmp, loader) = setup();
        let err = check(&loader, "Order", &json!({})).unwrap_err();
        assert_eq!(err.code(), CliErrorCode::UnknownSchema);
    }

    #[test]
    fn test_convert_normalizes() {
        let (_tmp, loader) = setup();
        let doc = json!({"name": "Ada", "age": 36.7, "address": {"city": "Utrecht"}, "x": 1});
        let stored = convert(&loader, "User", &doc).unwrap();
        assert_eq!(
            stored,
            json!({"name": "Ada", "age": 36, "address": {"city": "Utrecht"}})
        );
    }

    #[test]
    fn test_convert_rejects_invalid() {
        let (_tmp, loader) = setup();
        let doc = json!({"name": "Ada Lovelace"});
        let err = convert(&loader, "User", &doc).unwrap_err();
        assert!(err.message().contains("String value is too long"));
    }

    fn schemas_cli(config: Option<PathBuf>, schema_dir: Option<PathBuf>) -> Cli {
        Cli {
            config,
            schema_dir,
            command: Command::Schemas,
        }
    }

    fn response_of(result: CliResult<Value>) -> (CliResult<()>, Value) {
        let mut out = Vec::new();
        let outcome = respond(result, &mut out);
        let parsed = serde_json::from_slice(&out).unwrap();
        (outcome, parsed)
    }

    #[test]
    fn test_missing_config_reported_as_json() {
        let tmp = TempDir::new().unwrap();
        let cli = schemas_cli(Some(tmp.path().join("missing.json")), None);

        let (outcome, response) = response_of(execute(cli));
        let err = outcome.unwrap_err();
        assert_eq!(err.code(), CliErrorCode::ConfigError);
        assert_eq!(response["status"], "error");
        assert_eq!(response["code"], "FIELDMAP_CLI_CONFIG_ERROR");
    }

    #[test]
    fn test_bad_declaration_reported_as_json() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("broken.json"), "{ nope").unwrap();
        let cli = schemas_cli(None, Some(tmp.path().to_path_buf()));

        let (outcome, response) = response_of(execute(cli));
        assert!(outcome.is_err());
        assert_eq!(response["status"], "error");
        assert!(response["message"].as_str().unwrap().contains("broken.json"));
    }

    #[test]
    fn test_schemas_command_response() {
        let (tmp, _loader) = setup();
        let cli = schemas_cli(None, Some(tmp.path().to_path_buf()));

        let (outcome, response) = response_of(execute(cli));
        outcome.unwrap();
        assert_eq!(response["status"], "ok");
        assert_eq!(response["data"][1]["name"], "User");
    }

    #[test]
    fn test_config_log_level_applied_before_loading() {
        let (tmp, _loader) = setup();
        let config_path = tmp.path().join("fieldmap.conf");
        fs::write(
            &config_path,
            json!({"schema_dir": tmp.path(), "log_level": "error"}).to_string(),
        )
        .unwrap();

        let loader = load_schemas(Some(&config_path), None).unwrap();
        assert_eq!(loader.config().log_level, Severity::Error);
        assert_eq!(loader.registry().len(), 2);
    }
}
