//! Schema Loading Tests
//!
//! Declarations on disk build the same pipeline as schemas declared in code.

use std::fs;

use fieldmap::document::Document;
use fieldmap::schema::{LoaderConfig, LoaderError, SchemaLoader};
use serde_json::json;
use tempfile::TempDir;

fn write_schemas(dir: &std::path::Path) {
    fs::write(
        dir.join("a_user.json"),
        json!({
            "name": "User",
            "kind": "document",
            "fields": [
                {"name": "_id", "type": "object_id", "default": "generate"},
                {"name": "email", "type": "string", "required": true, "regex": "[^@\\s]+@"},
                {"name": "age", "type": "int", "min_value": 0, "max_value": 150, "default": 30},
                {"name": "home", "type": "embedded_document", "document": "Address"}
            ]
        })
        .to_string(),
    )
    .unwrap();
    fs::write(
        dir.join("b_address.json"),
        json!({
            "name": "Address",
            "kind": "embedded",
            "fields": [
                {"name": "city", "type": "string", "required": true, "max_length": 32}
            ]
        })
        .to_string(),
    )
    .unwrap();
}

#[test]
fn test_loaded_schemas_validate_documents() {
    let tmp = TempDir::new().unwrap();
    write_schemas(tmp.path());

    let mut loader = SchemaLoader::for_dir(tmp.path());
    let loaded = loader.load_all().unwrap();
    assert_eq!(loaded.len(), 2);

    let user = loader.get("User").unwrap();
    let doc = Document::from_storage(
        &user,
        &json!({"email": "ada@example.com", "home": {"city": "London"}}),
    )
    .unwrap();

    let stored = doc.prepare().unwrap();
    assert_eq!(stored["age"], 30);
    assert_eq!(stored["home"], json!({"city": "London"}));
    assert!(stored["_id"]["$oid"].is_string());

    let bad = Document::from_storage(&user, &json!({"email": "nobody"})).unwrap();
    let err = bad.validate().unwrap_err();
    assert_eq!(err.field(), Some("email"));
}

#[test]
fn test_config_file_drives_loader() {
    let tmp = TempDir::new().unwrap();
    let schema_dir = tmp.path().join("decls");
    fs::create_dir_all(&schema_dir).unwrap();
    fs::write(
        schema_dir.join("range.schema"),
        json!({
            "name": "Range",
            "kind": "document",
            "fields": [{"name": "n", "type": "int", "min_value": 9, "max_value": 1}]
        })
        .to_string(),
    )
    .unwrap();

    let config_path = tmp.path().join("fieldmap.json");
    fs::write(
        &config_path,
        json!({
            "schema_dir": schema_dir,
            "extension": "schema",
            "strict_int_bounds": true,
            "log_level": "error"
        })
        .to_string(),
    )
    .unwrap();

    let config = LoaderConfig::load(&config_path).unwrap();
    let mut loader = SchemaLoader::new(config);
    assert!(matches!(
        loader.load_all(),
        Err(LoaderError::InvertedBounds { .. })
    ));
}
