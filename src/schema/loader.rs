//! Schema loader for reading schema declarations from disk
//!
//! - One declaration file per schema in the configured directory
//! - Files are read in name order; embedded references resolve regardless
//!   of that order
//! - Any unreadable, malformed or unresolvable declaration aborts loading

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::config::LoaderConfig;
use super::errors::{LoaderError, LoaderResult};
use super::registry::SchemaRegistry;
use super::types::SchemaDecl;
use crate::document::Schema;
use crate::observability::{log_event, log_event_with_fields, Event};

/// Reads schema files and keeps the resulting registry
pub struct SchemaLoader {
    config: LoaderConfig,
    registry: SchemaRegistry,
}

impl SchemaLoader {
    pub fn new(config: LoaderConfig) -> Self {
        Self {
            config,
            registry: SchemaRegistry::new(),
        }
    }

    /// Loader reading `<dir>/*.json` with default settings
    pub fn for_dir(dir: &Path) -> Self {
        Self::new(LoaderConfig::with_schema_dir(dir))
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    pub fn schema_dir(&self) -> &Path {
        &self.config.schema_dir
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// Gets a loaded schema by name
    pub fn get(&self, name: &str) -> Option<Arc<Schema>> {
        self.registry.get(name)
    }

    /// Loads every declaration file in the schema directory.
    ///
    /// A missing directory is created and yields no schemas.
    pub fn load_all(&mut self) -> LoaderResult<Vec<Arc<Schema>>> {
        let dir = self.config.schema_dir.clone();
        let dir_name = dir.display().to_string();
        log_event_with_fields(Event::SchemaLoadStart, &[("schema_dir", dir_name.as_str())]);

        if !dir.exists() {
            fs::create_dir_all(&dir).map_err(|e| LoaderError::io(dir_name.as_str(), e))?;
            log_event(Event::SchemaLoadComplete);
            return Ok(Vec::new());
        }

        let mut paths = Vec::new();
        let entries = fs::read_dir(&dir).map_err(|e| LoaderError::io(dir_name.as_str(), e))?;
        for entry in entries {
            let entry = entry.map_err(|e| LoaderError::io(dir_name.as_str(), e))?;
            let path = entry.path();
            if path.extension().map_or(false, |ext| ext == self.config.extension.as_str()) {
                paths.push(path);
            }
        }
        paths.sort();

        let mut decls = Vec::with_capacity(paths.len());
        for path in &paths {
            let decl = self.read_declaration(path).map_err(|e| {
                let path = path.display().to_string();
                let error = e.to_string();
                log_event_with_fields(
                    Event::SchemaLoadFailed,
                    &[("path", path.as_str()), ("error", error.as_str())],
                );
                e
            })?;
            decls.push(decl);
        }

        let loaded = self.register_declarations(decls).map_err(|e| {
            let error = e.to_string();
            log_event_with_fields(
                Event::SchemaLoadFailed,
                &[("schema_dir", dir_name.as_str()), ("error", error.as_str())],
            );
            e
        })?;
        let count = loaded.len().to_string();
        log_event_with_fields(Event::SchemaLoadComplete, &[("count", count.as_str())]);
        Ok(loaded)
    }

    /// Parses one declaration file.
    fn read_declaration(&self, path: &Path) -> LoaderResult<SchemaDecl> {
        let content = fs::read_to_string(path)
            .map_err(|e| LoaderError::io(path.display().to_string(), e))?;

        let decl: SchemaDecl = serde_json::from_str(&content)
            .map_err(|e| LoaderError::malformed(path.display().to_string(), e))?;

        let path = path.display().to_string();
        log_event_with_fields(
            Event::SchemaLoaded,
            &[("path", path.as_str()), ("schema", decl.name.as_str())],
        );
        Ok(decl)
    }

    /// Checks bounds, then builds and registers declarations.
    pub fn register_declarations(
        &mut self,
        decls: Vec<SchemaDecl>,
    ) -> LoaderResult<Vec<Arc<Schema>>> {
        for decl in &decls {
            for field in decl.fields.iter().filter(|f| f.has_inverted_bounds()) {
                if self.config.strict_int_bounds {
                    return Err(LoaderError::InvertedBounds {
                        schema: decl.name.clone(),
                        field: field.name().to_string(),
                    });
                }
                log_event_with_fields(
                    Event::IntBoundsInverted,
                    &[("schema", decl.name.as_str()), ("field", field.name())],
                );
            }
        }

        self.registry.register_declarations(decls)
    }

    /// Writes a declaration file. Existing files are never overwritten.
    pub fn save_declaration(&self, decl: &SchemaDecl) -> LoaderResult<PathBuf> {
        let dir = &self.config.schema_dir;
        let path = dir.join(format!("{}.{}", decl.name, self.config.extension));

        if path.exists() {
            return Err(LoaderError::DuplicateSchema(decl.name.clone()));
        }

        if !dir.exists() {
            fs::create_dir_all(dir).map_err(|e| LoaderError::io(dir.display().to_string(), e))?;
        }

        let content = serde_json::to_string_pretty(decl)
            .map_err(|e| LoaderError::malformed(path.display().to_string(), e))?;
        fs::write(&path, content).map_err(|e| LoaderError::io(path.display().to_string(), e))?;

        Ok(path)
    }
}
