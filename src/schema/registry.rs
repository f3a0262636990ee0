//! In-memory registry of built schemas, keyed by name

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use super::errors::{LoaderError, LoaderResult};
use super::types::SchemaDecl;
use crate::document::Schema;
use crate::observability::{log_event_with_fields, Event};

/// Named schemas. Embedded references resolve against this registry.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<String, Arc<Schema>>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a built schema. Names are unique; a registered schema is never
    /// replaced.
    pub fn register(&mut self, schema: Arc<Schema>) -> LoaderResult<()> {
        if self.schemas.contains_key(schema.name()) {
            return Err(LoaderError::DuplicateSchema(schema.name().to_string()));
        }

        log_event_with_fields(
            Event::SchemaRegistered,
            &[("schema", schema.name()), ("kind", schema.kind().as_str())],
        );
        self.schemas.insert(schema.name().to_string(), schema);
        Ok(())
    }

    /// Build and register a batch of declarations.
    ///
    /// Declarations may reference each other in any order. A batch that
    /// stops making progress has an unknown reference or a cycle. The batch
    /// is built against a staging copy and merged only when every
    /// declaration builds, so a failed batch leaves the registry unchanged.
    pub fn register_declarations(
        &mut self,
        decls: Vec<SchemaDecl>,
    ) -> LoaderResult<Vec<Arc<Schema>>> {
        let mut names = HashSet::new();
        for decl in &decls {
            if self.contains(&decl.name) || !names.insert(decl.name.as_str()) {
                return Err(LoaderError::DuplicateSchema(decl.name.clone()));
            }
        }

        let mut staged = SchemaRegistry {
            schemas: self.schemas.clone(),
        };
        let mut built = Vec::with_capacity(decls.len());
        let mut pending = decls;

        while !pending.is_empty() {
            let (ready, blocked): (Vec<_>, Vec<_>) = pending
                .into_iter()
                .partition(|d| d.references().all(|r| staged.contains(r)));

            if ready.is_empty() {
                let stuck = &blocked[0];
                let reference = stuck
                    .references()
                    .find(|r| !staged.contains(r))
                    .unwrap_or_default()
                    .to_string();
                return Err(LoaderError::UnresolvedReference {
                    schema: stuck.name.clone(),
                    reference,
                });
            }

            for decl in ready {
                let schema = decl.build(&staged)?;
                staged
                    .schemas
                    .insert(schema.name().to_string(), Arc::clone(&schema));
                built.push(schema);
            }
            pending = blocked;
        }

        for schema in &built {
            self.register(Arc::clone(schema))?;
        }
        Ok(built)
    }

    /// Gets a schema by name
    pub fn get(&self, name: &str) -> Option<Arc<Schema>> {
        self.schemas.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.schemas.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}
