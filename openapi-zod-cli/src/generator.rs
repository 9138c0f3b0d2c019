//! Schema generator for producing the TypeScript module.
//!
//! This module uses the `RouteEmitter` from `openapi-zod` to turn every
//! operation of a loaded document into an exported request schema.

use crate::config::Config;
use crate::error::CliResult;
use openapi_zod::input::parse_operations;
use openapi_zod::RouteEmitter;
use serde_json::Value;

/// Generated output containing all route schemas.
#[derive(Debug, Clone)]
pub struct GeneratedOutput {
    /// Complete TypeScript content.
    pub content: String,

    /// Individual generated routes.
    pub routes: Vec<GeneratedRoute>,
}

/// A single generated route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedRoute {
    /// Exported constant name (e.g., "getUserSchema").
    pub schema_name: String,

    /// Method and path (e.g., "GET /users/{userId}").
    pub label: String,
}

/// Schema generator backed by the openapi-zod route emitter.
pub struct SchemaGenerator {
    emitter: RouteEmitter,
}

impl SchemaGenerator {
    /// Create a new schema generator with the given configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            emitter: RouteEmitter::new(config.generator_config()),
        }
    }

    /// Generate the module for an OpenAPI document.
    ///
    /// Any failing operation aborts generation; nothing is produced.
    pub fn generate(&self, document: &Value) -> CliResult<GeneratedOutput> {
        let routes = parse_operations(document)?;
        let content = self.emitter.emit_file(&routes);

        let routes = routes
            .iter()
            .map(|route| GeneratedRoute {
                schema_name: self.emitter.constant_name(route),
                label: route.label(),
            })
            .collect();

        Ok(GeneratedOutput { content, routes })
    }
}
