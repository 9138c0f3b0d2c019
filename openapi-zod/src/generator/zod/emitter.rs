//! Route emitter.
//!
//! Renders classified routes into a TypeScript module. Each route becomes one
//! exported constant holding an object schema per request bucket:
//!
//! ```ts
//! /** GET /users/{userId} */
//! export const getUserSchema = {
//!   params: z.object({userId:z.string()}),
//!   query: z.object({}),
//!   headers: z.object({}),
//!   body: z.object({}),
//! };
//! ```

use crate::generator::config::GeneratorConfig;
use crate::generator::zod::builder::generate_zod_object_schema;
use crate::ir::RouteSchema;

/// First line of every generated file.
pub const BANNER: &str = "// This file was generated by openapi-zod. Do not edit it by hand.";

/// Renders routes as TypeScript.
#[derive(Debug, Clone, Default)]
pub struct RouteEmitter {
    config: GeneratorConfig,
}

impl RouteEmitter {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Name of the exported constant for a route.
    pub fn constant_name(&self, route: &RouteSchema) -> String {
        format!("{}{}", route.name, self.config.schema_suffix)
    }

    /// Render one route, without a trailing line ending.
    pub fn emit_route(&self, route: &RouteSchema) -> String {
        let nl = self.config.line_ending_str();
        let indent = self.config.indent_str();
        let mut lines = Vec::with_capacity(7);

        if self.config.generate_docs {
            lines.push(doc_comment(route));
        }
        lines.push(format!("export const {} = {{", self.constant_name(route)));
        for (location, bucket) in route.params.buckets() {
            lines.push(format!(
                "{}{}: {},",
                indent,
                location.bucket_name(),
                generate_zod_object_schema(bucket)
            ));
        }
        lines.push("};".to_string());

        lines.join(nl)
    }

    /// Render a complete module: banner, import and every route.
    pub fn emit_file(&self, routes: &[RouteSchema]) -> String {
        let nl = self.config.line_ending_str();
        let mut output = String::new();

        output.push_str(BANNER);
        output.push_str(nl);
        output.push_str(&format!(
            "import {{ z }} from {};",
            serde_json::Value::String(self.config.zod_import.clone())
        ));
        output.push_str(nl);

        for route in routes {
            output.push_str(nl);
            output.push_str(&self.emit_route(route));
            output.push_str(nl);
        }

        tracing::debug!(routes = routes.len(), bytes = output.len(), "emitted module");
        output
    }
}

/// `/** GET /path */`, with the summary appended when present.
fn doc_comment(route: &RouteSchema) -> String {
    let text = match &route.summary {
        Some(summary) if !summary.trim().is_empty() => {
            let summary = summary.split_whitespace().collect::<Vec<_>>().join(" ");
            format!("{} - {}", route.label(), summary)
        }
        _ => route.label(),
    };
    format!("/** {} */", text.replace("*/", "*\\/"))
}
