//! Parameter classification.
//!
//! Groups the Zod expressions of an operation's parameters into the four
//! request buckets (`params`, `query`, `headers`, `body`).

use tracing::{debug, instrument};

use crate::error::ParamsError;
use crate::generator::zod::builder::ZodExpr;
use crate::generator::zod::type_mapper::ZodSchemaMapper;
use crate::ir::{ParameterDescriptor, ParamsObject, SchemaPath};

/// Raw source type of query string values.
const QUERY_SOURCE: &str = "z.string()";

/// Builds a [`ParamsObject`] from parameter descriptors.
#[derive(Debug, Clone, Default)]
pub struct ParamsClassifier {
    mapper: ZodSchemaMapper,
}

impl ParamsClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify `descriptors` in order.
    ///
    /// A repeated `(name, location)` pair replaces the earlier expression and
    /// keeps its position. The first schema failure aborts the whole call.
    #[instrument(level = "debug", skip_all, fields(count = descriptors.len()))]
    pub fn classify(&self, descriptors: &[ParameterDescriptor]) -> Result<ParamsObject, ParamsError> {
        let mut params = ParamsObject::new();

        for descriptor in descriptors {
            let expression = self.expression(descriptor)?;
            if let Some(previous) =
                params.insert(descriptor.location, descriptor.name.as_str(), expression)
            {
                debug!(
                    name = %descriptor.name,
                    location = %descriptor.location,
                    %previous,
                    "duplicate parameter replaced"
                );
            }
        }

        Ok(params)
    }

    /// Expression for one descriptor, with coercion and optionality applied.
    pub fn expression(&self, descriptor: &ParameterDescriptor) -> Result<String, ParamsError> {
        let schema = self
            .mapper
            .map_node(&descriptor.schema, &SchemaPath::root())
            .map_err(|source| ParamsError::Schema {
                name: descriptor.name.clone(),
                location: descriptor.location,
                source,
            })?;

        let expr = if descriptor.needs_coercion() {
            ZodExpr::coercion(QUERY_SOURCE, &schema.build())
        } else {
            schema
        };

        Ok(expr.optional(!descriptor.required).build())
    }
}

/// Classify parameter descriptors into the four request buckets.
pub fn generate_params_object(
    descriptors: &[ParameterDescriptor],
) -> Result<ParamsObject, ParamsError> {
    ParamsClassifier::new().classify(descriptors)
}
