//! Schema node to Zod mappings.
//!
//! This module provides the [`ZodSchemaMapper`] struct which transforms a
//! [`SchemaNode`] tree into one Zod expression string.
//!
//! # Kind Mappings
//!
//! | Schema kind | Zod Schema |
//! |-------------|------------|
//! | `string` | `z.string()` |
//! | `number` | `z.number()` |
//! | `integer` | `z.number().int()` |
//! | `boolean` | `z.boolean()` |
//! | `null` | `z.null()` |
//! | `{}` | `z.unknown()` |
//! | `enum` | `z.enum([...])` / `z.literal(v)` / `z.union([z.literal(..),..])` |
//! | `array` | `z.array(T)` |
//! | `object` | `z.object({...})`, `z.record(z.string(),T)` |
//! | `oneOf` / `anyOf` | `z.union([A,B])` |
//! | `allOf` | `A.and(B)` |

use indexmap::IndexMap;

use crate::error::SchemaError;
use crate::generator::zod::builder::ZodExpr;
use crate::ir::{ObjectSchema, SchemaKind, SchemaNode, SchemaPath};

/// Maps schema nodes to Zod schema strings.
///
/// # Example
///
/// ```rust
/// use openapi_zod::generator::zod::ZodSchemaMapper;
/// use openapi_zod::ir::SchemaNode;
///
/// let mapper = ZodSchemaMapper::new();
/// let node = SchemaNode::array(SchemaNode::string());
/// assert_eq!(mapper.map_schema(&node).unwrap(), "z.array(z.string())");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ZodSchemaMapper;

impl ZodSchemaMapper {
    pub fn new() -> Self {
        Self
    }

    /// Map a schema tree to its Zod expression.
    ///
    /// Fails on the first malformed node, naming its path. Paths follow the
    /// tree, so every union branch sits under `anyOf` and every intersection
    /// branch under `allOf`. Trees read by
    /// [`parse_schema`](crate::input::parse_schema) are checked against the
    /// document's own keywords first.
    pub fn map_schema(&self, node: &SchemaNode) -> Result<String, SchemaError> {
        let expression = self.map_node(node, &SchemaPath::root())?.build();
        tracing::trace!(%expression, "mapped schema");
        Ok(expression)
    }

    /// Map one node, returning a builder so callers can still add modifiers.
    pub fn map_node(&self, node: &SchemaNode, path: &SchemaPath) -> Result<ZodExpr, SchemaError> {
        let mut expr = self.map_kind(&node.kind, path)?;

        for rule in &node.constraints {
            if !rule.applies_to(&node.kind) {
                return Err(SchemaError::MisplacedConstraint {
                    path: path.clone(),
                    keyword: rule.keyword(),
                    kind: node.kind.name(),
                });
            }
            expr = expr.rule(rule);
        }

        Ok(expr.nullable(node.nullable))
    }

    fn map_kind(&self, kind: &SchemaKind, path: &SchemaPath) -> Result<ZodExpr, SchemaError> {
        let expr = match kind {
            // Primitives
            SchemaKind::String => ZodExpr::string(),
            SchemaKind::Number => ZodExpr::number(),
            SchemaKind::Integer => ZodExpr::integer(),
            SchemaKind::Boolean => ZodExpr::boolean(),
            SchemaKind::Null => ZodExpr::null(),
            SchemaKind::Any => ZodExpr::unknown(),

            // Compound types
            SchemaKind::Object(object) => self.map_object(object, path)?,
            SchemaKind::Array(items) => {
                let element = self.map_node(items, &path.join("items"))?.build();
                ZodExpr::array(&element)
            }
            SchemaKind::Enum(values) => {
                if values.is_empty() {
                    return Err(SchemaError::EmptyEnum { path: path.clone() });
                }
                ZodExpr::enumeration(values)
            }

            // Composite types
            SchemaKind::Union(branches) => {
                ZodExpr::union(self.map_branches(branches, "anyOf", kind, path)?)
            }
            SchemaKind::Intersection(branches) => {
                ZodExpr::intersection(self.map_branches(branches, "allOf", kind, path)?)
            }
        };
        Ok(expr)
    }

    /// Map an object schema.
    ///
    /// Properties outside the required set get `.optional()`.
    fn map_object(&self, object: &ObjectSchema, path: &SchemaPath) -> Result<ZodExpr, SchemaError> {
        let additional = match &object.additional_properties {
            Some(schema) => Some(
                self.map_node(schema, &path.join("additionalProperties"))?
                    .build(),
            ),
            None => None,
        };

        if object.properties.is_empty() {
            if let Some(value) = additional {
                return Ok(ZodExpr::record(&value));
            }
        }

        let properties_path = path.join("properties");
        let mut entries = IndexMap::with_capacity(object.properties.len());
        for (name, schema) in &object.properties {
            let expression = self
                .map_node(schema, &properties_path.join(name.as_str()))?
                .optional(!object.is_required(name))
                .build();
            entries.insert(name.clone(), expression);
        }

        let mut expr = ZodExpr::object(&entries);
        if let Some(value) = additional {
            expr = expr.method(format!(".catchall({})", value));
        } else if object.strict {
            expr = expr.method(".strict()");
        }
        Ok(expr)
    }

    fn map_branches(
        &self,
        branches: &[SchemaNode],
        keyword: &str,
        kind: &SchemaKind,
        path: &SchemaPath,
    ) -> Result<Vec<String>, SchemaError> {
        if branches.is_empty() {
            return Err(SchemaError::EmptyComposite {
                path: path.clone(),
                kind: kind.name(),
            });
        }

        branches
            .iter()
            .enumerate()
            .map(|(index, branch)| {
                self.map_node(branch, &path.join_index(keyword, index))
                    .map(ZodExpr::build)
            })
            .collect()
    }
}

/// Generate the Zod expression for a schema tree.
pub fn generate_zod_schema(node: &SchemaNode) -> Result<String, SchemaError> {
    ZodSchemaMapper::new().map_schema(node)
}
