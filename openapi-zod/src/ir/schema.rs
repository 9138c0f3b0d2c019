//! Schema node IR definitions.
//!
//! A [`SchemaNode`] is one validation constraint from an OpenAPI document,
//! already resolved (no `$ref`), as a tagged tree. Each node maps to exactly
//! one Zod expression.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use super::validation::ValidationRule;

/// One node of a schema tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaNode {
    /// The kind of schema
    pub kind: SchemaKind,

    /// Kind-specific constraints, emitted in order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constraints: Vec<ValidationRule>,

    /// Whether `null` is accepted in addition to the kind
    #[serde(default)]
    pub nullable: bool,
}

impl SchemaNode {
    /// Create a new node with the given kind and no modifiers.
    pub fn new(kind: SchemaKind) -> Self {
        Self {
            kind,
            constraints: Vec::new(),
            nullable: false,
        }
    }

    pub fn string() -> Self {
        Self::new(SchemaKind::String)
    }

    pub fn number() -> Self {
        Self::new(SchemaKind::Number)
    }

    pub fn integer() -> Self {
        Self::new(SchemaKind::Integer)
    }

    pub fn boolean() -> Self {
        Self::new(SchemaKind::Boolean)
    }

    pub fn null() -> Self {
        Self::new(SchemaKind::Null)
    }

    pub fn any() -> Self {
        Self::new(SchemaKind::Any)
    }

    /// Array whose elements satisfy `items`.
    pub fn array(items: SchemaNode) -> Self {
        Self::new(SchemaKind::Array(Box::new(items)))
    }

    pub fn object(object: ObjectSchema) -> Self {
        Self::new(SchemaKind::Object(object))
    }

    /// Closed set of literal values, in declaration order.
    pub fn enumeration(values: Vec<Literal>) -> Self {
        Self::new(SchemaKind::Enum(values))
    }

    pub fn union(branches: Vec<SchemaNode>) -> Self {
        Self::new(SchemaKind::Union(branches))
    }

    pub fn intersection(branches: Vec<SchemaNode>) -> Self {
        Self::new(SchemaKind::Intersection(branches))
    }

    /// Append a validation rule.
    pub fn with_rule(mut self, rule: ValidationRule) -> Self {
        self.constraints.push(rule);
        self
    }

    /// Mark this node as nullable.
    #[allow(clippy::wrong_self_convention)]
    pub fn as_nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Whether every accepted value is a number: a `number` or `integer`
    /// kind, or an intersection with such a branch.
    pub fn is_numeric(&self) -> bool {
        match &self.kind {
            SchemaKind::Intersection(branches) => branches.iter().any(SchemaNode::is_numeric),
            kind => kind.is_numeric(),
        }
    }
}

/// Schema kind enumeration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum SchemaKind {
    // ==========================================================================
    // Primitives
    // ==========================================================================
    String,
    Number,
    Integer,
    Boolean,
    Null,

    /// Schema without constraints (`{}`), accepts any value
    Any,

    // ==========================================================================
    // Compound Types
    // ==========================================================================
    Object(ObjectSchema),

    /// Array with one element schema
    Array(Box<SchemaNode>),

    /// Closed list of literal values
    Enum(Vec<Literal>),

    // ==========================================================================
    // Composite Types
    // ==========================================================================
    /// Any of the branches (`oneOf` / `anyOf`)
    Union(Vec<SchemaNode>),

    /// All of the branches (`allOf`)
    Intersection(Vec<SchemaNode>),
}

impl SchemaKind {
    /// Name of the kind as used in OpenAPI documents and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            SchemaKind::String => "string",
            SchemaKind::Number => "number",
            SchemaKind::Integer => "integer",
            SchemaKind::Boolean => "boolean",
            SchemaKind::Null => "null",
            SchemaKind::Any => "any",
            SchemaKind::Object(_) => "object",
            SchemaKind::Array(_) => "array",
            SchemaKind::Enum(_) => "enum",
            SchemaKind::Union(_) => "union",
            SchemaKind::Intersection(_) => "intersection",
        }
    }

    /// Check if this is `number` or `integer`.
    pub fn is_numeric(&self) -> bool {
        matches!(self, SchemaKind::Number | SchemaKind::Integer)
    }
}

/// Object schema definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectSchema {
    /// Properties in declaration order
    #[serde(default)]
    pub properties: IndexMap<String, SchemaNode>,

    /// Names of required properties
    #[serde(default, skip_serializing_if = "IndexSet::is_empty")]
    pub required: IndexSet<String>,

    /// Schema for properties not listed in `properties`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<Box<SchemaNode>>,

    /// Strict mode - reject extra properties (Zod: .strict())
    #[serde(default)]
    pub strict: bool,
}

impl ObjectSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a property, marking it required or not.
    pub fn with_property(
        mut self,
        name: impl Into<String>,
        schema: SchemaNode,
        required: bool,
    ) -> Self {
        let name = name.into();
        if required {
            self.required.insert(name.clone());
        }
        self.properties.insert(name, schema);
        self
    }

    /// Set the schema for additional properties.
    pub fn with_additional_properties(mut self, schema: SchemaNode) -> Self {
        self.additional_properties = Some(Box::new(schema));
        self
    }

    /// Set strict mode.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Check if a property is required.
    pub fn is_required(&self, name: &str) -> bool {
        self.required.contains(name)
    }
}

/// Literal value inside an enum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    Boolean(bool),
    Number(serde_json::Number),
    String(String),
}

impl Literal {
    /// Check if this is a string literal.
    pub fn is_string(&self) -> bool {
        matches!(self, Literal::String(_))
    }

    /// Render the literal as JavaScript source text.
    pub fn to_js(&self) -> String {
        match self {
            Literal::Boolean(b) => b.to_string(),
            Literal::Number(n) => n.to_string(),
            Literal::String(s) => quote_js_string(s),
        }
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::String(value.to_string())
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Literal::Number(value.into())
    }
}

impl From<i32> for Literal {
    fn from(value: i32) -> Self {
        Literal::Number(value.into())
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Literal::Boolean(value)
    }
}

/// Quote a string as a JavaScript double-quoted string literal.
pub(crate) fn quote_js_string(s: &str) -> String {
    // A JSON string literal is a valid JavaScript string literal.
    serde_json::Value::String(s.to_string()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_node_creation() {
        let node = SchemaNode::string();
        assert_eq!(node.kind, SchemaKind::String);
        assert!(node.constraints.is_empty());
        assert!(!node.nullable);
    }

    #[test]
    fn test_schema_node_nullable() {
        let node = SchemaNode::integer().as_nullable();
        assert!(node.nullable);
        assert!(node.is_numeric());
    }

    #[test]
    fn test_numeric_nodes() {
        assert!(SchemaKind::Number.is_numeric());
        assert!(!SchemaKind::Boolean.is_numeric());

        let refined = SchemaNode::intersection(vec![
            SchemaNode::integer(),
            SchemaNode::integer().with_rule(ValidationRule::Max(5.0)),
        ]);
        assert!(refined.is_numeric());
        assert!(!SchemaNode::union(vec![SchemaNode::integer(), SchemaNode::string()]).is_numeric());
        assert!(!SchemaNode::enumeration(vec![Literal::from(1)]).is_numeric());
    }

    #[test]
    fn test_object_schema_required() {
        let object = ObjectSchema::new()
            .with_property("name", SchemaNode::string(), true)
            .with_property("age", SchemaNode::integer(), false);

        assert!(object.is_required("name"));
        assert!(!object.is_required("age"));
        let names: Vec<_> = object.properties.keys().cloned().collect();
        assert_eq!(names, vec!["name", "age"]);
    }

    #[test]
    fn test_literal_to_js() {
        assert_eq!(Literal::from("a\"b").to_js(), "\"a\\\"b\"");
        assert_eq!(Literal::from(42).to_js(), "42");
        assert_eq!(Literal::from(true).to_js(), "true");
    }

    #[test]
    fn test_schema_node_serde_roundtrip() {
        let node = SchemaNode::array(SchemaNode::string().with_rule(ValidationRule::Email));
        let json = serde_json::to_string(&node).unwrap();
        let back: SchemaNode = serde_json::from_str(&json).unwrap();
        assert_eq!(node, back);
    }
}
