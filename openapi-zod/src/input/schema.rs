//! OpenAPI schema object to IR parser.
//!
//! Reads one (already dereferenced) schema object into a [`SchemaNode`].
//! Both OpenAPI 3.0 (`nullable`, boolean `exclusiveMinimum`) and 3.1
//! (`type` arrays, numeric `exclusiveMinimum`) forms are accepted.
//!
//! Every keyword group present on a schema constrains the same value, so
//! none of them is dropped. The node's own part comes from, in order:
//!
//! 1. `enum` / `const` (intersected with the `type` part when constraint
//!    keywords narrow it further)
//! 2. `type`
//! 3. `properties` / `additionalProperties` (object) or `items` (array)
//!
//! `oneOf`, `anyOf` and `allOf` each add one more part. Two or more parts
//! become a single intersection; none at all means any value.
//!
//! A constraint keyword that cannot apply to an explicit `type` is an error
//! at the node's path. Without an explicit `type` constraints are
//! annotations: the ones applying to the inferred kind are kept, the rest are
//! dropped. Literals outside the declared `type`, or a `const` outside the
//! `enum`, fail with [`SchemaError::ConflictingKeywords`].

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::SchemaError;
use crate::ir::{Literal, ObjectSchema, SchemaKind, SchemaNode, SchemaPath, ValidationRule};

type Object = Map<String, Value>;

/// Parse a schema object.
///
/// # Example
///
/// ```rust
/// use openapi_zod::input::parse_schema;
/// use openapi_zod::ir::SchemaKind;
/// use serde_json::json;
///
/// let node = parse_schema(&json!({ "type": ["integer", "null"] })).unwrap();
/// assert_eq!(node.kind, SchemaKind::Integer);
/// assert!(node.nullable);
/// ```
pub fn parse_schema(value: &Value) -> Result<SchemaNode, SchemaError> {
    parse_node(value, &SchemaPath::root())
}

fn parse_node(value: &Value, path: &SchemaPath) -> Result<SchemaNode, SchemaError> {
    let obj = value
        .as_object()
        .ok_or_else(|| SchemaError::NotAnObject { path: path.clone() })?;

    if let Some(reference) = obj.get("$ref") {
        return Err(SchemaError::UnresolvedRef {
            path: path.clone(),
            reference: reference
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| reference.to_string()),
        });
    }

    let (types, mut nullable) = read_types(obj, path)?;
    nullable |= read_nullable(obj, path)?;
    let rules = read_rules(obj, path)?;

    let mut parts = Vec::new();
    if let Some((keyword, literals, has_null)) = read_literals(obj, path)? {
        nullable |= has_null;
        check_literal_types(&literals, &types, keyword, path)?;
        let node = if literals.is_empty() {
            SchemaNode::null()
        } else {
            SchemaNode::enumeration(literals)
        };
        if types.is_empty() || rules.is_empty() {
            drop_rules(&rules, &node.kind, path);
            parts.push(node);
        } else {
            // Constraints on the declared type still narrow the literals.
            parts.push(node);
            parts.push(typed_part(&types, rules, obj, path)?);
        }
    } else if !types.is_empty() {
        parts.push(typed_part(&types, rules, obj, path)?);
    } else if let Some(node) = inferred_part(obj, &rules, path)? {
        parts.push(node);
    } else {
        drop_rules(&rules, &SchemaKind::Any, path);
    }

    for keyword in ["oneOf", "anyOf"] {
        if let Some(branches) = obj.get(keyword) {
            parts.push(SchemaNode::union(read_branches(
                keyword, branches, "union", path,
            )?));
        }
    }
    if let Some(branches) = obj.get("allOf") {
        parts.push(SchemaNode::intersection(read_branches(
            "allOf",
            branches,
            "intersection",
            path,
        )?));
    }

    let mut node = intersect(parts);
    node.nullable |= nullable;
    Ok(node)
}

/// Combine the parts read from sibling keywords. A value must satisfy all
/// of them, so two or more parts become one flat intersection.
fn intersect(parts: Vec<SchemaNode>) -> SchemaNode {
    if parts.len() < 2 {
        return parts.into_iter().next().unwrap_or_else(SchemaNode::any);
    }

    let mut branches = Vec::with_capacity(parts.len());
    for part in parts {
        match part.kind {
            SchemaKind::Intersection(inner) => branches.extend(inner),
            _ => branches.push(part),
        }
    }
    SchemaNode::intersection(branches)
}

// =============================================================================
// Kinds
// =============================================================================

/// Node for the explicit `type`, carrying every constraint keyword.
///
/// A constraint that applies to none of the listed types is rejected here,
/// at the path where the author wrote it.
fn typed_part(
    types: &[String],
    rules: Vec<ValidationRule>,
    obj: &Object,
    path: &SchemaPath,
) -> Result<SchemaNode, SchemaError> {
    if let [type_name] = types {
        let mut node = typed_node(type_name, obj, path)?;
        if let Some(rule) = rules.iter().find(|rule| !rule.applies_to(&node.kind)) {
            return Err(SchemaError::MisplacedConstraint {
                path: path.clone(),
                keyword: rule.keyword(),
                kind: node.kind.name(),
            });
        }
        node.constraints = rules;
        return Ok(node);
    }

    let branches = types
        .iter()
        .enumerate()
        .map(|(index, type_name)| {
            let mut branch = typed_node(type_name, obj, &path.join_index("type", index))?;
            branch.constraints = applicable(&rules, &branch.kind);
            Ok(branch)
        })
        .collect::<Result<Vec<_>, SchemaError>>()?;

    let unused = rules
        .iter()
        .find(|rule| !branches.iter().any(|branch| rule.applies_to(&branch.kind)));
    if let Some(rule) = unused {
        return Err(SchemaError::MisplacedConstraint {
            path: path.clone(),
            keyword: rule.keyword(),
            kind: "union",
        });
    }
    Ok(SchemaNode::union(branches))
}

/// Node for one `type` value.
fn typed_node(type_name: &str, obj: &Object, path: &SchemaPath) -> Result<SchemaNode, SchemaError> {
    let node = match type_name {
        "string" => SchemaNode::string(),
        "number" => SchemaNode::number(),
        "integer" => SchemaNode::integer(),
        "boolean" => SchemaNode::boolean(),
        "null" => SchemaNode::null(),
        "array" => match obj.get("items") {
            Some(items) => SchemaNode::array(parse_node(items, &path.join("items"))?),
            None => {
                return Err(SchemaError::MissingKeyword {
                    path: path.clone(),
                    keyword: "items",
                    kind: "array",
                })
            }
        },
        "object" => SchemaNode::object(read_object(obj, path)?),
        other => {
            return Err(SchemaError::UnknownType {
                path: path.clone(),
                type_name: other.to_string(),
            })
        }
    };
    Ok(node)
}

/// Object or array implied by its keywords when `type` is absent.
fn inferred_part(
    obj: &Object,
    rules: &[ValidationRule],
    path: &SchemaPath,
) -> Result<Option<SchemaNode>, SchemaError> {
    let mut node = if obj.contains_key("properties") || obj.contains_key("additionalProperties") {
        SchemaNode::object(read_object(obj, path)?)
    } else if let Some(items) = obj.get("items") {
        SchemaNode::array(parse_node(items, &path.join("items"))?)
    } else {
        return Ok(None);
    };
    node.constraints = applicable(rules, &node.kind);
    drop_rules(rules, &node.kind, path);
    Ok(Some(node))
}

fn read_object(obj: &Object, path: &SchemaPath) -> Result<ObjectSchema, SchemaError> {
    let mut object = ObjectSchema::new();

    let required: Vec<&str> = match obj.get("required") {
        None => Vec::new(),
        Some(Value::Array(names)) => names
            .iter()
            .map(|name| {
                name.as_str().ok_or_else(|| {
                    SchemaError::invalid_keyword(path.clone(), "required", "expected property names")
                })
            })
            .collect::<Result<_, _>>()?,
        Some(_) => {
            return Err(SchemaError::invalid_keyword(
                path.clone(),
                "required",
                "expected an array",
            ))
        }
    };

    match obj.get("properties") {
        None => {}
        Some(Value::Object(properties)) => {
            let properties_path = path.join("properties");
            for (name, schema) in properties {
                let node = parse_node(schema, &properties_path.join(name.as_str()))?;
                object = object.with_property(name.as_str(), node, required.contains(&name.as_str()));
            }
        }
        Some(_) => {
            return Err(SchemaError::invalid_keyword(
                path.clone(),
                "properties",
                "expected an object",
            ))
        }
    }

    match obj.get("additionalProperties") {
        None => {}
        Some(Value::Bool(true)) => {
            object = object.with_additional_properties(SchemaNode::any());
        }
        Some(Value::Bool(false)) => {
            object = object.with_strict(true);
        }
        Some(schema) => {
            let node = parse_node(schema, &path.join("additionalProperties"))?;
            object = object.with_additional_properties(node);
        }
    }

    Ok(object)
}

fn read_branches(
    keyword: &str,
    value: &Value,
    kind: &'static str,
    path: &SchemaPath,
) -> Result<Vec<SchemaNode>, SchemaError> {
    let branches = value
        .as_array()
        .ok_or_else(|| SchemaError::invalid_keyword(path.clone(), keyword, "expected an array"))?;
    if branches.is_empty() {
        return Err(SchemaError::EmptyComposite {
            path: path.clone(),
            kind,
        });
    }
    branches
        .iter()
        .enumerate()
        .map(|(index, branch)| parse_node(branch, &path.join_index(keyword, index)))
        .collect()
}

/// Literals from `enum` and `const`: the keyword they came from, the
/// non-null values, and whether `null` is allowed.
///
/// With both keywords present the `const` value must be one of the `enum`
/// values, and it alone is kept.
fn read_literals(
    obj: &Object,
    path: &SchemaPath,
) -> Result<Option<(&'static str, Vec<Literal>, bool)>, SchemaError> {
    let listed = obj
        .get("enum")
        .map(|values| read_enum(values, path))
        .transpose()?;
    let constant = obj
        .get("const")
        .map(|value| read_literal(value, "const", path))
        .transpose()?;

    let constant = match (listed, constant) {
        (None, None) => return Ok(None),
        (Some((literals, has_null)), None) => return Ok(Some(("enum", literals, has_null))),
        (None, Some(constant)) => constant,
        (Some((literals, has_null)), Some(constant)) => {
            let member = match &constant {
                Some(literal) => literals.contains(literal),
                None => has_null,
            };
            if !member {
                return Err(SchemaError::ConflictingKeywords {
                    path: path.clone(),
                    first: "enum",
                    second: "const",
                });
            }
            constant
        }
    };

    let has_null = constant.is_none();
    Ok(Some(("const", constant.into_iter().collect(), has_null)))
}

/// Enum literals, plus whether `null` was listed.
fn read_enum(value: &Value, path: &SchemaPath) -> Result<(Vec<Literal>, bool), SchemaError> {
    let values = value
        .as_array()
        .ok_or_else(|| SchemaError::invalid_keyword(path.clone(), "enum", "expected an array"))?;
    if values.is_empty() {
        return Err(SchemaError::EmptyEnum { path: path.clone() });
    }

    let mut literals = Vec::with_capacity(values.len());
    let mut has_null = false;
    for value in values {
        match read_literal(value, "enum", path)? {
            Some(literal) => literals.push(literal),
            None => has_null = true,
        }
    }
    Ok((literals, has_null))
}

/// One literal value; `None` for `null`.
fn read_literal(
    value: &Value,
    keyword: &str,
    path: &SchemaPath,
) -> Result<Option<Literal>, SchemaError> {
    match value {
        Value::Null => Ok(None),
        Value::Bool(b) => Ok(Some(Literal::Boolean(*b))),
        Value::Number(n) => Ok(Some(Literal::Number(n.clone()))),
        Value::String(s) => Ok(Some(Literal::String(s.clone()))),
        Value::Array(_) | Value::Object(_) => Err(SchemaError::invalid_keyword(
            path.clone(),
            keyword,
            "values must be strings, numbers, booleans or null",
        )),
    }
}

/// Every literal must be a value of one of the declared types.
fn check_literal_types(
    literals: &[Literal],
    types: &[String],
    keyword: &'static str,
    path: &SchemaPath,
) -> Result<(), SchemaError> {
    let fits = |literal: &Literal| {
        types.iter().any(|type_name| match (literal, type_name.as_str()) {
            (Literal::String(_), "string")
            | (Literal::Boolean(_), "boolean")
            | (Literal::Number(_), "number") => true,
            (Literal::Number(n), "integer") => {
                n.is_i64() || n.is_u64() || n.as_f64().map_or(false, |f| f.fract() == 0.0)
            }
            _ => false,
        })
    };

    if types.is_empty() || literals.iter().all(fits) {
        return Ok(());
    }
    Err(SchemaError::ConflictingKeywords {
        path: path.clone(),
        first: keyword,
        second: "type",
    })
}

/// Non-null `type` names, plus whether `null` was listed.
fn read_types(obj: &Object, path: &SchemaPath) -> Result<(Vec<String>, bool), SchemaError> {
    let invalid = || {
        SchemaError::invalid_keyword(
            path.clone(),
            "type",
            "expected a string or an array of strings",
        )
    };

    let names: Vec<&str> = match obj.get("type") {
        None => return Ok((Vec::new(), false)),
        Some(Value::String(name)) => vec![name.as_str()],
        Some(Value::Array(names)) if !names.is_empty() => names
            .iter()
            .map(|name| name.as_str().ok_or_else(invalid))
            .collect::<Result<_, _>>()?,
        Some(_) => return Err(invalid()),
    };

    let mut types: Vec<String> = Vec::with_capacity(names.len());
    let mut nullable = false;
    for name in &names {
        if *name == "null" && names.len() > 1 {
            nullable = true;
        } else if !types.iter().any(|seen| seen == name) {
            types.push(name.to_string());
        }
    }
    Ok((types, nullable))
}

fn read_nullable(obj: &Object, path: &SchemaPath) -> Result<bool, SchemaError> {
    match obj.get("nullable") {
        None => Ok(false),
        Some(Value::Bool(b)) => Ok(*b),
        Some(_) => Err(SchemaError::invalid_keyword(
            path.clone(),
            "nullable",
            "expected a boolean",
        )),
    }
}

// =============================================================================
// Constraints
// =============================================================================

/// Constraint keywords in emission order.
fn read_rules(obj: &Object, path: &SchemaPath) -> Result<Vec<ValidationRule>, SchemaError> {
    let mut rules = Vec::new();

    if let Some(format) = obj.get("format") {
        let format = format
            .as_str()
            .ok_or_else(|| SchemaError::invalid_keyword(path.clone(), "format", "expected a string"))?;
        match ValidationRule::from_format(format) {
            Some(rule) => rules.push(rule),
            None => debug!(%path, format, "ignoring format without a validator"),
        }
    }

    if let Some(n) = read_count(obj, "minLength", path)? {
        rules.push(ValidationRule::MinLength(n));
    }
    if let Some(n) = read_count(obj, "maxLength", path)? {
        rules.push(ValidationRule::MaxLength(n));
    }
    if let Some(pattern) = obj.get("pattern") {
        let pattern = pattern.as_str().ok_or_else(|| {
            SchemaError::invalid_keyword(path.clone(), "pattern", "expected a string")
        })?;
        rules.push(ValidationRule::Pattern(pattern.to_string()));
    }

    read_bound(
        obj,
        path,
        ("minimum", "exclusiveMinimum"),
        ValidationRule::Min,
        ValidationRule::GreaterThan,
        &mut rules,
    )?;
    read_bound(
        obj,
        path,
        ("maximum", "exclusiveMaximum"),
        ValidationRule::Max,
        ValidationRule::LessThan,
        &mut rules,
    )?;

    if let Some(n) = read_number(obj, "multipleOf", path)? {
        if n <= 0.0 {
            return Err(SchemaError::invalid_keyword(
                path.clone(),
                "multipleOf",
                "must be greater than 0",
            ));
        }
        rules.push(ValidationRule::MultipleOf(n));
    }

    if let Some(n) = read_count(obj, "minItems", path)? {
        rules.push(ValidationRule::MinItems(n));
    }
    if let Some(n) = read_count(obj, "maxItems", path)? {
        rules.push(ValidationRule::MaxItems(n));
    }

    Ok(rules)
}

/// Inclusive bound plus its exclusive variant.
///
/// A boolean exclusive keyword turns the inclusive bound exclusive; a numeric
/// one is a bound of its own.
fn read_bound(
    obj: &Object,
    path: &SchemaPath,
    (inclusive, exclusive): (&'static str, &'static str),
    inclusive_rule: fn(f64) -> ValidationRule,
    exclusive_rule: fn(f64) -> ValidationRule,
    rules: &mut Vec<ValidationRule>,
) -> Result<(), SchemaError> {
    let bound = read_number(obj, inclusive, path)?;
    match obj.get(exclusive) {
        None | Some(Value::Bool(false)) => {
            if let Some(n) = bound {
                rules.push(inclusive_rule(n));
            }
        }
        Some(Value::Bool(true)) => match bound {
            Some(n) => rules.push(exclusive_rule(n)),
            None => {
                return Err(SchemaError::invalid_keyword(
                    path.clone(),
                    exclusive,
                    format!("requires '{}'", inclusive),
                ))
            }
        },
        Some(_) => {
            if let Some(n) = bound {
                rules.push(inclusive_rule(n));
            }
            if let Some(n) = read_number(obj, exclusive, path)? {
                rules.push(exclusive_rule(n));
            }
        }
    }
    Ok(())
}

fn read_number(obj: &Object, keyword: &str, path: &SchemaPath) -> Result<Option<f64>, SchemaError> {
    obj.get(keyword)
        .map(|value| {
            value.as_f64().ok_or_else(|| {
                SchemaError::invalid_keyword(path.clone(), keyword, "expected a number")
            })
        })
        .transpose()
}

fn read_count(obj: &Object, keyword: &str, path: &SchemaPath) -> Result<Option<u64>, SchemaError> {
    obj.get(keyword)
        .map(|value| {
            value.as_u64().ok_or_else(|| {
                SchemaError::invalid_keyword(path.clone(), keyword, "expected a non-negative integer")
            })
        })
        .transpose()
}

fn applicable(rules: &[ValidationRule], kind: &SchemaKind) -> Vec<ValidationRule> {
    rules
        .iter()
        .filter(|rule| rule.applies_to(kind))
        .cloned()
        .collect()
}

fn drop_rules(rules: &[ValidationRule], kind: &SchemaKind, path: &SchemaPath) {
    for rule in rules.iter().filter(|rule| !rule.applies_to(kind)) {
        debug!(%path, keyword = rule.keyword(), kind = kind.name(), "ignoring constraint");
    }
}
