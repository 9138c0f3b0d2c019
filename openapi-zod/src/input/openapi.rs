//! OpenAPI document to route parser.
//!
//! Walks the `paths` of an OpenAPI 3.x document and turns every operation
//! into a [`RouteSchema`]. The document must be fully dereferenced: any
//! `$ref` is reported as an error rather than followed.

use convert_case::{Case, Casing};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::{debug, instrument, warn};

use crate::error::{InputError, SchemaError};
use crate::generator::zod::generate_params_object;
use crate::input::schema::parse_schema;
use crate::ir::{ParameterDescriptor, ParameterLocation, RouteSchema, SchemaKind, SchemaNode, SchemaPath};
use crate::method::HttpMethod;

/// Parse every operation of an OpenAPI 3.x document, in document order.
///
/// # Example
///
/// ```rust
/// use openapi_zod::input::parse_operations;
/// use serde_json::json;
///
/// let doc = json!({
///     "openapi": "3.0.3",
///     "paths": {
///         "/users/{userId}": {
///             "get": {
///                 "operationId": "getUser",
///                 "parameters": [
///                     { "name": "userId", "in": "path", "schema": { "type": "string" } }
///                 ]
///             }
///         }
///     }
/// });
///
/// let routes = parse_operations(&doc).unwrap();
/// assert_eq!(routes[0].name, "getUser");
/// assert_eq!(routes[0].params.params["userId"], "z.string()");
/// ```
pub fn parse_operations(document: &Value) -> Result<Vec<RouteSchema>, InputError> {
    let version = document
        .get("openapi")
        .and_then(Value::as_str)
        .unwrap_or("");
    if !version.starts_with("3.") {
        return Err(InputError::UnsupportedVersion(version.to_string()));
    }

    let paths = match document.get("paths") {
        None => return Ok(Vec::new()),
        Some(Value::Object(paths)) => paths,
        Some(_) => {
            return Err(InputError::invalid_field(
                "document",
                "paths",
                "expected an object",
            ))
        }
    };

    let mut routes = Vec::new();
    let mut names: IndexMap<String, String> = IndexMap::new();

    for (path, item) in paths {
        let context = format!("path '{}'", path);
        let item = as_object(item, &context, "paths")?;
        reject_ref(item, &context)?;

        let shared = match item.get("parameters") {
            Some(parameters) => parse_parameters(parameters)?,
            None => Vec::new(),
        };

        for (key, operation) in item {
            let Some(method) = HttpMethod::parse(key) else {
                continue;
            };
            let route = parse_operation(path, method, operation, &shared)?;

            let label = route.label();
            if let Some(first) = names.insert(route.name.clone(), label.clone()) {
                return Err(InputError::DuplicateName {
                    name: route.name,
                    first,
                    second: label,
                });
            }
            routes.push(route);
        }
    }

    debug!(routes = routes.len(), "parsed OpenAPI operations");
    Ok(routes)
}

#[instrument(level = "debug", skip(method, operation, shared), fields(method = %method))]
fn parse_operation(
    path: &str,
    method: HttpMethod,
    operation: &Value,
    shared: &[ParameterDescriptor],
) -> Result<RouteSchema, InputError> {
    let label = format!("{} {}", method.as_str().to_uppercase(), path);
    let operation = as_object(operation, &label, "operation")?;

    let mut descriptors = shared.to_vec();
    if let Some(parameters) = operation.get("parameters") {
        for descriptor in parse_parameters(parameters)? {
            let existing = descriptors
                .iter()
                .position(|d| d.name == descriptor.name && d.location == descriptor.location);
            match existing {
                Some(index) => descriptors[index] = descriptor,
                None => descriptors.push(descriptor),
            }
        }
    }
    if let Some(body) = operation.get("requestBody") {
        descriptors.extend(parse_request_body(body)?);
    }

    let params = generate_params_object(&descriptors).map_err(|source| InputError::Params {
        route: label.clone(),
        source,
    })?;

    let name = match operation.get("operationId").and_then(Value::as_str) {
        Some(id) => route_name(id),
        None => route_name(&format!("{} {}", method, path)),
    };

    let mut route = RouteSchema::new(name, method, path, params);
    if let Some(summary) = operation.get("summary").and_then(Value::as_str) {
        route = route.with_summary(summary);
    }
    Ok(route)
}

/// Parse a `parameters` array.
pub fn parse_parameters(value: &Value) -> Result<Vec<ParameterDescriptor>, InputError> {
    value
        .as_array()
        .ok_or_else(|| InputError::invalid_field("parameters", "parameters", "expected an array"))?
        .iter()
        .map(parse_parameter)
        .collect()
}

/// Parse one parameter object.
///
/// `required` defaults to `true` for path parameters and `false` elsewhere;
/// a missing `schema` accepts any value.
pub fn parse_parameter(value: &Value) -> Result<ParameterDescriptor, InputError> {
    let obj = as_object(value, "parameter", "parameters")?;
    reject_ref(obj, "parameter")?;

    let name = obj
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| InputError::missing_field("parameter", "name"))?;
    let context = format!("parameter '{}'", name);

    let location: ParameterLocation = obj
        .get("in")
        .and_then(Value::as_str)
        .ok_or_else(|| InputError::missing_field(&context, "in"))?
        .parse()
        .map_err(|source| InputError::UnknownLocation {
            name: name.to_string(),
            source,
        })?;

    let required = match obj.get("required") {
        None => location == ParameterLocation::Path,
        Some(Value::Bool(required)) => *required,
        Some(_) => return Err(InputError::invalid_field(context, "required", "expected a boolean")),
    };

    let schema = match obj.get("schema") {
        Some(schema) => parse_schema(schema)
            .map_err(|source| InputError::schema(format!("{} {}", location, context), source))?,
        None => SchemaNode::any(),
    };

    Ok(ParameterDescriptor::new(name, location, required, schema))
}

/// Split a JSON `requestBody` into one body descriptor per property.
///
/// A property is required when the body is required and the property is
/// listed in the schema's `required`. Bodies without JSON content are
/// skipped.
pub fn parse_request_body(value: &Value) -> Result<Vec<ParameterDescriptor>, InputError> {
    const CONTEXT: &str = "requestBody";

    let obj = as_object(value, CONTEXT, "requestBody")?;
    reject_ref(obj, CONTEXT)?;

    let body_required = match obj.get("required") {
        None => false,
        Some(Value::Bool(required)) => *required,
        Some(_) => return Err(InputError::invalid_field(CONTEXT, "required", "expected a boolean")),
    };

    let content = obj
        .get("content")
        .ok_or_else(|| InputError::missing_field(CONTEXT, "content"))?;
    let content = as_object(content, CONTEXT, "content")?;

    let Some((media_type, media)) = content.iter().find(|(media_type, _)| is_json(media_type))
    else {
        warn!(
            media_types = ?content.keys().collect::<Vec<_>>(),
            "skipping request body without JSON content"
        );
        return Ok(Vec::new());
    };

    let Some(schema) = media.get("schema") else {
        return Ok(Vec::new());
    };
    let context = format!("{} '{}'", CONTEXT, media_type);
    let node = parse_schema(schema).map_err(|source| InputError::schema(&context, source))?;

    let object = match node.kind {
        SchemaKind::Object(object) => object,
        other => {
            return Err(InputError::UnsupportedBody {
                context,
                message: format!("body schema must be an object, found {}", other.name()),
            })
        }
    };
    if object.additional_properties.is_some() {
        debug!(%context, "additional body properties are not split into fields");
    }

    let required: Vec<bool> = object
        .properties
        .keys()
        .map(|name| body_required && object.is_required(name))
        .collect();
    Ok(object
        .properties
        .into_iter()
        .zip(required)
        .map(|((name, schema), required)| ParameterDescriptor::body(name, required, schema))
        .collect())
}

/// Exported-name stem for an operation: camel case, identifier-safe.
fn route_name(raw: &str) -> String {
    let words: String = raw
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { ' ' })
        .collect();
    let name = words.to_case(Case::Camel);
    match name.chars().next() {
        Some(first) if first.is_ascii_digit() => format!("_{}", name),
        Some(_) => name,
        None => "_".to_string(),
    }
}

fn is_json(media_type: &str) -> bool {
    let essence = media_type.split(';').next().unwrap_or("").trim();
    essence == "application/json" || essence.ends_with("+json")
}

fn as_object<'a>(
    value: &'a Value,
    context: &str,
    field: &'static str,
) -> Result<&'a Map<String, Value>, InputError> {
    value
        .as_object()
        .ok_or_else(|| InputError::invalid_field(context, field, "expected an object"))
}

fn reject_ref(obj: &Map<String, Value>, context: &str) -> Result<(), InputError> {
    match obj.get("$ref") {
        Some(reference) => Err(InputError::schema(
            context,
            SchemaError::UnresolvedRef {
                path: SchemaPath::root(),
                reference: reference
                    .as_str()
                    .map(str::to_string)
                    .unwrap_or_else(|| reference.to_string()),
            },
        )),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::UnknownLocationError;
    use serde_json::json;

    fn document(paths: Value) -> Value {
        json!({
            "openapi": "3.0.3",
            "info": { "title": "Test API", "version": "1.0.0" },
            "paths": paths
        })
    }

    // =========================================================================
    // Parameter Tests
    // =========================================================================

    #[test]
    fn test_parse_parameter_defaults() {
        let path = parse_parameter(&json!({"name": "id", "in": "path"})).unwrap();
        assert!(path.required);
        assert_eq!(path.schema, SchemaNode::any());

        let query = parse_parameter(&json!({
            "name": "page", "in": "query", "schema": {"type": "integer"}
        }))
        .unwrap();
        assert!(!query.required);
        assert_eq!(query.schema, SchemaNode::integer());
    }

    #[test]
    fn test_parse_parameter_unknown_location() {
        let err = parse_parameter(&json!({"name": "session", "in": "cookie"})).unwrap_err();
        assert_eq!(
            err,
            InputError::UnknownLocation {
                name: "session".to_string(),
                source: UnknownLocationError("cookie".to_string()),
            }
        );
    }

    #[test]
    fn test_parse_parameter_missing_fields() {
        let err = parse_parameter(&json!({"in": "query"})).unwrap_err();
        assert_eq!(err, InputError::missing_field("parameter", "name"));

        let err = parse_parameter(&json!({"name": "q"})).unwrap_err();
        assert_eq!(err.to_string(), "parameter 'q' is missing 'in'");
    }

    #[test]
    fn test_parse_parameter_schema_error_context() {
        let err = parse_parameter(&json!({
            "name": "tags", "in": "query", "schema": {"type": "array"}
        }))
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "query parameter 'tags': array schema at # is missing 'items'"
        );
    }

    #[test]
    fn test_parameter_ref_rejected() {
        let err = parse_parameters(&json!([{"$ref": "#/components/parameters/Page"}])).unwrap_err();
        assert!(matches!(
            err,
            InputError::Schema { source: SchemaError::UnresolvedRef { .. }, .. }
        ));
    }

    // =========================================================================
    // Request Body Tests
    // =========================================================================

    #[test]
    fn test_parse_request_body_splits_properties() {
        let body = parse_request_body(&json!({
            "required": true,
            "content": {
                "application/json; charset=utf-8": {
                    "schema": {
                        "type": "object",
                        "required": ["title"],
                        "properties": {
                            "title": {"type": "string"},
                            "done": {"type": "boolean"}
                        }
                    }
                }
            }
        }))
        .unwrap();

        assert_eq!(
            body,
            vec![
                ParameterDescriptor::body("title", true, SchemaNode::string()),
                ParameterDescriptor::body("done", false, SchemaNode::boolean()),
            ]
        );
    }

    #[test]
    fn test_optional_body_makes_every_field_optional() {
        let body = parse_request_body(&json!({
            "content": {"application/json": {"schema": {
                "type": "object", "required": ["title"], "properties": {"title": {"type": "string"}}
            }}}
        }))
        .unwrap();
        assert!(!body[0].required);
    }

    #[test]
    fn test_non_object_body_rejected() {
        let err = parse_request_body(&json!({
            "content": {"application/json": {"schema": {"type": "array", "items": {}}}}
        }))
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "requestBody 'application/json': body schema must be an object, found array"
        );
    }

    #[test]
    fn test_non_json_body_skipped() {
        let body = parse_request_body(&json!({
            "content": {"multipart/form-data": {"schema": {"type": "object"}}}
        }))
        .unwrap();
        assert!(body.is_empty());
    }

    // =========================================================================
    // Operation Tests
    // =========================================================================

    #[test]
    fn test_rejects_swagger_2() {
        let err = parse_operations(&json!({"swagger": "2.0"})).unwrap_err();
        assert_eq!(err, InputError::UnsupportedVersion(String::new()));
    }

    #[test]
    fn test_parse_operations_in_document_order() {
        let doc = document(json!({
            "/users": {
                "summary": "Users",
                "post": {"operationId": "create_user"},
                "get": {"operationId": "list-users", "summary": "List users"}
            },
            "/health": {"head": {}}
        }));

        let routes = parse_operations(&doc).unwrap();
        let names: Vec<_> = routes.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["createUser", "listUsers", "headHealth"]);
        assert_eq!(routes[1].summary.as_deref(), Some("List users"));
        assert_eq!(routes[2].label(), "HEAD /health");
    }

    #[test]
    fn test_operation_parameters_override_path_parameters() {
        let doc = document(json!({
            "/items/{itemId}": {
                "parameters": [
                    {"name": "itemId", "in": "path", "schema": {"type": "string"}},
                    {"name": "verbose", "in": "query", "schema": {"type": "boolean"}}
                ],
                "get": {
                    "parameters": [
                        {"name": "itemId", "in": "path", "schema": {"type": "integer"}}
                    ]
                }
            }
        }));

        let routes = parse_operations(&doc).unwrap();
        let route = &routes[0];
        assert_eq!(route.name, "getItemsItemId");
        assert_eq!(route.params.params["itemId"], "z.number().int()");
        assert_eq!(route.params.query["verbose"], "z.boolean().optional()");
    }

    #[test]
    fn test_request_body_fields_in_body_bucket() {
        let doc = document(json!({
            "/todos": {
                "post": {
                    "operationId": "createTodo",
                    "requestBody": {
                        "required": true,
                        "content": {"application/json": {"schema": {
                            "type": "object",
                            "required": ["title"],
                            "properties": {"title": {"type": "string", "minLength": 1}}
                        }}}
                    }
                }
            }
        }));

        let routes = parse_operations(&doc).unwrap();
        assert_eq!(routes[0].params.body["title"], "z.string().min(1)");
    }

    #[test]
    fn test_misplaced_constraint_names_parameter() {
        let doc = document(json!({
            "/things": {
                "get": {"parameters": [
                    {"name": "kind", "in": "query", "schema": {
                        "oneOf": [{"type": "string"}, {"type": "boolean", "maxLength": 2}]
                    }}
                ]}
            }
        }));

        let err = parse_operations(&doc).unwrap_err();
        assert_eq!(
            err.to_string(),
            "query parameter 'kind': 'maxLength' at #/oneOf/1 does not apply to boolean schemas"
        );
    }

    #[test]
    fn test_parameter_keywords_combine() {
        let doc = document(json!({
            "/search": {
                "get": {"parameters": [
                    {"name": "x-tenant", "in": "header", "required": true, "schema": {
                        "type": "string",
                        "allOf": [{"type": "string", "maxLength": 8}]
                    }},
                    {"name": "limit", "in": "query", "schema": {
                        "type": "integer",
                        "allOf": [{"type": "integer", "maximum": 50}]
                    }},
                    {"name": "version", "in": "query", "required": true, "schema": {"const": "v2"}}
                ]}
            }
        }));

        let routes = parse_operations(&doc).unwrap();
        let params = &routes[0].params;
        assert_eq!(params.headers["x-tenant"], "z.string().and(z.string().max(8))");
        assert_eq!(
            params.query["limit"],
            "z.string().transform(Number).pipe(z.number().int().and(z.number().int().max(50))).optional()"
        );
        assert_eq!(params.query["version"], "z.enum([\"v2\"])");
    }

    #[test]
    fn test_duplicate_route_names_rejected() {
        let doc = document(json!({
            "/a": {"get": {"operationId": "fetch"}},
            "/b": {"get": {"operationId": "fetch"}}
        }));
        let err = parse_operations(&doc).unwrap_err();
        assert_eq!(
            err,
            InputError::DuplicateName {
                name: "fetch".to_string(),
                first: "GET /a".to_string(),
                second: "GET /b".to_string(),
            }
        );
    }

    #[test]
    fn test_route_name() {
        assert_eq!(route_name("getUser"), "getUser");
        assert_eq!(route_name("get /users/{userId}/posts"), "getUsersUserIdPosts");
        assert_eq!(route_name("delete_item"), "deleteItem");
        assert_eq!(route_name("!!!"), "_");
    }

    #[test]
    fn test_missing_paths_yields_no_routes() {
        let routes = parse_operations(&json!({"openapi": "3.1.0"})).unwrap();
        assert!(routes.is_empty());
    }
}
