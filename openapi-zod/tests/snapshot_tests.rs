//! Snapshot tests for generated Zod code.
//!
//! These tests use insta inline snapshots to pin the exact output of the
//! generator. Run `cargo insta review` to review and accept changes.

use serde_json::json;

use openapi_zod::generator::{GeneratorConfig, IndentStyle};
use openapi_zod::input::{parse_operations, parse_schema};
use openapi_zod::ir::ObjectSchema;
use openapi_zod::{
    generate_params_object, generate_zod_schema, ParameterDescriptor, RouteEmitter, SchemaNode,
};

// =============================================================================
// Schema Snapshots
// =============================================================================

#[test]
fn snapshot_object_required_and_optional() {
    let node = SchemaNode::object(
        ObjectSchema::new()
            .with_property("name", SchemaNode::string(), true)
            .with_property("age", SchemaNode::integer(), false),
    );

    insta::assert_snapshot!(
        generate_zod_schema(&node).unwrap(),
        @"z.object({name:z.string(),age:z.number().int().optional()})"
    );
}

#[test]
fn snapshot_empty_object() {
    let node = SchemaNode::object(ObjectSchema::new());
    insta::assert_snapshot!(generate_zod_schema(&node).unwrap(), @"z.object({})");
}

#[test]
fn snapshot_parsed_schema() {
    let schema = json!({
        "type": "object",
        "required": ["id", "email"],
        "properties": {
            "id": {"type": "string", "format": "uuid"},
            "email": {"type": "string", "format": "email", "maxLength": 254},
            "nickname": {"type": ["string", "null"], "minLength": 1},
            "role": {"enum": ["admin", "member"]},
            "score": {"type": "number", "minimum": 0, "exclusiveMaximum": 100},
            "tags": {"type": "array", "items": {"type": "string"}, "maxItems": 10},
            "meta": {"type": "object", "additionalProperties": {"type": "string"}}
        },
        "additionalProperties": false
    });

    let node = parse_schema(&schema).unwrap();
    insta::assert_snapshot!(
        generate_zod_schema(&node).unwrap(),
        @r#"z.object({id:z.string().uuid(),email:z.string().email().max(254),nickname:z.string().min(1).nullable().optional(),role:z.enum(["admin","member"]).optional(),score:z.number().min(0).lt(100).optional(),tags:z.array(z.string()).max(10).optional(),meta:z.record(z.string(),z.string()).optional()}).strict()"#
    );
}

#[test]
fn snapshot_composites() {
    let schema = json!({
        "oneOf": [
            {"type": "object", "required": ["kind"], "properties": {"kind": {"enum": ["circle"]}, "radius": {"type": "number"}}},
            {"allOf": [
                {"type": "object", "properties": {"kind": {"enum": ["square"]}}},
                {"type": "object", "properties": {"side": {"type": "number"}}}
            ]}
        ],
        "nullable": true
    });

    let node = parse_schema(&schema).unwrap();
    insta::assert_snapshot!(
        generate_zod_schema(&node).unwrap(),
        @r#"z.union([z.object({kind:z.enum(["circle"]),radius:z.number().optional()}),z.object({kind:z.enum(["square"]).optional()}).and(z.object({side:z.number().optional()}))]).nullable()"#
    );
}

// =============================================================================
// Parameter Snapshots
// =============================================================================

#[test]
fn snapshot_path_and_query_params() {
    let params = generate_params_object(&[
        ParameterDescriptor::path("userId", SchemaNode::string()),
        ParameterDescriptor::query("page", false, SchemaNode::integer()),
    ])
    .unwrap();

    insta::assert_snapshot!(
        params.params["userId"].as_str(),
        @"z.string()"
    );
    insta::assert_snapshot!(
        params.query["page"].as_str(),
        @"z.string().transform(Number).pipe(z.number().int()).optional()"
    );
}

// =============================================================================
// Module Snapshots
// =============================================================================

fn petstore() -> serde_json::Value {
    json!({
        "openapi": "3.0.3",
        "info": {"title": "Petstore", "version": "1.0.0"},
        "paths": {
            "/pets": {
                "get": {
                    "operationId": "listPets",
                    "summary": "List all pets",
                    "parameters": [
                        {"name": "limit", "in": "query", "schema": {"type": "integer", "maximum": 100}},
                        {"name": "x-request-id", "in": "header", "required": true, "schema": {"type": "string"}}
                    ]
                },
                "post": {
                    "operationId": "createPet",
                    "requestBody": {
                        "required": true,
                        "content": {"application/json": {"schema": {
                            "type": "object",
                            "required": ["name"],
                            "properties": {
                                "name": {"type": "string", "minLength": 1},
                                "tag": {"type": "string"}
                            }
                        }}}
                    }
                }
            },
            "/pets/{petId}": {
                "parameters": [
                    {"name": "petId", "in": "path", "schema": {"type": "integer"}}
                ],
                "delete": {}
            }
        }
    })
}

#[test]
fn snapshot_petstore_module() {
    let routes = parse_operations(&petstore()).unwrap();
    let output = RouteEmitter::new(GeneratorConfig::default()).emit_file(&routes);

    insta::assert_snapshot!(output, @r#"
// This file was generated by openapi-zod. Do not edit it by hand.
import { z } from "zod";

/** GET /pets - List all pets */
export const listPetsSchema = {
  params: z.object({}),
  query: z.object({limit:z.string().transform(Number).pipe(z.number().int().max(100)).optional()}),
  headers: z.object({"x-request-id":z.string()}),
  body: z.object({}),
};

/** POST /pets */
export const createPetSchema = {
  params: z.object({}),
  query: z.object({}),
  headers: z.object({}),
  body: z.object({name:z.string().min(1),tag:z.string().optional()}),
};

/** DELETE /pets/{petId} */
export const deletePetsPetIdSchema = {
  params: z.object({petId:z.number().int()}),
  query: z.object({}),
  headers: z.object({}),
  body: z.object({}),
};
"#);
}

#[test]
fn snapshot_module_with_custom_config() {
    let routes = parse_operations(&petstore()).unwrap();
    let config = GeneratorConfig::new()
        .with_indent(IndentStyle::Spaces4)
        .with_schema_suffix("Request")
        .with_zod_import("zod/v4")
        .with_generate_docs(false);
    let output = RouteEmitter::new(config).emit_file(&routes[2..]);

    insta::assert_snapshot!(output, @r#"
// This file was generated by openapi-zod. Do not edit it by hand.
import { z } from "zod/v4";

export const deletePetsPetIdRequest = {
    params: z.object({petId:z.number().int()}),
    query: z.object({}),
    headers: z.object({}),
    body: z.object({}),
};
"#);
}
