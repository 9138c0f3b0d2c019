//! # openapi-zod
//!
//! Generate TypeScript [Zod](https://zod.dev) validation expressions from
//! OpenAPI schemas and operation parameters.
//!
//! The crate works in three stages:
//!
//! 1. [`input`] reads an OpenAPI 3.x document (as a `serde_json::Value`) into
//!    the [`ir`]: schema nodes and parameter descriptors.
//! 2. [`generator::zod`] maps schema nodes to Zod expressions and classifies
//!    parameters into the four request buckets (`params`, `query`,
//!    `headers`, `body`).
//! 3. [`generator::zod::RouteEmitter`] renders the result as a TypeScript
//!    module.
//!
//! ## Usage
//!
//! ```rust
//! use openapi_zod::{generate_params_object, ParameterDescriptor, SchemaNode};
//!
//! let params = generate_params_object(&[
//!     ParameterDescriptor::path("userId", SchemaNode::string()),
//!     ParameterDescriptor::query("page", false, SchemaNode::integer()),
//! ])
//! .unwrap();
//!
//! assert_eq!(params.params["userId"], "z.string()");
//! assert!(params.headers.is_empty());
//! ```
//!
//! ## Coercion
//!
//! Query string values always arrive as text. Numeric query parameters are
//! wrapped so the raw string is parsed before validation:
//!
//! ```text
//! z.string().transform(Number).pipe(z.number().int())
//! ```

pub mod error;
pub mod generator;
pub mod input;
pub mod ir;
pub mod method;

pub use error::{InputError, ParamsError, SchemaError};
pub use generator::zod::{
    generate_params_object, generate_zod_coercion, generate_zod_object_schema,
    generate_zod_schema, RouteEmitter,
};
pub use generator::GeneratorConfig;
pub use ir::{ParameterDescriptor, ParameterLocation, ParamsObject, RouteSchema, SchemaNode};
pub use method::{is_http_method, HttpMethod};
