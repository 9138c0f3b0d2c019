//! Zod schema generator.
//!
//! This module transforms the intermediate representation (IR) into Zod
//! expressions and TypeScript modules.
//!
//! # Components
//!
//! - [`ZodExpr`] - Builder for one expression, owns the modifier order
//! - [`ZodSchemaMapper`] - Maps schema nodes to Zod expressions
//! - [`ParamsClassifier`] - Groups parameter expressions by location
//! - [`RouteEmitter`] - Renders routes into a TypeScript module
//!
//! # Example
//!
//! ```rust
//! use openapi_zod::generator::zod::generate_params_object;
//! use openapi_zod::ir::{ParameterDescriptor, SchemaNode};
//!
//! let params = generate_params_object(&[
//!     ParameterDescriptor::path("userId", SchemaNode::string()),
//!     ParameterDescriptor::query("page", false, SchemaNode::integer()),
//! ])
//! .unwrap();
//!
//! assert_eq!(params.params["userId"], "z.string()");
//! assert_eq!(
//!     params.query["page"],
//!     "z.string().transform(Number).pipe(z.number().int()).optional()"
//! );
//! ```

pub mod builder;
pub mod emitter;
pub mod params;
pub mod type_mapper;

pub use builder::{generate_zod_coercion, generate_zod_object_schema, ZodExpr};
pub use emitter::RouteEmitter;
pub use params::{generate_params_object, ParamsClassifier};
pub use type_mapper::{generate_zod_schema, ZodSchemaMapper};
