//! Intermediate Representation (IR) module.
//!
//! This module defines the data structures that sit between a parsed OpenAPI
//! document and the generated Zod code: schema nodes, their validation rules,
//! and the request parameter descriptors grouped by location.

pub mod params;
pub mod path;
pub mod route;
pub mod schema;
pub mod validation;

pub use params::{ParameterDescriptor, ParameterLocation, ParamsObject, UnknownLocationError};
pub use path::SchemaPath;
pub use route::RouteSchema;
pub use schema::{Literal, ObjectSchema, SchemaKind, SchemaNode};
pub use validation::ValidationRule;
