//! Input parsers.
//!
//! Turns OpenAPI documents, already loaded into a [`serde_json::Value`], into
//! the IR consumed by the generator.

pub mod openapi;
pub mod schema;

pub use openapi::{parse_operations, parse_parameter, parse_parameters, parse_request_body};
pub use schema::parse_schema;
