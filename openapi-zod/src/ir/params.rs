//! Request parameter IR definitions.
//!
//! A [`ParameterDescriptor`] is one request parameter read from an OpenAPI
//! operation. The classifier groups the generated expressions into a
//! [`ParamsObject`], one bucket per [`ParameterLocation`].

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::schema::SchemaNode;

/// Where a parameter is carried in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Body,
}

impl ParameterLocation {
    /// All locations, in bucket order.
    pub const ALL: [ParameterLocation; 4] = [
        ParameterLocation::Path,
        ParameterLocation::Query,
        ParameterLocation::Header,
        ParameterLocation::Body,
    ];

    /// The `in` value used by OpenAPI documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterLocation::Path => "path",
            ParameterLocation::Query => "query",
            ParameterLocation::Header => "header",
            ParameterLocation::Body => "body",
        }
    }

    /// Name of the [`ParamsObject`] bucket holding this location.
    pub fn bucket_name(&self) -> &'static str {
        match self {
            ParameterLocation::Path => "params",
            ParameterLocation::Query => "query",
            ParameterLocation::Header => "headers",
            ParameterLocation::Body => "body",
        }
    }

    /// Whether raw values for this location arrive as text.
    pub fn is_textual(&self) -> bool {
        matches!(self, ParameterLocation::Query)
    }
}

impl fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when an `in` value is not a supported location.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown parameter location '{0}' (expected path, query, header or body)")]
pub struct UnknownLocationError(pub String);

impl FromStr for ParameterLocation {
    type Err = UnknownLocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "path" => Ok(ParameterLocation::Path),
            "query" => Ok(ParameterLocation::Query),
            "header" => Ok(ParameterLocation::Header),
            "body" => Ok(ParameterLocation::Body),
            other => Err(UnknownLocationError(other.to_string())),
        }
    }
}

/// One request parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    /// Parameter name, unique within its location
    pub name: String,

    /// Where the parameter is carried
    #[serde(rename = "in")]
    pub location: ParameterLocation,

    /// Whether the parameter must be present
    #[serde(default)]
    pub required: bool,

    /// Schema the value must satisfy
    pub schema: SchemaNode,
}

impl ParameterDescriptor {
    /// Create a new descriptor.
    pub fn new(
        name: impl Into<String>,
        location: ParameterLocation,
        required: bool,
        schema: SchemaNode,
    ) -> Self {
        Self {
            name: name.into(),
            location,
            required,
            schema,
        }
    }

    pub fn path(name: impl Into<String>, schema: SchemaNode) -> Self {
        Self::new(name, ParameterLocation::Path, true, schema)
    }

    pub fn query(name: impl Into<String>, required: bool, schema: SchemaNode) -> Self {
        Self::new(name, ParameterLocation::Query, required, schema)
    }

    pub fn header(name: impl Into<String>, required: bool, schema: SchemaNode) -> Self {
        Self::new(name, ParameterLocation::Header, required, schema)
    }

    pub fn body(name: impl Into<String>, required: bool, schema: SchemaNode) -> Self {
        Self::new(name, ParameterLocation::Body, required, schema)
    }

    /// Whether the classifier re-parses this parameter from text.
    pub fn needs_coercion(&self) -> bool {
        self.location.is_textual() && self.schema.is_numeric()
    }
}

/// Generated expressions grouped by parameter location.
///
/// All four buckets are always present; each keeps insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamsObject {
    pub params: IndexMap<String, String>,
    pub query: IndexMap<String, String>,
    pub headers: IndexMap<String, String>,
    pub body: IndexMap<String, String>,
}

impl ParamsObject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bucket for a location.
    pub fn bucket(&self, location: ParameterLocation) -> &IndexMap<String, String> {
        match location {
            ParameterLocation::Path => &self.params,
            ParameterLocation::Query => &self.query,
            ParameterLocation::Header => &self.headers,
            ParameterLocation::Body => &self.body,
        }
    }

    /// Mutable bucket for a location.
    pub fn bucket_mut(&mut self, location: ParameterLocation) -> &mut IndexMap<String, String> {
        match location {
            ParameterLocation::Path => &mut self.params,
            ParameterLocation::Query => &mut self.query,
            ParameterLocation::Header => &mut self.headers,
            ParameterLocation::Body => &mut self.body,
        }
    }

    /// Insert an expression, returning the one it replaced.
    pub fn insert(
        &mut self,
        location: ParameterLocation,
        name: impl Into<String>,
        expression: impl Into<String>,
    ) -> Option<String> {
        self.bucket_mut(location)
            .insert(name.into(), expression.into())
    }

    /// Iterate over `(location, bucket)` pairs in bucket order.
    pub fn buckets(&self) -> impl Iterator<Item = (ParameterLocation, &IndexMap<String, String>)> {
        ParameterLocation::ALL
            .into_iter()
            .map(move |location| (location, self.bucket(location)))
    }

    /// Total number of entries across all buckets.
    pub fn len(&self) -> usize {
        self.buckets().map(|(_, bucket)| bucket.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
