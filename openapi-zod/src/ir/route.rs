//! Route IR definitions.

use serde::{Deserialize, Serialize};

use super::params::ParamsObject;
use crate::method::HttpMethod;

/// Classified parameters of one API operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteSchema {
    /// Identifier used for the exported constant (e.g. `getUser`)
    pub name: String,

    /// HTTP method of the operation
    pub method: HttpMethod,

    /// Path template (e.g. `/users/{userId}`)
    pub path: String,

    /// Operation summary, if the document has one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Generated expressions per parameter location
    pub params: ParamsObject,
}

impl RouteSchema {
    /// Create a new route with no summary.
    pub fn new(
        name: impl Into<String>,
        method: HttpMethod,
        path: impl Into<String>,
        params: ParamsObject,
    ) -> Self {
        Self {
            name: name.into(),
            method,
            path: path.into(),
            summary: None,
            params,
        }
    }

    /// Set the summary.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// `GET /users/{userId}` style label for messages and comments.
    pub fn label(&self) -> String {
        format!("{} {}", self.method.as_str().to_uppercase(), self.path)
    }
}
