//! Error types for schema generation.
//!
//! Every failure is local to one schema node or one parameter and aborts
//! generation for the whole route. Schema errors carry the [`SchemaPath`] of
//! the offending node so the document author can find it.

use thiserror::Error;

use crate::ir::{ParameterLocation, SchemaPath, UnknownLocationError};

/// Error raised for a malformed schema node.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    /// Enum without any value.
    #[error("enum at {path} has no values")]
    EmptyEnum { path: SchemaPath },

    /// Union or intersection without any branch.
    #[error("{kind} at {path} has no branches")]
    EmptyComposite { path: SchemaPath, kind: &'static str },

    /// Constraint keyword on a kind it cannot apply to.
    #[error("'{keyword}' at {path} does not apply to {kind} schemas")]
    MisplacedConstraint {
        path: SchemaPath,
        keyword: &'static str,
        kind: &'static str,
    },

    /// `$ref` that was not resolved before generation.
    #[error("unresolved reference '{reference}' at {path}")]
    UnresolvedRef { path: SchemaPath, reference: String },

    /// `type` value outside the supported set.
    #[error("unknown type '{type_name}' at {path}")]
    UnknownType { path: SchemaPath, type_name: String },

    /// Keyword required by the schema's kind is absent.
    #[error("{kind} schema at {path} is missing '{keyword}'")]
    MissingKeyword {
        path: SchemaPath,
        keyword: &'static str,
        kind: &'static str,
    },

    /// Keyword present with a value of the wrong shape.
    #[error("invalid '{keyword}' at {path}: {message}")]
    InvalidKeyword {
        path: SchemaPath,
        keyword: String,
        message: String,
    },

    /// Schema is not a JSON object.
    #[error("schema at {path} must be an object")]
    NotAnObject { path: SchemaPath },

    /// Two sibling keywords that no value can satisfy together.
    #[error("'{first}' and '{second}' at {path} contradict each other")]
    ConflictingKeywords {
        path: SchemaPath,
        first: &'static str,
        second: &'static str,
    },
}

impl SchemaError {
    /// Path of the node that caused the error.
    pub fn path(&self) -> &SchemaPath {
        match self {
            SchemaError::EmptyEnum { path }
            | SchemaError::EmptyComposite { path, .. }
            | SchemaError::MisplacedConstraint { path, .. }
            | SchemaError::UnresolvedRef { path, .. }
            | SchemaError::UnknownType { path, .. }
            | SchemaError::MissingKeyword { path, .. }
            | SchemaError::InvalidKeyword { path, .. }
            | SchemaError::NotAnObject { path }
            | SchemaError::ConflictingKeywords { path, .. } => path,
        }
    }

    /// Create an invalid keyword error.
    pub fn invalid_keyword(
        path: SchemaPath,
        keyword: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidKeyword {
            path,
            keyword: keyword.into(),
            message: message.into(),
        }
    }
}

/// Error raised by the parameter classifier.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamsError {
    /// A parameter's schema could not be transformed.
    #[error("{location} parameter '{name}': {source}")]
    Schema {
        name: String,
        location: ParameterLocation,
        #[source]
        source: SchemaError,
    },
}

/// Error raised while reading an OpenAPI document.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    /// Document is not OpenAPI 3.x.
    #[error("OpenAPI version '{0}' not supported (expected 3.x)")]
    UnsupportedVersion(String),

    /// Parameter `in` value outside path, query, header and body.
    #[error("parameter '{name}': {source}")]
    UnknownLocation {
        name: String,
        #[source]
        source: UnknownLocationError,
    },

    /// Required field absent.
    #[error("{context} is missing '{field}'")]
    MissingField {
        context: String,
        field: &'static str,
    },

    /// Field present with a value of the wrong shape.
    #[error("invalid '{field}' in {context}: {message}")]
    InvalidField {
        context: String,
        field: &'static str,
        message: String,
    },

    /// Malformed schema inside the document.
    #[error("{context}: {source}")]
    Schema {
        context: String,
        #[source]
        source: SchemaError,
    },

    /// Classifier failure for one route.
    #[error("{route}: {source}")]
    Params {
        route: String,
        #[source]
        source: ParamsError,
    },

    /// Request body that cannot be split into body fields.
    #[error("{context}: {message}")]
    UnsupportedBody { context: String, message: String },

    /// Two operations resolve to the same exported name.
    #[error("operations '{first}' and '{second}' both generate '{name}'")]
    DuplicateName {
        name: String,
        first: String,
        second: String,
    },
}

impl InputError {
    /// Create a missing field error.
    pub fn missing_field(context: impl Into<String>, field: &'static str) -> Self {
        Self::MissingField {
            context: context.into(),
            field,
        }
    }

    /// Create an invalid field error.
    pub fn invalid_field(
        context: impl Into<String>,
        field: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidField {
            context: context.into(),
            field,
            message: message.into(),
        }
    }

    /// Wrap a schema error with the place it was read from.
    pub fn schema(context: impl Into<String>, source: SchemaError) -> Self {
        Self::Schema {
            context: context.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_display_includes_path() {
        let err = SchemaError::EmptyEnum {
            path: SchemaPath::root().join("properties").join("status"),
        };
        assert_eq!(err.to_string(), "enum at #/properties/status has no values");
    }

    #[test]
    fn test_schema_error_path_accessor() {
        let path = SchemaPath::root().join_index("oneOf", 0);
        let err = SchemaError::EmptyComposite {
            path: path.clone(),
            kind: "union",
        };
        assert_eq!(err.path(), &path);
    }

    #[test]
    fn test_conflicting_keywords_display() {
        let err = SchemaError::ConflictingKeywords {
            path: SchemaPath::root().join("properties").join("version"),
            first: "const",
            second: "type",
        };
        assert_eq!(
            err.to_string(),
            "'const' and 'type' at #/properties/version contradict each other"
        );
        assert_eq!(err.path().to_string(), "#/properties/version");
    }

    #[test]
    fn test_params_error_display() {
        let err = ParamsError::Schema {
            name: "page".to_string(),
            location: ParameterLocation::Query,
            source: SchemaError::MisplacedConstraint {
                path: SchemaPath::root(),
                keyword: "minLength",
                kind: "integer",
            },
        };
        assert_eq!(
            err.to_string(),
            "query parameter 'page': 'minLength' at # does not apply to integer schemas"
        );
    }

    #[test]
    fn test_input_error_display() {
        let err = InputError::UnknownLocation {
            name: "session".to_string(),
            source: UnknownLocationError("cookie".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "parameter 'session': unknown parameter location 'cookie' (expected path, query, header or body)"
        );
    }
}
