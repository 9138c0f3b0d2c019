//! Validation rule IR definitions.
//!
//! Validation rules are the constraint keywords of a schema node
//! (`minLength`, `format`, `minimum`, ...). They are transformed into chained
//! method calls in the generated schema code.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::schema::SchemaKind;

/// Validation rule for schema nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", content = "value")]
pub enum ValidationRule {
    // ==========================================================================
    // String Validations
    // ==========================================================================
    /// Minimum string length: `.min(n)`
    MinLength(u64),

    /// Maximum string length: `.max(n)`
    MaxLength(u64),

    /// Regex pattern: `.regex(new RegExp("pattern"))`
    Pattern(String),

    /// Email format: `.email()`
    Email,

    /// URL format: `.url()`
    Url,

    /// UUID format: `.uuid()`
    Uuid,

    /// ISO datetime format: `.datetime()`
    Datetime,

    /// ISO date format: `.date()`
    Date,

    /// ISO time format: `.time()`
    Time,

    /// IPv4 address format: `.ip({version:"v4"})`
    Ipv4,

    /// IPv6 address format: `.ip({version:"v6"})`
    Ipv6,

    // ==========================================================================
    // Number Validations
    // ==========================================================================
    /// Minimum value: `.min(n)`
    Min(f64),

    /// Maximum value: `.max(n)`
    Max(f64),

    /// Greater than: `.gt(n)`
    GreaterThan(f64),

    /// Less than: `.lt(n)`
    LessThan(f64),

    /// Multiple of: `.multipleOf(n)`
    MultipleOf(f64),

    // ==========================================================================
    // Array Validations
    // ==========================================================================
    /// Minimum array length: `.min(n)`
    MinItems(u64),

    /// Maximum array length: `.max(n)`
    MaxItems(u64),
}

impl ValidationRule {
    /// Check if this is a string validation rule.
    pub fn is_string_validation(&self) -> bool {
        matches!(
            self,
            ValidationRule::MinLength(_)
                | ValidationRule::MaxLength(_)
                | ValidationRule::Pattern(_)
                | ValidationRule::Email
                | ValidationRule::Url
                | ValidationRule::Uuid
                | ValidationRule::Datetime
                | ValidationRule::Date
                | ValidationRule::Time
                | ValidationRule::Ipv4
                | ValidationRule::Ipv6
        )
    }

    /// Check if this is a number validation rule.
    pub fn is_number_validation(&self) -> bool {
        matches!(
            self,
            ValidationRule::Min(_)
                | ValidationRule::Max(_)
                | ValidationRule::GreaterThan(_)
                | ValidationRule::LessThan(_)
                | ValidationRule::MultipleOf(_)
        )
    }

    /// Check if this is an array validation rule.
    pub fn is_array_validation(&self) -> bool {
        matches!(self, ValidationRule::MinItems(_) | ValidationRule::MaxItems(_))
    }

    /// Check whether the rule can be chained onto a schema of `kind`.
    pub fn applies_to(&self, kind: &SchemaKind) -> bool {
        match kind {
            SchemaKind::String => self.is_string_validation(),
            SchemaKind::Number | SchemaKind::Integer => self.is_number_validation(),
            SchemaKind::Array(_) => self.is_array_validation(),
            _ => false,
        }
    }

    /// Map an OpenAPI string `format` to a rule.
    ///
    /// Returns `None` for formats Zod has no validator for; those are
    /// annotations only.
    pub fn from_format(format: &str) -> Option<Self> {
        match format {
            "email" => Some(ValidationRule::Email),
            "uri" | "url" => Some(ValidationRule::Url),
            "uuid" => Some(ValidationRule::Uuid),
            "date-time" => Some(ValidationRule::Datetime),
            "date" => Some(ValidationRule::Date),
            "time" => Some(ValidationRule::Time),
            "ipv4" => Some(ValidationRule::Ipv4),
            "ipv6" => Some(ValidationRule::Ipv6),
            _ => None,
        }
    }

    /// OpenAPI keyword this rule was read from.
    pub fn keyword(&self) -> &'static str {
        match self {
            ValidationRule::MinLength(_) => "minLength",
            ValidationRule::MaxLength(_) => "maxLength",
            ValidationRule::Pattern(_) => "pattern",
            ValidationRule::Email
            | ValidationRule::Url
            | ValidationRule::Uuid
            | ValidationRule::Datetime
            | ValidationRule::Date
            | ValidationRule::Time
            | ValidationRule::Ipv4
            | ValidationRule::Ipv6 => "format",
            ValidationRule::Min(_) => "minimum",
            ValidationRule::Max(_) => "maximum",
            ValidationRule::GreaterThan(_) => "exclusiveMinimum",
            ValidationRule::LessThan(_) => "exclusiveMaximum",
            ValidationRule::MultipleOf(_) => "multipleOf",
            ValidationRule::MinItems(_) => "minItems",
            ValidationRule::MaxItems(_) => "maxItems",
        }
    }
}

impl fmt::Display for ValidationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::SchemaNode;

    #[test]
    fn test_string_validations() {
        assert!(ValidationRule::Email.is_string_validation());
        assert!(ValidationRule::Url.is_string_validation());
        assert!(ValidationRule::MinLength(1).is_string_validation());
        assert!(ValidationRule::Pattern(".*".to_string()).is_string_validation());
    }

    #[test]
    fn test_number_validations() {
        assert!(ValidationRule::Min(0.0).is_number_validation());
        assert!(ValidationRule::LessThan(10.0).is_number_validation());
        assert!(ValidationRule::MultipleOf(2.0).is_number_validation());
    }

    #[test]
    fn test_validation_categories_are_exclusive() {
        assert!(!ValidationRule::Email.is_number_validation());
        assert!(!ValidationRule::Email.is_array_validation());
        assert!(!ValidationRule::Min(1.0).is_string_validation());
        assert!(!ValidationRule::MinItems(1).is_string_validation());
        assert!(!ValidationRule::MinItems(1).is_number_validation());
    }

    #[test]
    fn test_applies_to() {
        assert!(ValidationRule::Email.applies_to(&SchemaKind::String));
        assert!(ValidationRule::Min(1.0).applies_to(&SchemaKind::Integer));
        assert!(ValidationRule::MaxItems(3)
            .applies_to(&SchemaKind::Array(Box::new(SchemaNode::string()))));
        assert!(!ValidationRule::MinLength(1).applies_to(&SchemaKind::Number));
        assert!(!ValidationRule::Min(1.0).applies_to(&SchemaKind::Boolean));
        assert!(!ValidationRule::Email.applies_to(&SchemaKind::Enum(vec![])));
    }

    #[test]
    fn test_from_format() {
        assert_eq!(ValidationRule::from_format("email"), Some(ValidationRule::Email));
        assert_eq!(ValidationRule::from_format("uri"), Some(ValidationRule::Url));
        assert_eq!(
            ValidationRule::from_format("date-time"),
            Some(ValidationRule::Datetime)
        );
        assert_eq!(ValidationRule::from_format("password"), None);
        assert_eq!(ValidationRule::from_format("int64"), None);
    }
}
