//! Zod expression builders.
//!
//! [`ZodExpr`] assembles one Zod expression from a base call plus chained
//! modifiers. Modifier order is fixed by [`ZodExpr::build`]: kind constraints
//! first, then `.nullable()`, then `.optional()`, no matter in which order
//! the builder methods were called.
//!
//! Output is compact (no whitespace between entries); formatting is left to
//! downstream tooling.

use indexmap::IndexMap;
use std::fmt;

use crate::ir::schema::quote_js_string;
use crate::ir::{Literal, ValidationRule};

/// Builder for a single Zod expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZodExpr {
    /// Base expression (e.g. `z.string()`, `z.array(...)`)
    base: String,

    /// Chained constraint calls (e.g. `.min(1)`)
    constraints: Vec<String>,

    nullable: bool,
    optional: bool,
}

impl ZodExpr {
    /// Wrap an already generated expression.
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            constraints: Vec::new(),
            nullable: false,
            optional: false,
        }
    }

    // =========================================================================
    // Primitives
    // =========================================================================

    pub fn string() -> Self {
        Self::new("z.string()")
    }

    pub fn number() -> Self {
        Self::new("z.number()")
    }

    pub fn integer() -> Self {
        Self::new("z.number().int()")
    }

    pub fn boolean() -> Self {
        Self::new("z.boolean()")
    }

    pub fn null() -> Self {
        Self::new("z.null()")
    }

    pub fn unknown() -> Self {
        Self::new("z.unknown()")
    }

    // =========================================================================
    // Compound
    // =========================================================================

    /// `z.object({key:value,...})` in the iteration order of `entries`.
    pub fn object(entries: &IndexMap<String, String>) -> Self {
        let fields: Vec<String> = entries
            .iter()
            .map(|(key, value)| format!("{}:{}", object_key(key), value))
            .collect();
        Self::new(format!("z.object({{{}}})", fields.join(",")))
    }

    /// `z.record(z.string(),value)` for objects with only dynamic keys.
    pub fn record(value: &str) -> Self {
        Self::new(format!("z.record(z.string(),{})", value))
    }

    /// `z.array(element)`.
    pub fn array(element: &str) -> Self {
        Self::new(format!("z.array({})", element))
    }

    /// Closed set of literals.
    ///
    /// All-string sets use `z.enum`, a single non-string literal collapses to
    /// `z.literal`, anything else becomes a union of literals. `values` must
    /// not be empty.
    pub fn enumeration(values: &[Literal]) -> Self {
        if values.iter().all(Literal::is_string) {
            let items: Vec<String> = values.iter().map(Literal::to_js).collect();
            return Self::new(format!("z.enum([{}])", items.join(",")));
        }

        let literals: Vec<String> = values
            .iter()
            .map(|value| format!("z.literal({})", value.to_js()))
            .collect();
        Self::union(literals)
    }

    // =========================================================================
    // Composite
    // =========================================================================

    /// `z.union([a,b])`; a single branch collapses to itself.
    pub fn union(branches: Vec<String>) -> Self {
        if branches.len() == 1 {
            return Self::new(branches.into_iter().collect::<String>());
        }
        Self::new(format!("z.union([{}])", branches.join(",")))
    }

    /// `a.and(b).and(c)`; a single branch collapses to itself.
    pub fn intersection(branches: Vec<String>) -> Self {
        let mut iter = branches.into_iter();
        let mut result = iter.next().unwrap_or_default();
        for branch in iter {
            result = format!("{}.and({})", result, branch);
        }
        Self::new(result)
    }

    /// Validate as `source`, convert to a number, re-validate as `target`.
    pub fn coercion(source: &str, target: &str) -> Self {
        Self::new(format!("{}.transform(Number).pipe({})", source, target))
    }

    // =========================================================================
    // Modifiers
    // =========================================================================

    /// Chain a raw method call such as `.strict()`.
    pub fn method(mut self, call: impl Into<String>) -> Self {
        self.constraints.push(call.into());
        self
    }

    /// Chain the method call for a validation rule.
    pub fn rule(self, rule: &ValidationRule) -> Self {
        let call = match rule {
            ValidationRule::MinLength(n) | ValidationRule::MinItems(n) => format!(".min({})", n),
            ValidationRule::MaxLength(n) | ValidationRule::MaxItems(n) => format!(".max({})", n),
            ValidationRule::Pattern(pattern) => {
                format!(".regex(new RegExp({}))", quote_js_string(pattern))
            }
            ValidationRule::Email => ".email()".to_string(),
            ValidationRule::Url => ".url()".to_string(),
            ValidationRule::Uuid => ".uuid()".to_string(),
            ValidationRule::Datetime => ".datetime()".to_string(),
            ValidationRule::Date => ".date()".to_string(),
            ValidationRule::Time => ".time()".to_string(),
            ValidationRule::Ipv4 => ".ip({version:\"v4\"})".to_string(),
            ValidationRule::Ipv6 => ".ip({version:\"v6\"})".to_string(),
            ValidationRule::Min(n) => format!(".min({})", n),
            ValidationRule::Max(n) => format!(".max({})", n),
            ValidationRule::GreaterThan(n) => format!(".gt({})", n),
            ValidationRule::LessThan(n) => format!(".lt({})", n),
            ValidationRule::MultipleOf(n) => format!(".multipleOf({})", n),
        };
        self.method(call)
    }

    /// Accept `null` when `nullable` is true.
    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable |= nullable;
        self
    }

    /// Accept a missing value when `optional` is true.
    pub fn optional(mut self, optional: bool) -> Self {
        self.optional |= optional;
        self
    }

    /// Render the expression.
    pub fn build(self) -> String {
        let mut result = self.base;
        for call in &self.constraints {
            result.push_str(call);
        }
        if self.nullable {
            result.push_str(".nullable()");
        }
        if self.optional {
            result.push_str(".optional()");
        }
        result
    }
}

impl fmt::Display for ZodExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.clone().build())
    }
}

impl From<ZodExpr> for String {
    fn from(expr: ZodExpr) -> Self {
        expr.build()
    }
}

/// Build an object expression from already generated property expressions.
pub fn generate_zod_object_schema(properties: &IndexMap<String, String>) -> String {
    ZodExpr::object(properties).build()
}

/// Wrap `target` so that values arriving as `source` are parsed first.
pub fn generate_zod_coercion(source: &str, target: &str) -> String {
    ZodExpr::coercion(source, target).build()
}

/// Render an object key, quoting it unless it is a plain identifier.
fn object_key(key: &str) -> String {
    if is_identifier(key) {
        key.to_string()
    } else {
        quote_js_string(key)
    }
}

fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '$' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    }
}
