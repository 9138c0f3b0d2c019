//! Generator configuration.
//!
//! Controls how routes are rendered into a TypeScript module: indentation,
//! line endings, naming of the exported constants and the Zod import.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Generator configuration options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Indentation style
    pub indent: IndentStyle,

    /// Line ending style
    pub line_ending: LineEnding,

    /// Suffix appended to route names (`getUser` -> `getUserSchema`)
    pub schema_suffix: String,

    /// Module specifier in `import { z } from "..."`
    pub zod_import: String,

    /// Whether to emit a `/** GET /path */` comment above each route
    pub generate_docs: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            indent: IndentStyle::default(),
            line_ending: LineEnding::default(),
            schema_suffix: "Schema".to_string(),
            zod_import: "zod".to_string(),
            generate_docs: true,
        }
    }
}

impl GeneratorConfig {
    /// Create a new generator config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the indentation style.
    pub fn with_indent(mut self, indent: IndentStyle) -> Self {
        self.indent = indent;
        self
    }

    /// Set the line ending style.
    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    /// Set the suffix for exported constants.
    pub fn with_schema_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.schema_suffix = suffix.into();
        self
    }

    /// Set the Zod module specifier.
    pub fn with_zod_import(mut self, module: impl Into<String>) -> Self {
        self.zod_import = module.into();
        self
    }

    /// Set whether to generate route comments.
    pub fn with_generate_docs(mut self, generate: bool) -> Self {
        self.generate_docs = generate;
        self
    }

    pub fn indent_str(&self) -> &str {
        self.indent.as_str()
    }

    pub fn line_ending_str(&self) -> &str {
        self.line_ending.as_str()
    }
}

/// Indentation style for generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndentStyle {
    /// Two spaces
    #[default]
    Spaces2,

    /// Four spaces
    Spaces4,

    Tabs,
}

impl IndentStyle {
    /// Get the indentation string.
    pub fn as_str(&self) -> &str {
        match self {
            IndentStyle::Spaces2 => "  ",
            IndentStyle::Spaces4 => "    ",
            IndentStyle::Tabs => "\t",
        }
    }

    /// Name used in configuration files.
    pub fn name(&self) -> &'static str {
        match self {
            IndentStyle::Spaces2 => "spaces2",
            IndentStyle::Spaces4 => "spaces4",
            IndentStyle::Tabs => "tabs",
        }
    }
}

impl fmt::Display for IndentStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for IndentStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "spaces2" | "2" => Ok(IndentStyle::Spaces2),
            "spaces4" | "4" => Ok(IndentStyle::Spaces4),
            "tabs" | "tab" => Ok(IndentStyle::Tabs),
            other => Err(format!(
                "unknown indent style '{}' (expected spaces2, spaces4 or tabs)",
                other
            )),
        }
    }
}

/// Line ending style for generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    /// Unix-style line endings (LF)
    #[default]
    Lf,

    /// Windows-style line endings (CRLF)
    CrLf,
}

impl LineEnding {
    /// Get the line ending string.
    pub fn as_str(&self) -> &str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}
