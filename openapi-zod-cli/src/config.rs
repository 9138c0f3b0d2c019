//! Configuration management for the CLI.
//!
//! This module handles loading configuration from `openapi-zod.toml` files
//! and merging with command-line arguments.

use crate::error::{CliResult, ConfigError};
use openapi_zod::generator::{GeneratorConfig, IndentStyle, LineEnding};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default configuration filename.
pub const CONFIG_FILENAME: &str = "openapi-zod.toml";

/// Main configuration structure.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output configuration.
    pub output: OutputConfig,

    /// Naming conventions.
    pub naming: NamingConfig,

    /// Code generation options.
    pub generator: GeneratorSection,
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output directory for generated files.
    pub dir: PathBuf,

    /// Output filename.
    pub file: String,
}

/// Naming convention configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    /// Suffix for exported route constants.
    pub schema_suffix: String,
}

/// Code generation options.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GeneratorSection {
    /// Module the `z` import is taken from.
    pub zod_import: String,

    /// Whether to emit a comment above each route.
    pub generate_docs: bool,

    /// Indentation of route members.
    pub indent: IndentStyle,

    /// Line ending of the generated file.
    pub line_ending: LineEnding,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./generated"),
            file: "schemas.ts".to_string(),
        }
    }
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            schema_suffix: "Schema".to_string(),
        }
    }
}

impl Default for GeneratorSection {
    fn default() -> Self {
        Self {
            zod_import: "zod".to_string(),
            generate_docs: true,
            indent: IndentStyle::default(),
            line_ending: LineEnding::default(),
        }
    }
}

impl Config {
    /// Full path of the generated file.
    pub fn output_path(&self) -> PathBuf {
        self.output.dir.join(&self.output.file)
    }

    /// Options for the route emitter.
    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig::new()
            .with_indent(self.generator.indent)
            .with_line_ending(self.generator.line_ending)
            .with_schema_suffix(self.naming.schema_suffix.clone())
            .with_zod_import(self.generator.zod_import.clone())
            .with_generate_docs(self.generator.generate_docs)
    }
}

/// Configuration manager for loading and merging configs.
pub struct ConfigManager;

impl ConfigManager {
    /// Load configuration from a file path.
    ///
    /// If the path is None, attempts to load from the default location.
    /// If no config file exists, returns default configuration.
    pub fn load(path: Option<&Path>) -> CliResult<Config> {
        let config_path = path
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME));

        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
            path: config_path.clone(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| ConfigError::invalid_toml(config_path.clone(), e.to_string()))?;

        tracing::info!(path = %config_path.display(), "loaded configuration");
        Ok(config)
    }

    /// Merge CLI arguments into configuration.
    ///
    /// CLI arguments take precedence over config file values.
    pub fn merge_cli_args(mut config: Config, args: &CliArgs) -> Config {
        if let Some(ref output) = args.output {
            config.output.dir = output.clone();
        }

        if let Some(ref file) = args.output_file {
            config.output.file = file.clone();
        }

        if let Some(ref suffix) = args.schema_suffix {
            config.naming.schema_suffix = suffix.clone();
        }

        if let Some(ref zod_import) = args.zod_import {
            config.generator.zod_import = zod_import.clone();
        }

        if let Some(generate_docs) = args.generate_docs {
            config.generator.generate_docs = generate_docs;
        }

        config
    }

    /// Generate default configuration file content with comments.
    pub fn default_config_content() -> &'static str {
        r#"# openapi-zod configuration file

[output]
# Output directory for generated TypeScript files
dir = "./generated"

# Output file name
file = "schemas.ts"

[naming]
# Suffix appended to each route name (e.g., getUserSchema)
schema_suffix = "Schema"

[generator]
# Module specifier used in `import { z } from "..."`
zod_import = "zod"

# Whether to emit a /** GET /path */ comment above each route
generate_docs = true

# Indentation of route members (spaces2, spaces4, tabs)
indent = "spaces2"

# Line ending of the generated file (lf, crlf)
line_ending = "lf"
"#
    }
}

/// CLI arguments that can override configuration.
#[derive(Debug, Default)]
pub struct CliArgs {
    /// Output directory override.
    pub output: Option<PathBuf>,

    /// Output filename override.
    pub output_file: Option<String>,

    /// Schema suffix override.
    pub schema_suffix: Option<String>,

    /// Zod import override.
    pub zod_import: Option<String>,

    /// Generate docs override.
    pub generate_docs: Option<bool>,
}
