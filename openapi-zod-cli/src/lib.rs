//! # openapi-zod-cli
//!
//! CLI library for generating TypeScript Zod request schemas from OpenAPI
//! documents.
//!
//! ## Architecture
//!
//! - [`config`] - Configuration management and TOML parsing
//! - [`loader`] - JSON / YAML document loading
//! - [`generator`] - Module generation using openapi-zod
//! - [`writer`] - File output and dry-run support
//! - [`error`] - Error types and handling

pub mod config;
pub mod error;
pub mod generator;
pub mod loader;
pub mod writer;

// Re-export main types for convenience
pub use config::{Config, ConfigManager};
pub use error::{CliError, CliResult};
pub use generator::SchemaGenerator;
pub use loader::load_document;
pub use writer::FileWriter;
