//! Code generator module.
//!
//! This module holds the generator configuration and the Zod backend that
//! turns schema nodes and parameter lists into TypeScript source.

pub mod config;
pub mod zod;

pub use config::{GeneratorConfig, IndentStyle, LineEnding};
