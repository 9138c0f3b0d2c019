//! OpenAPI document loading.
//!
//! Reads a JSON or YAML document from disk into a [`serde_json::Value`],
//! keeping key order so routes are generated in document order.

use crate::error::{CliResult, LoadError};
use serde_json::Value;
use std::path::Path;

/// Supported document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "json" => Some(DocumentFormat::Json),
            "yaml" | "yml" => Some(DocumentFormat::Yaml),
            _ => None,
        }
    }

    /// Parse document text.
    pub fn parse(&self, path: &Path, content: &str) -> Result<Value, LoadError> {
        match self {
            DocumentFormat::Json => {
                serde_json::from_str(content).map_err(|e| LoadError::InvalidJson {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })
            }
            DocumentFormat::Yaml => {
                serde_yaml::from_str(content).map_err(|e| LoadError::InvalidYaml {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })
            }
        }
    }
}

/// Load an OpenAPI document.
pub fn load_document(path: &Path) -> CliResult<Value> {
    if !path.exists() {
        return Err(LoadError::not_found(path.to_path_buf()).into());
    }

    let format = DocumentFormat::from_path(path).ok_or_else(|| LoadError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;

    let content = std::fs::read_to_string(path).map_err(|e| LoadError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let document = format.parse(path, &content)?;
    tracing::info!(path = %path.display(), ?format, "loaded document");
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            DocumentFormat::from_path(Path::new("api.json")),
            Some(DocumentFormat::Json)
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("api.YML")),
            Some(DocumentFormat::Yaml)
        );
        assert_eq!(DocumentFormat::from_path(Path::new("api.toml")), None);
        assert_eq!(DocumentFormat::from_path(Path::new("api")), None);
    }

    #[test]
    fn test_yaml_keeps_key_order() {
        let yaml = "paths:\n  /b: {}\n  /a: {}\n";
        let value = DocumentFormat::Yaml
            .parse(Path::new("api.yaml"), yaml)
            .unwrap();
        let keys: Vec<_> = value["paths"].as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["/b", "/a"]);
    }

    #[test]
    fn test_load_missing_document() {
        let err = load_document(Path::new("does-not-exist.json")).unwrap_err();
        assert!(matches!(err, CliError::Load(LoadError::NotFound { .. })));
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("api.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = load_document(&path).unwrap_err();
        assert!(matches!(err, CliError::Load(LoadError::InvalidJson { .. })));
    }

    #[test]
    fn test_load_unsupported_format() {
        let dir = TempDir::new().unwrap();
        let path: PathBuf = dir.path().join("api.txt");
        std::fs::write(&path, "openapi: 3.0.0").unwrap();

        let err = load_document(&path).unwrap_err();
        assert!(matches!(err, CliError::Load(LoadError::UnsupportedFormat { .. })));
    }
}
