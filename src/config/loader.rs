//! Reading configuration layers from JSON and YAML files.

use super::store::ConfigStore;
use crate::error::{ConfigError, ConfigResult};
use std::path::Path;
use tracing::debug;

/// File formats a layer can be read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Yaml,
}

impl FileFormat {
    /// Detect the format from a file extension (`.json`, `.yaml`, `.yml`).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(FileFormat::Json),
            "yaml" | "yml" => Some(FileFormat::Yaml),
            _ => None,
        }
    }
}

impl std::fmt::Display for FileFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileFormat::Json => write!(f, "json"),
            FileFormat::Yaml => write!(f, "yaml"),
        }
    }
}

/// Parse JSON text into a store. The top level must be an object.
pub fn parse_json(content: &str) -> serde_json::Result<ConfigStore> {
    serde_json::from_str(content)
}

/// Parse YAML text into a store.
///
/// An empty document is an empty store; any other top level must be a mapping.
pub fn parse_yaml(content: &str) -> Result<ConfigStore, serde_yaml::Error> {
    if content.trim().is_empty() {
        return Ok(ConfigStore::new());
    }
    let parsed: Option<ConfigStore> = serde_yaml::from_str(content)?;
    Ok(parsed.unwrap_or_default())
}

fn read_to_string(path: &Path) -> ConfigResult<String> {
    std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))
}

/// Load a JSON file as a store.
pub fn load_json_file(path: &Path) -> ConfigResult<ConfigStore> {
    let content = read_to_string(path)?;
    let store = parse_json(&content).map_err(|source| ConfigError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), keys = store.len(), "loaded json config layer");
    Ok(store)
}

/// Load a YAML file as a store.
pub fn load_yaml_file(path: &Path) -> ConfigResult<ConfigStore> {
    let content = read_to_string(path)?;
    let store = parse_yaml(&content).map_err(|source| ConfigError::Yaml {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), keys = store.len(), "loaded yaml config layer");
    Ok(store)
}

/// Load a file, picking the parser from its extension.
pub fn load_file(path: &Path) -> ConfigResult<ConfigStore> {
    match FileFormat::from_path(path) {
        Some(FileFormat::Json) => load_json_file(path),
        Some(FileFormat::Yaml) => load_yaml_file(path),
        None => Err(ConfigError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_format_from_path() {
        assert_eq!(FileFormat::from_path(Path::new("a/config.json")), Some(FileFormat::Json));
        assert_eq!(FileFormat::from_path(Path::new("config.YAML")), Some(FileFormat::Yaml));
        assert_eq!(FileFormat::from_path(Path::new("config.yml")), Some(FileFormat::Yaml));
        assert_eq!(FileFormat::from_path(Path::new("config.toml")), None);
        assert_eq!(FileFormat::from_path(Path::new("config")), None);
    }

    #[test]
    fn test_parse_yaml_empty_document() {
        assert!(parse_yaml("").unwrap().is_empty());
        assert!(parse_yaml("\n  \n").unwrap().is_empty());
    }

    #[test]
    fn test_parse_yaml_rejects_sequence() {
        assert!(parse_yaml("- a\n- b\n").is_err());
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let temp = TempDir::new().unwrap();
        let err = load_json_file(&temp.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_load_malformed_json() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.json");
        std::fs::write(&path, "{\"k\": ").unwrap();
        let err = load_json_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Json { .. }));
    }

    #[test]
    fn test_load_file_dispatches_on_extension() {
        let temp = TempDir::new().unwrap();
        let json = temp.path().join("c.json");
        let yaml = temp.path().join("c.yml");
        std::fs::write(&json, r#"{"tag": "json"}"#).unwrap();
        std::fs::write(&yaml, "tag: yaml\n").unwrap();

        assert_eq!(load_file(&json).unwrap().to_string(), "{'tag': 'json'}");
        assert_eq!(load_file(&yaml).unwrap().to_string(), "{'tag': 'yaml'}");

        let other = temp.path().join("c.ini");
        std::fs::write(&other, "tag = ini").unwrap();
        assert!(matches!(
            load_file(&other).unwrap_err(),
            ConfigError::UnsupportedFormat { .. }
        ));
    }
}
