//! Error types for configuration loading and typed access.
//!
//! Absence is never an error: a missing path surfaces as `None` from the
//! accessors. Errors only come from unparseable coercions and from the
//! file collaborators, whose errors are carried unmodified as the source.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by [`ConfigStore`](crate::ConfigStore) operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A value is present but cannot be coerced to the requested type.
    #[error("cannot parse value {value} at '{path}' as integer: {reason}")]
    Parse {
        path: String,
        value: String,
        reason: String,
    },

    #[error("failed to read config file {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse JSON config file {}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse YAML config file {}", .path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The file extension does not map to a known format.
    #[error("unsupported config file format: {} (expected .json, .yaml or .yml)", .path.display())]
    UnsupportedFormat { path: PathBuf },

    /// A top-level source was not a mapping.
    #[error("expected a mapping at the top level, found {found}")]
    NotAMapping { found: &'static str },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl ConfigError {
    pub(crate) fn parse(path: &str, value: impl ToString, reason: impl Into<String>) -> Self {
        Self::Parse {
            path: path.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Check whether this error came from reading or parsing a file.
    pub fn is_source_error(&self) -> bool {
        matches!(
            self,
            ConfigError::Io { .. }
                | ConfigError::Json { .. }
                | ConfigError::Yaml { .. }
                | ConfigError::UnsupportedFormat { .. }
        )
    }
}

/// Result type for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_message() {
        let err = ConfigError::parse("server.port", "'abc'", "invalid digit found in string");
        assert_eq!(
            err.to_string(),
            "cannot parse value 'abc' at 'server.port' as integer: invalid digit found in string"
        );
        assert!(!err.is_source_error());
    }

    #[test]
    fn test_io_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = ConfigError::io("/tmp/nope.json", io);
        assert!(err.is_source_error());
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "missing");
    }
}
