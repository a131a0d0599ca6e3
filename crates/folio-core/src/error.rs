//! Error types for the folio core library.

use std::path::PathBuf;

use thiserror::Error;

use crate::schema::SchemaErrors;

/// Result type alias using `CoreError`.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error types for folio.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration loading or parsing error.
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Front matter block could not be read as YAML/TOML.
    #[error("Front matter error in {path}: {message}")]
    Frontmatter { path: PathBuf, message: String },

    /// Record failed schema validation; carries every failed field.
    #[error("Schema error in {path}: {errors}")]
    Schema { path: PathBuf, errors: SchemaErrors },

    /// File system I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// YAML parsing error.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Generic configuration crate error.
    #[error("Config crate error: {0}")]
    ConfigCrate(#[from] config::ConfigError),
}

impl CoreError {
    /// Create a new configuration error with a message.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source.
    pub fn config_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new front matter error.
    pub fn frontmatter(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Frontmatter {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a new schema error.
    pub fn schema(path: impl Into<PathBuf>, errors: SchemaErrors) -> Self {
        Self::Schema {
            path: path.into(),
            errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::schema::FieldError;

    use super::*;

    #[test]
    fn test_config_error() {
        let err = CoreError::config("missing field");
        assert!(err.to_string().contains("Configuration error"));
        assert!(err.to_string().contains("missing field"));
    }

    #[test]
    fn test_frontmatter_error() {
        let err = CoreError::frontmatter("content/post/a.md", "unclosed block");
        assert!(err.to_string().contains("Front matter error"));
        assert!(err.to_string().contains("content/post/a.md"));
    }

    #[test]
    fn test_schema_error_lists_fields() {
        let errors = SchemaErrors::from(vec![
            FieldError::new("title", "string of at most 60 characters", "(72 characters)"),
            FieldError::new("description", "string", "(missing)"),
        ]);
        let err = CoreError::schema("content/post/a.md", errors);
        let msg = err.to_string();
        assert!(msg.contains("title"));
        assert!(msg.contains("description"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: CoreError = io_err.into();
        assert!(err.to_string().contains("IO error"));
    }
}
