//! Error types for devbuild
//!
//! All modules use `DevBuildResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for devbuild operations
pub type DevBuildResult<T> = Result<T, DevBuildError>;

/// All errors that can occur in devbuild
#[derive(Error, Debug)]
pub enum DevBuildError {
    // Configuration errors
    #[error("Malformed configuration at {path}: {reason}")]
    MalformedConfig { path: PathBuf, reason: String },

    #[error(
        "No production configuration for platform prefix `{key}`, \
         please add to `{config_file}` if needed"
    )]
    ConfigurationMissing { key: String, config_file: String },

    #[error("No builder registered for class `{class}` (platform prefix `{key}`)")]
    UnknownProductClass { class: String, key: String },

    // Layout errors
    #[error("Output directory not found: {0}")]
    OutputDirMissing(PathBuf),

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DevBuildError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a malformed configuration error
    pub fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::MalformedConfig {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Check if the failed operation may succeed after the user fixes something
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ConfigurationMissing { .. })
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::ConfigurationMissing { .. } => {
                Some("Add a `products` entry with `modules` and `class`, then rerun")
            }
            Self::OutputDirMissing(_) => Some("Compile the project first so module output exists"),
            Self::MalformedConfig { .. } => {
                Some("Every product needs a `modules` list and a `class` string")
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_missing_names_key_and_file() {
        let err = DevBuildError::ConfigurationMissing {
            key: "PyCharmCore".to_string(),
            config_file: "dev-build-server.json".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("`PyCharmCore`"));
        assert!(message.contains("dev-build-server.json"));
    }

    #[test]
    fn error_hint() {
        let err = DevBuildError::OutputDirMissing(PathBuf::from("/tmp/out"));
        assert_eq!(
            err.hint(),
            Some("Compile the project first so module output exists")
        );
        assert!(DevBuildError::Json(serde_json::from_str::<u8>("x").unwrap_err())
            .hint()
            .is_none());
    }

    #[test]
    fn error_retryable() {
        let missing = DevBuildError::ConfigurationMissing {
            key: "B".to_string(),
            config_file: "dev-build-server.json".to_string(),
        };
        assert!(missing.is_retryable());
        assert!(!DevBuildError::malformed("x.json", "bad").is_retryable());
    }
}
