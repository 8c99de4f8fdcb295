//! Error types for Gantry

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using GantryError
pub type Result<T> = std::result::Result<T, GantryError>;

/// Main error type for Gantry operations
#[derive(Debug, Error)]
pub enum GantryError {
    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Git-related errors
    #[error(transparent)]
    Git(#[from] GitError),

    /// Version-related errors
    #[error(transparent)]
    Version(#[from] VersionError),

    /// Changelog-related errors
    #[error(transparent)]
    Changelog(#[from] ChangelogError),

    /// Hosting-service errors
    #[error(transparent)]
    Host(#[from] HostError),

    /// Release workflow errors
    #[error(transparent)]
    Release(#[from] ReleaseError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found at {0}")]
    NotFound(PathBuf),

    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {message}")]
    InvalidValue { field: String, message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// IO error
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}

/// Git-related errors
#[derive(Debug, Error)]
pub enum GitError {
    /// Repository not found
    #[error("Git repository not found at {0}")]
    RepositoryNotFound(PathBuf),

    /// Not a git repository
    #[error("Not a git repository: {0}")]
    NotARepository(PathBuf),

    /// Failed to open repository
    #[error("Failed to open repository: {0}")]
    OpenFailed(String),

    /// Remote not found
    #[error("Remote not found: {0}")]
    RemoteNotFound(String),

    /// Git2 library error
    #[error("Git error: {0}")]
    Git2(#[from] git2::Error),
}

/// Version-related errors
#[derive(Debug, Error)]
pub enum VersionError {
    /// The current release tag does not parse as a semantic version.
    ///
    /// Fatal: no commit range can be computed from an invalid tag, so the
    /// whole changelog run aborts.
    #[error("release tag \"{tag}\" is not a valid semantic version: {reason}")]
    InvalidReleaseTag { tag: String, reason: String },
}

/// Changelog-related errors
#[derive(Debug, Error)]
pub enum ChangelogError {
    /// A configured pattern failed to compile
    #[error("invalid pattern \"{pattern}\": {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// Failed to write changelog
    #[error("Failed to write changelog: {0}")]
    WriteFailed(String),
}

/// Errors reported by a release host collaborator
#[derive(Debug, Error)]
pub enum HostError {
    /// A host request failed
    #[error("host request failed during {operation}: {reason}")]
    RequestFailed { operation: String, reason: String },

    /// The host does not support an operation
    #[error("host does not support {0}")]
    Unsupported(String),
}

/// Release workflow errors
#[derive(Debug, Error)]
pub enum ReleaseError {
    /// The supplied ref is not a tag ref
    #[error("\"{0}\" does not appear to be a tag ref")]
    NotATagRef(String),

    /// A release asset does not exist on disk
    #[error("release asset not found at {0}")]
    AssetMissing(PathBuf),
}

impl GantryError {
    /// Create a new "other" error with a message
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Self::Other(msg.into())
    }
}

impl HostError {
    /// Wrap a failure from a named host operation
    pub fn request<E: std::fmt::Display>(operation: &str, err: E) -> Self {
        Self::RequestFailed {
            operation: operation.to_string(),
            reason: err.to_string(),
        }
    }
}
