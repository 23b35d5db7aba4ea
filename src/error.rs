//! Application error types using thiserror
//!
//! Error hierarchy:
//! - ManifestError: Issues with reading or parsing build manifests
//! - CoordinateError: Malformed `group:name:version` strings
//! - RegistryError: Issues with remote repository / search API communication
//! - CheckpointError: Failures persisting or loading coordinate lists
//! - ConfigError: Issues with configuration files and CLI values
//! - VerifyError: Batch verification aborted

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Manifest file related errors
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Remote registry related errors
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Checkpoint / list file errors
    #[error(transparent)]
    Checkpoint(#[from] CheckpointError),

    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Batch verification errors
    #[error(transparent)]
    Verify(#[from] VerifyError),
}

/// Errors related to manifest file operations
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Failed to read manifest file
    #[error("failed to read manifest file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// XML parsing error (for pom.xml)
    #[error("failed to parse XML in {path}: {message}")]
    XmlParse { path: PathBuf, message: String },

    /// Manifest root directory does not exist
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },
}

/// Errors related to coordinate strings
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoordinateError {
    /// Fewer than `group:name:version` segments
    #[error("invalid coordinate '{coordinate}': expected group:name:version, found {found} segment(s)")]
    TooFewSegments { coordinate: String, found: usize },

    /// A required segment is blank
    #[error("invalid coordinate '{coordinate}': empty segment")]
    EmptySegment { coordinate: String },
}

/// Errors related to remote repository and search API communication
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Resource not found
    #[error("'{resource}' not found in {registry}")]
    NotFound { resource: String, registry: String },

    /// Network request failed
    #[error("request to {registry} failed for '{resource}': {message}")]
    NetworkError {
        resource: String,
        registry: String,
        message: String,
    },

    /// Rate limit exceeded
    #[error("rate limit exceeded for {registry}")]
    RateLimitExceeded { registry: String },

    /// Invalid response from registry
    #[error("invalid response from {registry} for '{resource}': {message}")]
    InvalidResponse {
        resource: String,
        registry: String,
        message: String,
    },

    /// Timeout
    #[error("timeout while requesting '{resource}' from {registry}")]
    Timeout { resource: String, registry: String },

    /// Authentication error
    #[error("authentication failed for {registry}: {message}")]
    AuthenticationError { registry: String, message: String },
}

/// Errors related to checkpoint and list files
#[derive(Error, Debug)]
pub enum CheckpointError {
    /// Failed to read a list file
    #[error("failed to read list file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a list file
    #[error("failed to write list file {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse a JSON input file
    #[error("failed to parse JSON in {path}: {message}")]
    JsonParse { path: PathBuf, message: String },
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read configuration file
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error
    #[error("failed to parse config file {path}: {message}")]
    TomlParse { path: PathBuf, message: String },

    /// Invalid value
    #[error("invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Errors that abort a verification run
#[derive(Error, Debug)]
pub enum VerifyError {
    /// Checkpoint persistence failed
    #[error(transparent)]
    Checkpoint(#[from] CheckpointError),

    /// The configured pass limit was reached with work remaining
    #[error("pass limit of {passes} reached with {remaining} coordinate(s) unverified")]
    PassLimitReached { passes: u32, remaining: usize },
}

impl ManifestError {
    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new XmlParse error
    pub fn xml_parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ManifestError::XmlParse {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl RegistryError {
    /// Creates a new NotFound error
    pub fn not_found(resource: impl Into<String>, registry: impl Into<String>) -> Self {
        RegistryError::NotFound {
            resource: resource.into(),
            registry: registry.into(),
        }
    }

    /// Creates a new NetworkError
    pub fn network_error(
        resource: impl Into<String>,
        registry: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RegistryError::NetworkError {
            resource: resource.into(),
            registry: registry.into(),
            message: message.into(),
        }
    }

    /// Creates a new RateLimitExceeded error
    pub fn rate_limit_exceeded(registry: impl Into<String>) -> Self {
        RegistryError::RateLimitExceeded {
            registry: registry.into(),
        }
    }

    /// Creates a new Timeout error
    pub fn timeout(resource: impl Into<String>, registry: impl Into<String>) -> Self {
        RegistryError::Timeout {
            resource: resource.into(),
            registry: registry.into(),
        }
    }

    /// Returns true if waiting and retrying may succeed
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, RegistryError::RateLimitExceeded { .. })
    }
}

impl CheckpointError {
    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CheckpointError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new WriteError
    pub fn write_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CheckpointError::WriteError {
            path: path.into(),
            source,
        }
    }
}
