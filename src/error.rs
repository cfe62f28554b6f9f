//! Domain-specific error types for the integration engine.
//!
//! Internal modules return typed errors via [`thiserror`]; command handlers
//! at the CLI boundary convert them to [`anyhow::Error`] with the standard
//! `?` operator and `.with_context(...)` annotations.

use thiserror::Error;

/// Errors that arise from resolving path settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The settings file contains a syntax error that prevents parsing.
    #[error("Invalid TOML syntax in {file}: {message}")]
    InvalidSyntax { file: String, message: String },

    /// An I/O error occurred while reading a settings file.
    #[error("IO error reading settings file {path}: {source}")]
    Io {
        /// Path to the file that could not be read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The user's home directory could not be determined.
    #[error("Cannot determine home directory: {0}")]
    NoHome(String),
}

/// Errors that arise from platform-specific operations.
#[derive(Error, Debug)]
pub enum PlatformError {
    /// The requested operation is not supported on the current platform.
    #[error("Operation not supported on {platform}")]
    Unsupported {
        /// Name of the platform (e.g., `"Windows"`, `"Linux"`).
        platform: String,
    },
}

/// Errors that arise from managed link operations.
#[derive(Error, Debug)]
pub enum LinkError {
    /// A symlink was requested to be present without a source path.
    #[error("Missing source path for link {0}")]
    MissingSource(String),

    /// An I/O error occurred while manipulating a link.
    #[error("Link operation failed for {path}: {source}")]
    Io {
        /// Path of the link that could not be changed.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}
