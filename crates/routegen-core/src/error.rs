//! Error handling for the route generation library.
//!
//! This module defines the main error type `Error` used throughout the library,
//! along with a convenient `Result` type alias. Configuration problems are
//! reported before any file is touched; I/O errors are passed through as-is.
//!
//! # Examples
//!
//! ```
//! use routegen_core::error::{Error, Result};
//!
//! fn check_dir(exists: bool) -> Result<()> {
//!     if !exists {
//!         return Err(Error::config("routesDir should be a directory"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_dir(false).is_err());
//! ```

use thiserror::Error;

/// Result type for route generation operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for route generation operations
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Metadata error
    #[error("Metadata error: {0}")]
    Metadata(String),

    /// Template engine error
    #[error("Template engine error: {0}")]
    Tera(#[from] tera::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new metadata error
    pub fn metadata<S: Into<String>>(msg: S) -> Self {
        Self::Metadata(msg.into())
    }

    /// True for precondition failures raised before any generation I/O.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}
