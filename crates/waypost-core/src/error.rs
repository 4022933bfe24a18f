//! Error types for the Waypost core library.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using `CoreError`.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error types for Waypost.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration loading or parsing error.
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Frontmatter parsing error.
    #[error("Frontmatter error in {path}: {message}")]
    Frontmatter { path: PathBuf, message: String },

    /// Redirect table construction or lookup error.
    #[error("Redirect error: {0}")]
    Redirect(#[from] RedirectError),

    /// File system I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic configuration crate error.
    #[error("Config crate error: {0}")]
    ConfigCrate(#[from] config::ConfigError),
}

/// Errors raised while building or querying a redirect table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RedirectError {
    /// No rule is defined for the requested source route.
    #[error("no redirect defined for {route}")]
    UnmappedRoute { route: String },

    /// A rule points back at its own source.
    #[error("redirect from {route} points at itself")]
    SelfRedirect { route: String },

    /// Following targets from this route eventually returns to it.
    #[error("redirect chain starting at {route} loops back on itself")]
    Cycle { route: String },

    /// The same source route is defined more than once.
    #[error("duplicate redirect source {route}")]
    DuplicateSource { route: String },

    /// A route is not a usable absolute path.
    #[error("invalid route {route:?}: {reason}")]
    InvalidRoute { route: String, reason: &'static str },
}

impl RedirectError {
    /// Whether the error means "nothing to do here" rather than broken configuration.
    pub fn is_unmapped(&self) -> bool {
        matches!(self, Self::UnmappedRoute { .. })
    }
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

    /// Create a new frontmatter error.
    pub fn frontmatter(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Frontmatter {
            path: path.into(),
            message: message.into(),
        }
    }
}
