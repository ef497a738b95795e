//! Error types for configuration loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while resolving the startup configuration.
///
/// All of these are fatal: the refresh loop must not start with a broken
/// configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("missing required environment variable {0}")]
    MissingEnv(&'static str),

    /// A configured panel URL does not have the expected shape.
    #[error("invalid panel URL {url:?}: {reason}")]
    InvalidPanelUrl { url: String, reason: String },

    /// The refresh interval is present but not a whole number of seconds.
    #[error("invalid UPDATE_INTERVAL value {0:?}: expected whole seconds")]
    InvalidInterval(String),

    /// The panel list file could not be read.
    #[error("failed to read panel list {path}: {source}")]
    PanelListRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The panel list file is not a JSON array of URL strings.
    #[error("failed to parse panel list {path}: {source}")]
    PanelListParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The panel list file parsed but contains no panels.
    #[error("panel list {0} contains no panels")]
    NoPanels(PathBuf),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
