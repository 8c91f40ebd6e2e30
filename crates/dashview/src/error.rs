//! Error types for the view controller.

use std::path::PathBuf;

use dashview_core::TreeError;

/// Result type alias for view operations.
pub type ViewResult<T> = std::result::Result<T, ViewError>;

/// Errors that can occur while configuring or updating a view.
#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    /// The element host rejected an operation (stale or foreign element).
    #[error("element tree error: {0}")]
    Tree(#[from] TreeError),

    /// The view configuration is not valid JSON for the expected shape.
    #[error("invalid view config JSON: {0}")]
    ConfigJson(#[from] serde_json::Error),

    /// The view configuration is not valid TOML for the expected shape.
    #[error("invalid view config TOML: {0}")]
    ConfigToml(#[from] toml::de::Error),

    /// The configuration file could not be read.
    #[error("failed to read view config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file extension is not a known format.
    #[error("unsupported view config format for '{path}'")]
    UnknownFormat { path: PathBuf },
}

impl ViewError {
    /// Create an I/O error for a configuration path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
