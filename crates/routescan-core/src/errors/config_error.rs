//! Errors from compiler-config discovery and extractor options.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config {path:?}: {message}")]
    Malformed { path: PathBuf, message: String },

    #[error("invalid router identifier pattern {pattern:?}: {message}")]
    InvalidRouterPattern { pattern: String, message: String },
}
