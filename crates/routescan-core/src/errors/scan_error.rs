//! Errors from workspace file discovery.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("workspace root does not exist or is not a directory: {path:?}")]
    RootNotFound { path: PathBuf },

    #[error("failed to read {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
