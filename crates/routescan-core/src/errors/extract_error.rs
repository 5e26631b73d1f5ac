//! Top-level extractor error: anything that can abort a parse invocation.
//!
//! Per-file failures never surface here; they are logged and skipped. Only
//! caller contract violations (bad root, bad options) abort.

use thiserror::Error;

use super::{ConfigError, ParseError, ScanError};

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
