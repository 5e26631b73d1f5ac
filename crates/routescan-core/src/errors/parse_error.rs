//! Errors from tree-sitter parsing.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("unsupported file extension: {extension}")]
    UnsupportedLanguage { extension: String },

    #[error("tree-sitter grammar unavailable for {language}")]
    GrammarNotFound { language: String },

    #[error("tree-sitter failed on {path:?}: {message}")]
    TreeSitter { path: PathBuf, message: String },

    #[error("{path:?} is not valid UTF-8")]
    InvalidUtf8 { path: PathBuf },
}
