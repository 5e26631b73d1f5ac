//! Scanner output types.

use std::path::PathBuf;

use super::language_detect::Language;

/// A file discovered under the workspace root.
#[derive(Debug, Clone)]
pub struct DiscoveredFile {
    pub path: PathBuf,
    pub file_size: u64,
    /// `None` for files in languages the extractor does not parse.
    pub language: Option<Language>,
}
