//! Parser output types.

use std::path::PathBuf;

use tree_sitter::Tree;

use crate::scanner::language_detect::Language;

/// A parsed source file. Cloning is cheap: the tree is reference-counted.
#[derive(Debug, Clone)]
pub struct ParseResult {
    pub file: PathBuf,
    pub language: Language,
    pub content_hash: u64,
    pub tree: Tree,
    /// The tree contained ERROR or MISSING nodes. Extraction still runs;
    /// handlers inside broken subtrees simply do not match.
    pub has_errors: bool,
    pub error_count: u32,
}
