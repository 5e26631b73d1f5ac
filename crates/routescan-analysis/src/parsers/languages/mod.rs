//! Per-language parser implementations.

pub mod javascript;
pub mod typescript;

use std::path::Path;

use routescan_core::errors::ParseError;
use tree_sitter::Parser;

use super::error_tolerant::count_errors;
use super::types::ParseResult;
use crate::scanner::hasher::hash_content;
use crate::scanner::language_detect::Language;

/// Shared parsing logic used by both language parsers.
pub fn parse_with_language(
    source: &[u8],
    path: &Path,
    language: Language,
    ts_language: tree_sitter::Language,
) -> Result<ParseResult, ParseError> {
    // Node text extraction later assumes valid UTF-8.
    if std::str::from_utf8(source).is_err() {
        return Err(ParseError::InvalidUtf8 {
            path: path.to_path_buf(),
        });
    }

    let mut parser = Parser::new();
    parser
        .set_language(&ts_language)
        .map_err(|_| ParseError::GrammarNotFound {
            language: language.name().to_string(),
        })?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| ParseError::TreeSitter {
            path: path.to_path_buf(),
            message: "tree-sitter returned no tree".to_string(),
        })?;

    let error_count = count_errors(tree.root_node());

    Ok(ParseResult {
        file: path.to_path_buf(),
        language,
        content_hash: hash_content(source),
        tree,
        has_errors: error_count > 0,
        error_count,
    })
}
