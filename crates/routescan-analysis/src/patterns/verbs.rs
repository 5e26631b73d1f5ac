//! HTTP verb tables and method-literal recognition.

use std::str::FromStr;

use routescan_core::types::HttpMethod;
use tree_sitter::Node;

use crate::ast;

/// Verb names accepted as App Router handler exports.
pub const HTTP_METHODS: &[&str] = &["GET", "POST", "PUT", "PATCH", "DELETE", "HEAD", "OPTIONS"];

/// Exact (upper-case) verb name match, as Next.js requires for exports.
pub fn verb_export(name: &str) -> Option<HttpMethod> {
    if !HTTP_METHODS.contains(&name) {
        return None;
    }
    HttpMethod::from_str(name).ok()
}

/// The method named by a string literal or substitution-free template,
/// matched case-insensitively. `None` for anything computed or unrecognized.
pub fn method_literal(node: Node<'_>, src: &str) -> Option<HttpMethod> {
    let value = ast::string_value(ast::unwrap_expression(node), src)?;
    HttpMethod::from_str(&value.to_ascii_uppercase()).ok()
}
