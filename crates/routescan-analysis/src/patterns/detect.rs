//! File-level detectors: middleware exports, server actions, tRPC adapters.

use tree_sitter::Node;

use crate::ast;

/// Symbols that mark a file as a tRPC HTTP adapter. Adapter files wire a
/// router into the framework and are not user endpoints themselves; both
/// Next.js parsers exclude them.
pub const TRPC_ADAPTER_MARKERS: &[&str] = &[
    "@trpc/server/adapters",
    "fetchRequestHandler",
    "createNextApiHandler",
    "createHTTPHandler",
];

pub fn is_trpc_handler(content: &str) -> bool {
    TRPC_ADAPTER_MARKERS.iter().any(|m| content.contains(m))
}

/// True if the file exports a `middleware` function or variable.
pub fn has_middleware_export(root: Node<'_>, src: &str) -> bool {
    ast::collect_exports(root, src)
        .iter()
        .any(|e| e.name.as_deref() == Some("middleware"))
}

/// True if the file's first non-comment statement is the `"use server"`
/// directive.
pub fn is_server_action_file(root: Node<'_>, src: &str) -> bool {
    ast::first_directive(root, src).as_deref() == Some("use server")
}
