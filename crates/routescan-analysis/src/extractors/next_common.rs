//! Shared handler record and body/query inference for both Next.js parsers.

use std::collections::BTreeMap;
use std::path::PathBuf;

use routescan_core::types::{HttpMethod, SegmentList};
use serde::Serialize;
use tree_sitter::Node;

use crate::ast;
use crate::patterns::detect;
use crate::project::SourceFile;
use crate::schema;

/// Internal per-handler record. Consumed only by the normalizer; the
/// analysis flags are diagnostics and never appear in the public `Route`.
#[derive(Debug, Clone, Serialize)]
pub struct NextHandlerRecord {
    pub route_path: String,
    pub method: HttpMethod,
    pub file: PathBuf,
    pub line: u32,
    pub dynamic_segments: SegmentList,
    pub is_dynamic: bool,
    pub has_middleware: bool,
    pub is_server_action: bool,
    pub handler_lines: u32,
    pub uses_db: bool,
    pub has_error_handling: bool,
    pub has_validation: bool,
    pub headers: BTreeMap<String, String>,
    pub query_params: BTreeMap<String, String>,
    pub body_example: Option<String>,
}

/// Build a record for one `(method, handler node)` pair.
pub fn build_record(
    route_path: &str,
    method: HttpMethod,
    file: &SourceFile,
    handler: Node<'_>,
    segments: &SegmentList,
) -> NextHandlerRecord {
    let root = file.root_node();
    let src = &file.source;

    let mut record = NextHandlerRecord {
        route_path: route_path.to_string(),
        method,
        file: file.path.clone(),
        line: ast::line(handler),
        dynamic_segments: segments.clone(),
        is_dynamic: !segments.is_empty(),
        has_middleware: detect::has_middleware_export(root, src),
        is_server_action: detect::is_server_action_file(root, src),
        handler_lines: ast::line_span(handler),
        uses_db: uses_db(handler, src),
        has_error_handling: has_error_handling(handler),
        has_validation: has_validation_call(handler, src),
        headers: BTreeMap::new(),
        query_params: infer_query_params(handler, src),
        body_example: None,
    };

    if method.carries_body() {
        record.body_example = infer_body(handler, root, src);
        if record.body_example.is_some() || parses_json_body(handler, src) {
            record
                .headers
                .insert("Content-Type".to_string(), "application/json".to_string());
        }
    }

    record
}

/// Walk a handler body for `schema.parse(…)` / `schema.safeParse(…)` where
/// the receiver resolves to an in-scope schema expression.
pub fn infer_body(handler: Node<'_>, root: Node<'_>, src: &str) -> Option<String> {
    let mut found = None;
    ast::walk_tree(handler, &mut |node| {
        if found.is_some() {
            return;
        }
        if let Some((receiver, property, _)) = ast::member_call(node, src) {
            if property == "parse" || property == "safeParse" {
                found = schema::extract_body_from_schema(receiver, root, src);
            }
        }
    });
    found
}

/// Collect `searchParams.get("…")` keys used in a handler body.
pub fn infer_query_params(handler: Node<'_>, src: &str) -> BTreeMap<String, String> {
    let mut params = BTreeMap::new();
    ast::walk_tree(handler, &mut |node| {
        if let Some((receiver, property, arguments)) = ast::member_call(node, src) {
            if property != "get" || !ast::text(receiver, src).ends_with("searchParams") {
                return;
            }
            if let Some(key) = ast::call_arguments(arguments)
                .first()
                .and_then(|a| ast::string_value(ast::unwrap_expression(*a), src))
            {
                params.insert(key, "string".to_string());
            }
        }
    });
    params
}

/// True when the handler reads a JSON request body (`req.json()`).
pub fn parses_json_body(handler: Node<'_>, src: &str) -> bool {
    let mut found = false;
    ast::walk_tree(handler, &mut |node| {
        if found {
            return;
        }
        if let Some((receiver, property, _)) = ast::member_call(node, src) {
            if property == "json" && matches!(ast::text(receiver, src), "req" | "request") {
                found = true;
            }
        }
    });
    found
}

fn has_validation_call(handler: Node<'_>, src: &str) -> bool {
    let mut found = false;
    ast::walk_tree(handler, &mut |node| {
        if found {
            return;
        }
        if let Some((_, property, _)) = ast::member_call(node, src) {
            if property == "parse" || property == "safeParse" {
                found = true;
            }
        }
    });
    found
}

fn uses_db(handler: Node<'_>, src: &str) -> bool {
    let mut found = false;
    ast::walk_tree(handler, &mut |node| {
        if found || node.kind() != "member_expression" {
            return;
        }
        if let Some(object) = node.child_by_field_name("object") {
            if object.kind() == "identifier" && matches!(ast::text(object, src), "db" | "prisma") {
                found = true;
            }
        }
    });
    found
}

fn has_error_handling(handler: Node<'_>) -> bool {
    let mut found = false;
    ast::walk_tree(handler, &mut |node| {
        if node.kind() == "try_statement" {
            found = true;
        }
    });
    found
}
