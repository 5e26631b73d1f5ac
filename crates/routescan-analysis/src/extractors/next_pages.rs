//! Next.js Pages Router extractor: `pages/api/**` files with a single
//! dispatcher export and method dispatch in the body.

use std::path::PathBuf;

use routescan_core::config::ExtractorOptions;
use routescan_core::errors::ExtractError;
use routescan_core::types::{collections::FxHashMap, collections::FxHashSet, HttpMethod, Route, RouteOrigin, SegmentList};
use tracing::{debug, info};
use tree_sitter::Node;

use super::next_common;
use super::RouteExtractor;
use crate::ast;
use crate::normalize;
use crate::parsers::ParserManager;
use crate::patterns::{detect, segments, verbs};
use crate::project::{SourceFile, SourceProject};

const DEFAULT_INCLUDE: &[&str] = &["**/pages/api/**/*.ts", "**/pages/api/**/*.js"];

pub struct NextPagesExtractor {
    options: ExtractorOptions,
    manager: ParserManager,
    route_cache: FxHashMap<PathBuf, (String, SegmentList)>,
}

impl NextPagesExtractor {
    pub fn new(options: ExtractorOptions) -> Self {
        Self {
            options,
            manager: ParserManager::new(),
            route_cache: FxHashMap::default(),
        }
    }

    fn route_path_for(&mut self, file: &SourceFile) -> (String, SegmentList) {
        if let Some(cached) = self.route_cache.get(&file.path) {
            return cached.clone();
        }
        let raw = pages_route_from_rel(&file.rel);
        let dynamic = segments::extract_dynamic_segments(&raw);
        let path = segments::normalize_path(&segments::convert_segments(&raw));
        self.route_cache
            .insert(file.path.clone(), (path.clone(), dynamic.clone()));
        (path, dynamic)
    }
}

impl RouteExtractor for NextPagesExtractor {
    fn name(&self) -> &'static str {
        "Next.js Pages Router"
    }

    fn default_include(&self) -> &'static [&'static str] {
        DEFAULT_INCLUDE
    }

    fn options(&self) -> &ExtractorOptions {
        &self.options
    }

    fn manager(&self) -> &ParserManager {
        &self.manager
    }

    fn parse_routes(&mut self, project: &SourceProject) -> Result<Vec<Route>, ExtractError> {
        let verbose = self.options.verbose;
        let mut routes = Vec::new();

        for file in project.files() {
            if verbose {
                info!("Scanning file {}", file.rel);
            } else {
                debug!("Scanning file {}", file.rel);
            }
            // route.{ts,js} files belong to the App Router parser.
            if file.rel.ends_with("/route.ts") || file.rel.ends_with("/route.js") {
                continue;
            }
            if detect::is_trpc_handler(&file.source) {
                debug!("skipping tRPC adapter {}", file.rel);
                continue;
            }

            let root = file.root_node();
            let src = &file.source;
            let Some(handler) = find_dispatcher(root, src) else {
                debug!("no dispatcher export in {}", file.rel);
                continue;
            };

            let methods = infer_methods(handler, root, src);
            if methods.is_empty() {
                debug!("no recognizable method dispatch in {}", file.rel);
                continue;
            }

            let (path, dynamic) = self.route_path_for(file);
            for method in methods {
                debug!("Found {} handler at {} (line {})", method, path, ast::line(handler));
                let record = next_common::build_record(&path, method, file, handler, &dynamic);
                routes.push(normalize::next_record(&record, RouteOrigin::NextPage));
            }
        }

        Ok(routes)
    }
}

/// `src/pages/api/blog/[...slug].ts` → `api/blog/[...slug]`; a trailing
/// `index` segment is dropped, so `pages/api/index.ts` → `api`.
fn pages_route_from_rel(rel: &str) -> String {
    let mut parts: Vec<&str> = rel.split('/').collect();
    let file = parts.pop().unwrap_or_default();
    let stem = file
        .rsplit_once('.')
        .map(|(stem, _ext)| stem)
        .unwrap_or(file);

    let mut tail: Vec<&str> = match parts.iter().position(|p| *p == "pages") {
        Some(i) => parts[i + 1..].to_vec(),
        None => parts,
    };
    if stem != "index" && !stem.is_empty() {
        tail.push(stem);
    }
    tail.join("/")
}

/// The dispatcher is the default export's first declaration, else the named
/// export `handler`.
fn find_dispatcher<'t>(root: Node<'t>, src: &str) -> Option<Node<'t>> {
    let exports = ast::collect_exports(root, src);

    for export in &exports {
        if !export.is_default {
            continue;
        }
        let node = ast::unwrap_expression(export.node);
        if ast::is_function_like(node) {
            return Some(node);
        }
        if node.kind() == "identifier" {
            if let Some(decl) = ast::find_declaration(root, ast::text(node, src), src) {
                return Some(decl);
            }
        }
        return Some(node);
    }

    exports
        .iter()
        .find(|e| e.name.as_deref() == Some("handler"))
        .map(|e| ast::unwrap_expression(e.node))
}

/// Infer accepted methods from `req.method` equality comparisons, `switch`
/// statements over `req.method`, and an exported `methods` array. Order of
/// first appearance is preserved.
fn infer_methods(handler: Node<'_>, root: Node<'_>, src: &str) -> Vec<HttpMethod> {
    let mut req_names: FxHashSet<String> = FxHashSet::default();
    req_names.insert("req".to_string());
    req_names.insert("request".to_string());
    if let Some(first) = ast::first_parameter_name(handler, src) {
        req_names.insert(first);
    }

    let mut methods: Vec<HttpMethod> = Vec::new();
    fn push(methods: &mut Vec<HttpMethod>, m: HttpMethod) {
        if !methods.contains(&m) {
            methods.push(m);
        }
    }

    ast::walk_tree(handler, &mut |node| match node.kind() {
        "binary_expression" => {
            let operator = node
                .child_by_field_name("operator")
                .map(|op| ast::text(op, src));
            if !matches!(operator, Some("===") | Some("==")) {
                return;
            }
            let (Some(left), Some(right)) = (
                node.child_by_field_name("left"),
                node.child_by_field_name("right"),
            ) else {
                return;
            };
            let literal = if is_req_method_access(left, &req_names, src) {
                verbs::method_literal(right, src)
            } else if is_req_method_access(right, &req_names, src) {
                verbs::method_literal(left, src)
            } else {
                None
            };
            if let Some(m) = literal {
                push(&mut methods, m);
            }
        }
        "switch_statement" => {
            let subject = node
                .child_by_field_name("condition")
                .map(ast::unwrap_expression);
            if !subject.map_or(false, |s| is_req_method_access(s, &req_names, src)) {
                return;
            }
            let Some(body) = node.child_by_field_name("body") else {
                return;
            };
            for case in ast::named_children(body) {
                if case.kind() != "switch_case" {
                    continue;
                }
                if let Some(value) = case.child_by_field_name("value") {
                    if let Some(m) = verbs::method_literal(value, src) {
                        push(&mut methods, m);
                    }
                }
            }
        }
        _ => {}
    });

    // `export const methods = ["GET", "POST"]`
    for export in ast::collect_exports(root, src) {
        if export.name.as_deref() != Some("methods") {
            continue;
        }
        let array = ast::unwrap_expression(export.node);
        if array.kind() != "array" {
            continue;
        }
        for item in ast::named_children(array) {
            if let Some(m) = verbs::method_literal(item, src) {
                push(&mut methods, m);
            }
        }
    }

    methods
}

/// `<req>.method` where `<req>` is a known request identifier.
fn is_req_method_access(node: Node<'_>, req_names: &FxHashSet<String>, src: &str) -> bool {
    let node = ast::unwrap_expression(node);
    if node.kind() != "member_expression" {
        return false;
    }
    let (Some(object), Some(property)) = (
        node.child_by_field_name("object"),
        node.child_by_field_name("property"),
    ) else {
        return false;
    };
    object.kind() == "identifier"
        && req_names.contains(ast::text(object, src))
        && ast::text(property, src) == "method"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_route_stripping() {
        assert_eq!(pages_route_from_rel("pages/api/items.ts"), "api/items");
        assert_eq!(pages_route_from_rel("src/pages/api/blog/[...slug].ts"), "api/blog/[...slug]");
        assert_eq!(pages_route_from_rel("pages/api/index.ts"), "api");
        assert_eq!(pages_route_from_rel("pages/api/users/index.ts"), "api/users");
    }
}
