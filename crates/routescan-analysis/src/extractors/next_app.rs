//! Next.js App Router extractor: `app/**/route.{ts,js}` files exporting one
//! handler per HTTP verb.

use std::path::PathBuf;

use routescan_core::config::ExtractorOptions;
use routescan_core::errors::ExtractError;
use routescan_core::types::{collections::FxHashMap, HttpMethod, Route, RouteOrigin, SegmentList};
use tracing::{debug, info};
use tree_sitter::Node;

use super::next_common;
use super::RouteExtractor;
use crate::ast;
use crate::normalize;
use crate::parsers::ParserManager;
use crate::patterns::{detect, segments, verbs};
use crate::project::{SourceFile, SourceProject};

const DEFAULT_INCLUDE: &[&str] = &["**/app/**/route.ts", "**/app/**/route.js"];

pub struct NextAppExtractor {
    options: ExtractorOptions,
    manager: ParserManager,
    /// file path → (converted route path, dynamic segments), scoped to this
    /// extractor instance.
    route_cache: FxHashMap<PathBuf, (String, SegmentList)>,
}

impl NextAppExtractor {
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
        let raw = app_route_from_rel(&file.rel);
        let dynamic = segments::extract_dynamic_segments(&raw);
        let path = segments::normalize_path(&segments::convert_segments(&raw));
        self.route_cache
            .insert(file.path.clone(), (path.clone(), dynamic.clone()));
        (path, dynamic)
    }
}

impl RouteExtractor for NextAppExtractor {
    fn name(&self) -> &'static str {
        "Next.js App Router"
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
            if detect::is_trpc_handler(&file.source) {
                debug!("skipping tRPC adapter {}", file.rel);
                continue;
            }
            if is_route_group_path(&file.rel) {
                debug!("skipping route group {}", file.rel);
                continue;
            }

            let (path, dynamic) = self.route_path_for(file);
            for (method, handler) in collect_verb_handlers(file.root_node(), &file.source) {
                debug!("Found {} handler at {} (line {})", method, path, ast::line(handler));
                let record = next_common::build_record(&path, method, file, handler, &dynamic);
                routes.push(normalize::next_record(&record, RouteOrigin::NextApp));
            }
        }

        Ok(routes)
    }
}

/// `src/app/api/users/[id]/route.ts` → `api/users/[id]` (pre-conversion).
fn app_route_from_rel(rel: &str) -> String {
    let mut parts: Vec<&str> = rel.split('/').collect();
    parts.pop(); // the route.{ts,js} file itself
    let tail = match parts.iter().position(|p| *p == "app") {
        Some(i) => &parts[i + 1..],
        None => &parts[..],
    };
    tail.join("/")
}

/// Layout route groups and the CMS admin catch-all never map to URLs the
/// extractor can vouch for; their files are skipped outright.
fn is_route_group_path(rel: &str) -> bool {
    rel.split('/')
        .any(|part| (part.starts_with('(') && part.ends_with(')')) || part == "[[...segments]]")
}

/// Union of exported verb-named handlers in a route file: function
/// declarations, verb-named variables bound to functions, re-exports, and a
/// `methods` string-array export (which names the whole file as handler).
fn collect_verb_handlers<'t>(root: Node<'t>, src: &str) -> Vec<(HttpMethod, Node<'t>)> {
    let mut handlers: Vec<(HttpMethod, Node<'t>)> = Vec::new();
    fn seen(handlers: &[(HttpMethod, Node<'_>)], m: HttpMethod) -> bool {
        handlers.iter().any(|(existing, _)| *existing == m)
    }

    for export in ast::collect_exports(root, src) {
        let Some(name) = export.name.as_deref() else {
            continue;
        };

        if name == "methods" {
            let array = ast::unwrap_expression(export.node);
            if array.kind() == "array" {
                for item in ast::named_children(array) {
                    if let Some(method) = verbs::method_literal(item, src) {
                        if !seen(&handlers, method) {
                            handlers.push((method, root));
                        }
                    }
                }
            }
            continue;
        }

        let Some(method) = verbs::verb_export(name) else {
            continue;
        };
        if seen(&handlers, method) {
            continue;
        }

        let node = ast::unwrap_expression(export.node);
        if ast::is_function_like(node) || node.kind() == "export_specifier" {
            // Local re-exports resolve to the declaration so body inference
            // still sees the handler.
            if node.kind() == "export_specifier" && export.source.is_none() {
                if let Some(local) = export.local.as_deref() {
                    if let Some(decl) = ast::find_declaration(root, local, src) {
                        handlers.push((method, decl));
                        continue;
                    }
                }
            }
            handlers.push((method, node));
        } else if node.kind() == "identifier" {
            if let Some(decl) = ast::find_declaration(root, ast::text(node, src), src) {
                if ast::is_function_like(decl) {
                    handlers.push((method, decl));
                }
            }
        }
    }

    handlers
}
