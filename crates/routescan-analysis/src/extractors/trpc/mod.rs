//! tRPC router extractor: factory-call discovery, procedure analysis, and
//! mount-graph composition.

pub mod composition;
pub mod procedures;

use std::collections::BTreeMap;

use regex::Regex;
use routescan_core::config::ExtractorOptions;
use routescan_core::errors::{ConfigError, ExtractError};
use routescan_core::types::Route;
use serde::Serialize;
use tracing::{debug, info};
use tree_sitter::Node;

use super::{load_project, RouteExtractor};
use crate::ast;
use crate::normalize;
use crate::parsers::ParserManager;
use crate::project::{SourceFile, SourceProject};
use crate::schema;

use composition::{derive_router_name, MountGraph, RouterMountEdge};
use procedures::{ProcedureChain, TrpcMethod, Visibility};

/// Base URL every tRPC procedure is exposed under.
pub const TRPC_MOUNT_PATH: &str = "/api/trpc";

const DEFAULT_INCLUDE: &[&str] = &["**/*.ts", "**/*.tsx"];

/// One analyzed procedure. `router` holds the declared router identifier
/// until composition resolution rewrites it to the dotted path.
#[derive(Debug, Clone, Serialize)]
pub struct TrpcProcedure {
    pub router: String,
    pub procedure: String,
    pub method: TrpcMethod,
    pub visibility: Visibility,
    pub file: String,
    pub line: u32,
    pub input: bool,
    pub output: bool,
    pub body_example: Option<String>,
    pub headers: BTreeMap<String, String>,
    pub resolver_lines: u32,
}

/// Per-router metadata. `name` follows the same rewrite rule as
/// `TrpcProcedure::router`, falling back to the derived display name for
/// roots.
#[derive(Debug, Clone, Serialize)]
pub struct TrpcRouterMeta {
    pub name: String,
    pub file: String,
    pub line: u32,
    pub lines_of_code: u32,
}

/// Aggregate parse result: routes plus the raw procedure and router lists.
#[derive(Debug, Clone, Default)]
pub struct TrpcParseResult {
    pub routes: Vec<Route>,
    pub procedures: Vec<TrpcProcedure>,
    pub routers: Vec<TrpcRouterMeta>,
}

pub struct TrpcExtractor {
    options: ExtractorOptions,
    manager: ParserManager,
}

struct ScannedRouter {
    declared: String,
    file: String,
    line: u32,
    lines_of_code: u32,
}

impl TrpcExtractor {
    pub fn new(options: ExtractorOptions) -> Self {
        Self {
            options,
            manager: ParserManager::new(),
        }
    }

    /// Full extraction including procedure and router metadata.
    pub fn extract_full(&mut self, root: &std::path::Path) -> Result<TrpcParseResult, ExtractError> {
        info!("Parsing {} routes with AST", self.name());
        let Some(project) = load_project(
            root,
            self.name(),
            &self.options,
            DEFAULT_INCLUDE,
            &self.manager,
        )?
        else {
            return Ok(TrpcParseResult::default());
        };
        let result = self.parse(&project)?;
        info!("Parsed {} {} routes", result.routes.len(), self.name());
        Ok(result)
    }

    /// Scan every file for router-factory calls, analyze procedures, then
    /// resolve composition and emit routes.
    pub fn parse(&mut self, project: &SourceProject) -> Result<TrpcParseResult, ExtractError> {
        let identifier_pattern = match &self.options.router_identifier_pattern {
            Some(pattern) => Some(Regex::new(pattern).map_err(|err| {
                ConfigError::InvalidRouterPattern {
                    pattern: pattern.clone(),
                    message: err.to_string(),
                }
            })?),
            None => None,
        };

        let verbose = self.options.verbose;
        let mut routers: Vec<ScannedRouter> = Vec::new();
        let mut edges: Vec<RouterMountEdge> = Vec::new();
        let mut procedures: Vec<TrpcProcedure> = Vec::new();

        for file in project.files() {
            if verbose {
                info!("Scanning file {}", file.rel);
            } else {
                debug!("Scanning file {}", file.rel);
            }
            // Cheap prefilter before walking the tree.
            if !self
                .options
                .router_factories
                .iter()
                .any(|f| file.source.contains(f.as_str()))
            {
                continue;
            }
            self.scan_file(
                file,
                identifier_pattern.as_ref(),
                &mut routers,
                &mut edges,
                &mut procedures,
            );
        }

        // Composition: rewrite declared identifiers into dotted paths.
        let mut graph = MountGraph::new();
        for router in &routers {
            graph.add_router(&router.declared);
        }
        for edge in &edges {
            graph.add_mount(edge);
        }
        let paths = graph.resolve_paths();

        for procedure in &mut procedures {
            if let Some(resolved) = paths.get(&procedure.router) {
                procedure.router = resolved.clone();
            }
        }

        let routers: Vec<TrpcRouterMeta> = routers
            .into_iter()
            .map(|r| {
                let resolved = paths.get(&r.declared).cloned().unwrap_or_default();
                let name = if resolved.is_empty() {
                    derive_router_name(&r.declared, &r.file)
                } else {
                    resolved
                };
                TrpcRouterMeta {
                    name,
                    file: r.file,
                    line: r.line,
                    lines_of_code: r.lines_of_code,
                }
            })
            .collect();

        let routes = procedures.iter().map(normalize::trpc_procedure).collect();

        Ok(TrpcParseResult {
            routes,
            procedures,
            routers,
        })
    }

    fn scan_file(
        &self,
        file: &SourceFile,
        identifier_pattern: Option<&Regex>,
        routers: &mut Vec<ScannedRouter>,
        edges: &mut Vec<RouterMountEdge>,
        procedures: &mut Vec<TrpcProcedure>,
    ) {
        let src = &file.source;
        let root = file.root_node();
        let file_path = file.path.to_string_lossy().into_owned();

        ast::walk_tree(root, &mut |node| {
            if !self.is_router_factory_call(node, src) {
                return;
            }
            let Some(argument) = first_object_argument(node) else {
                debug!(
                    "router factory without object literal at {}:{}",
                    file.rel,
                    ast::line(node)
                );
                return;
            };

            let declared = declared_router_name(node, src)
                .unwrap_or_else(|| derive_router_name("", &file.rel));
            debug!("Found router {} at {}:{}", declared, file.rel, ast::line(node));
            routers.push(ScannedRouter {
                declared: declared.clone(),
                file: file_path.clone(),
                line: ast::line(node),
                lines_of_code: ast::line_span(node),
            });

            self.walk_router_argument(
                argument,
                &declared,
                file,
                &file_path,
                root,
                identifier_pattern,
                edges,
                procedures,
            );
        });
    }

    /// Each property of a router's object literal is a nested mount, a
    /// procedure, or noise.
    #[allow(clippy::too_many_arguments)]
    fn walk_router_argument(
        &self,
        argument: Node<'_>,
        declared: &str,
        file: &SourceFile,
        file_path: &str,
        root: Node<'_>,
        identifier_pattern: Option<&Regex>,
        edges: &mut Vec<RouterMountEdge>,
        procedures: &mut Vec<TrpcProcedure>,
    ) {
        let src = &file.source;
        for prop in ast::named_children(argument) {
            let (key, value) = match prop.kind() {
                "pair" => {
                    let Some(key) = ast::pair_key(prop, src) else {
                        continue;
                    };
                    let Some(value) = prop.child_by_field_name("value") else {
                        continue;
                    };
                    (key, ast::unwrap_expression(value))
                }
                "shorthand_property_identifier" => {
                    (ast::text(prop, src).to_string(), prop)
                }
                _ => continue,
            };

            // Nested router mount: direct factory call, identifier declared
            // as one, or identifier matching the user-supplied pattern.
            if self.is_router_factory_call(value, src) {
                edges.push(RouterMountEdge {
                    parent: declared.to_string(),
                    property: key.clone(),
                    target: key.clone(),
                });
                continue;
            }
            if matches!(value.kind(), "identifier" | "shorthand_property_identifier") {
                let target = ast::text(value, src);
                let is_router = ast::find_declaration(root, target, src)
                    .map(|decl| self.is_router_factory_call(decl, src))
                    .unwrap_or(false)
                    || identifier_pattern.map_or(false, |p| p.is_match(target));
                if is_router {
                    edges.push(RouterMountEdge {
                        parent: declared.to_string(),
                        property: key,
                        target: target.to_string(),
                    });
                } else {
                    debug!("skipping property {key} of {declared}: not a router or procedure");
                }
                continue;
            }

            match procedures::analyze(value, src) {
                Some(chain) => {
                    debug!(
                        "Found {:?} procedure {}.{} (line {})",
                        chain.method,
                        declared,
                        key,
                        ast::line(prop)
                    );
                    procedures.push(self.procedure_record(
                        declared, &key, &chain, file_path, root, src, prop,
                    ));
                }
                None => {
                    debug!("skipping property {key} of {declared}: unrecognized shape");
                }
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn procedure_record(
        &self,
        declared: &str,
        key: &str,
        chain: &ProcedureChain<'_>,
        file_path: &str,
        root: Node<'_>,
        src: &str,
        prop: Node<'_>,
    ) -> TrpcProcedure {
        let body_example = chain
            .input_schema
            .and_then(|expr| schema::extract_body_from_schema(expr, root, src));
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());

        TrpcProcedure {
            router: declared.to_string(),
            procedure: key.to_string(),
            method: chain.method,
            visibility: chain.visibility,
            file: file_path.to_string(),
            line: ast::line(prop),
            input: chain.has_input,
            output: chain.has_output,
            body_example,
            headers,
            resolver_lines: chain.handler.map(ast::line_span).unwrap_or(0),
        }
    }

    /// A call site is a router factory if its callee is a configured factory
    /// identifier or a property access ending in one (`t.router`).
    fn is_router_factory_call(&self, node: Node<'_>, src: &str) -> bool {
        if node.kind() != "call_expression" {
            return false;
        }
        let Some(callee) = node.child_by_field_name("function") else {
            return false;
        };
        let callee = ast::unwrap_expression(callee);
        let name = match callee.kind() {
            "identifier" => ast::text(callee, src),
            "member_expression" => match callee.child_by_field_name("property") {
                Some(property) => ast::text(property, src),
                None => return false,
            },
            _ => return false,
        };
        self.options.router_factories.iter().any(|f| f == name)
    }
}

impl RouteExtractor for TrpcExtractor {
    fn name(&self) -> &'static str {
        "tRPC"
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
        Ok(self.parse(project)?.routes)
    }
}

/// First argument of a factory call, if it is an object literal.
fn first_object_argument(call: Node<'_>) -> Option<Node<'_>> {
    let arguments = call.child_by_field_name("arguments")?;
    let first = ast::call_arguments(arguments).into_iter().next()?;
    let first = ast::unwrap_expression(first);
    (first.kind() == "object").then_some(first)
}

/// The identifier a router factory call is bound to: an enclosing variable
/// declarator, or the property key when mounted inline.
fn declared_router_name(call: Node<'_>, src: &str) -> Option<String> {
    let mut current = call.parent();
    while let Some(parent) = current {
        match parent.kind() {
            "variable_declarator" => {
                return parent
                    .child_by_field_name("name")
                    .map(|n| ast::text(n, src).to_string());
            }
            "pair" => return ast::pair_key(parent, src),
            "parenthesized_expression"
            | "as_expression"
            | "satisfies_expression"
            | "non_null_expression"
            | "export_statement"
            | "expression_statement" => {
                current = parent.parent();
            }
            _ => return None,
        }
    }
    None
}
