//! TypeScript source project: file enumeration plus parse trees.
//!
//! A project is transient per parse invocation. Files outside the workspace
//! root (pulled in by the compiler config) are never enumerated.

pub mod tsconfig;

use std::path::{Path, PathBuf};

use routescan_core::errors::ScanError;
use tracing::debug;
use tree_sitter::Node;

use crate::parsers::{ParseResult, ParserManager};
use crate::scanner::walker::walk_directory;

/// A parsed source file under the workspace root.
#[derive(Debug)]
pub struct SourceFile {
    /// Absolute path.
    pub path: PathBuf,
    /// Forward-slash relative path under the root.
    pub rel: String,
    pub source: String,
    pub parse: ParseResult,
}

impl SourceFile {
    pub fn root_node(&self) -> Node<'_> {
        self.parse.tree.root_node()
    }
}

/// The filtered, parsed source-file set of one workspace.
#[derive(Debug)]
pub struct SourceProject {
    root: PathBuf,
    files: Vec<SourceFile>,
}

impl SourceProject {
    /// Enumerate files under `root` matching any of `patterns`, excluding
    /// `excludes`, and parse each one. Per-file failures are logged and
    /// skipped; only a missing root aborts.
    pub fn load(
        root: &Path,
        patterns: &[String],
        excludes: &[String],
        max_file_size: u64,
        manager: &ParserManager,
    ) -> Result<Self, ScanError> {
        let root = root.canonicalize().map_err(|_| ScanError::RootNotFound {
            path: root.to_path_buf(),
        })?;

        let compiled = compile_patterns(patterns);
        let excluded = compile_patterns(excludes);

        let mut files = Vec::new();
        for discovered in walk_directory(&root, max_file_size)? {
            if discovered.language.is_none() {
                continue;
            }
            let rel = match discovered.path.strip_prefix(&root) {
                Ok(p) => p.to_string_lossy().replace('\\', "/"),
                Err(_) => continue,
            };
            // Declaration files carry no runtime handlers.
            if rel.ends_with(".d.ts") {
                continue;
            }
            if !compiled.iter().any(|p| p.matches(&rel)) {
                continue;
            }
            if excluded.iter().any(|p| p.matches(&rel)) {
                continue;
            }

            let source = match std::fs::read_to_string(&discovered.path) {
                Ok(s) => s,
                Err(err) => {
                    debug!("skipping unreadable file {rel}: {err}");
                    continue;
                }
            };
            match manager.parse(source.as_bytes(), &discovered.path) {
                Ok(parse) => files.push(SourceFile {
                    path: discovered.path,
                    rel,
                    source,
                    parse,
                }),
                Err(err) => {
                    debug!("skipping unparseable file {rel}: {err}");
                }
            }
        }

        Ok(Self { root, files })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Files in path order.
    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

fn compile_patterns(patterns: &[String]) -> Vec<glob::Pattern> {
    patterns
        .iter()
        .filter_map(|p| match glob::Pattern::new(p) {
            Ok(compiled) => Some(compiled),
            Err(err) => {
                debug!("ignoring invalid glob pattern {p:?}: {err}");
                None
            }
        })
        .collect()
}
