//! Options bag shared by every extractor. Users configure, never subclass.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Identifiers treated as tRPC router factories by default. A property
/// access ending in one of these (`t.router`) also counts.
pub const DEFAULT_ROUTER_FACTORIES: &[&str] = &["router", "createTRPCRouter"];

/// Files larger than this are never parsed.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 2 * 1024 * 1024;

/// Per-extractor configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtractorOptions {
    /// Compiler-config path; defaults to `<root>/tsconfig.json`.
    pub tsconfig_path: Option<PathBuf>,
    /// Replaces the extractor's default file-pattern set when present.
    pub include: Option<Vec<String>>,
    /// Raise per-file scan lines from debug to info.
    pub verbose: bool,
    /// tRPC router factory identifiers.
    pub router_factories: Vec<String>,
    /// Extra regex matched against identifiers that denote router references
    /// (e.g. `Router$`). Compiled once per parse invocation.
    pub router_identifier_pattern: Option<String>,
    /// Skip files larger than this many bytes.
    pub max_file_size: u64,
}

impl Default for ExtractorOptions {
    fn default() -> Self {
        Self {
            tsconfig_path: None,
            include: None,
            verbose: false,
            router_factories: DEFAULT_ROUTER_FACTORIES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            router_identifier_pattern: None,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl ExtractorOptions {
    pub fn with_tsconfig_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.tsconfig_path = Some(path.into());
        self
    }

    pub fn with_include(mut self, patterns: Vec<String>) -> Self {
        self.include = Some(patterns);
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Extend the factory list beyond the defaults.
    pub fn with_router_factories(mut self, factories: Vec<String>) -> Self {
        self.router_factories = factories;
        self
    }

    pub fn with_router_identifier_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.router_identifier_pattern = Some(pattern.into());
        self
    }
}
