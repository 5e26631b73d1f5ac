//! Route extractors: Next.js App Router, Next.js Pages Router, tRPC.
//!
//! Every extractor follows the same template: locate the compiler config,
//! load the source project, then run its own `parse_routes` pass. A missing
//! config yields zero routes with a warning; a missing root is a caller
//! error.

pub mod next_app;
pub mod next_common;
pub mod next_pages;
pub mod trpc;

use std::path::Path;

use routescan_core::config::ExtractorOptions;
use routescan_core::errors::{ExtractError, ScanError};
use routescan_core::types::Route;
use tracing::{info, warn};

use crate::parsers::ParserManager;
use crate::project::tsconfig::{self, TsConfig};
use crate::project::SourceProject;

pub use next_app::NextAppExtractor;
pub use next_pages::NextPagesExtractor;
pub use trpc::TrpcExtractor;

/// Template contract shared by all extractors.
pub trait RouteExtractor {
    /// Display name used in log lines.
    fn name(&self) -> &'static str;

    /// File patterns scanned when the caller supplies no `include`.
    fn default_include(&self) -> &'static [&'static str];

    fn options(&self) -> &ExtractorOptions;

    fn manager(&self) -> &ParserManager;

    /// Extractor-specific pass over a loaded project.
    fn parse_routes(&mut self, project: &SourceProject) -> Result<Vec<Route>, ExtractError>;

    /// Locate the compiler config, load the project, and parse routes.
    fn extract(&mut self, root: &Path) -> Result<Vec<Route>, ExtractError> {
        info!("Parsing {} routes with AST", self.name());
        let Some(project) = load_project(
            root,
            self.name(),
            self.options(),
            self.default_include(),
            self.manager(),
        )?
        else {
            return Ok(Vec::new());
        };
        let routes = self.parse_routes(&project)?;
        info!("Parsed {} {} routes", routes.len(), self.name());
        Ok(routes)
    }
}

/// Shared template steps: tsconfig gate plus project load. `Ok(None)` means
/// "no compiler config, report zero routes".
pub(crate) fn load_project(
    root: &Path,
    name: &str,
    options: &ExtractorOptions,
    default_include: &[&str],
    manager: &ParserManager,
) -> Result<Option<SourceProject>, ExtractError> {
    if !root.is_dir() {
        return Err(ScanError::RootNotFound {
            path: root.to_path_buf(),
        }
        .into());
    }

    let Some(config_path) = tsconfig::locate(root, options.tsconfig_path.as_deref()) else {
        warn!(
            "no compiler config under {}; skipping {} parsing",
            root.display(),
            name
        );
        return Ok(None);
    };
    let config = match tsconfig::parse_file(&config_path) {
        Ok(c) => c,
        Err(err) => {
            warn!("unusable compiler config {}: {err}", config_path.display());
            TsConfig::default()
        }
    };

    let include: Vec<String> = options.include.clone().unwrap_or_else(|| {
        default_include.iter().map(|s| s.to_string()).collect()
    });
    let excludes = config.exclude.unwrap_or_default();

    let project = SourceProject::load(root, &include, &excludes, options.max_file_size, manager)?;
    Ok(Some(project))
}

/// Run all three extractors over one workspace root, in app → pages → trpc
/// order.
pub fn extract_all_routes(
    root: &Path,
    options: &ExtractorOptions,
) -> Result<Vec<Route>, ExtractError> {
    let mut routes = Vec::new();
    routes.extend(NextAppExtractor::new(options.clone()).extract(root)?);
    routes.extend(NextPagesExtractor::new(options.clone()).extract(root)?);
    routes.extend(TrpcExtractor::new(options.clone()).extract(root)?);
    Ok(routes)
}
