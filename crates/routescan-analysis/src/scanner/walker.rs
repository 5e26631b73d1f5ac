//! Serial file walker built on the `ignore` crate.
//!
//! A parse invocation is single-threaded cooperative, so the walk is serial;
//! determinism comes from sorting the result by path.

use std::path::Path;

use routescan_core::errors::ScanError;
use tracing::debug;

use super::language_detect::Language;
use super::types::DiscoveredFile;

/// Directories never scanned, applied on top of `.gitignore`.
pub const DEFAULT_IGNORES: &[&str] = &[
    "node_modules",
    ".git",
    "dist",
    "build",
    "out",
    ".next",
    ".nuxt",
    ".vercel",
    ".turbo",
    ".cache",
    "coverage",
    ".nyc_output",
    "vendor",
];

/// Walk a directory tree, collecting discovered files sorted by path.
///
/// Respects `.gitignore` and the default ignore set. Unreadable entries are
/// logged and skipped, never abort the walk.
pub fn walk_directory(root: &Path, max_file_size: u64) -> Result<Vec<DiscoveredFile>, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::RootNotFound {
            path: root.to_path_buf(),
        });
    }

    let mut builder = ignore::WalkBuilder::new(root);
    builder
        .hidden(false)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .max_filesize(Some(max_file_size))
        .follow_links(false);

    // Negated override patterns mean "always ignore this directory".
    let mut overrides = ignore::overrides::OverrideBuilder::new(root);
    for pattern in DEFAULT_IGNORES {
        let _ = overrides.add(&format!("!{}", pattern));
        let _ = overrides.add(&format!("!{}/**", pattern));
        let _ = overrides.add(&format!("!**/{}", pattern));
        let _ = overrides.add(&format!("!**/{}/**", pattern));
    }
    if let Ok(built) = overrides.build() {
        builder.overrides(built);
    }

    let mut files = Vec::new();
    for entry in builder.build() {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                debug!("skipping unreadable entry: {err}");
                continue;
            }
        };
        if !entry.file_type().map_or(false, |ft| ft.is_file()) {
            continue;
        }

        let path = entry.path().to_path_buf();
        let file_size = match entry.metadata() {
            Ok(m) => m.len(),
            Err(err) => {
                debug!("skipping {}: {err}", path.display());
                continue;
            }
        };
        let language = Language::from_extension(path.extension().and_then(|e| e.to_str()));

        files.push(DiscoveredFile {
            path,
            file_size,
            language,
        });
    }

    files.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(files)
}
