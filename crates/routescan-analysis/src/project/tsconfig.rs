//! Compiler-config discovery and JSONC-tolerant parsing.
//!
//! tsconfig.json allows comments and trailing commas, so the raw text is
//! stripped before it reaches serde.

use std::io::Read;
use std::path::{Path, PathBuf};

use json_comments::StripComments;
use regex::Regex;
use routescan_core::errors::ConfigError;
use serde::Deserialize;

/// The subset of tsconfig.json the extractor consumes. Presence of the file
/// is the gate; `exclude` narrows the scan.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TsConfig {
    pub include: Option<Vec<String>>,
    pub exclude: Option<Vec<String>>,
    pub files: Option<Vec<String>>,
}

/// Locate the compiler config: the explicit path when given, else
/// `<root>/tsconfig.json`. `None` disables parsing entirely.
pub fn locate(root: &Path, explicit: Option<&Path>) -> Option<PathBuf> {
    let path = match explicit {
        Some(p) if p.is_absolute() => p.to_path_buf(),
        Some(p) => root.join(p),
        None => root.join("tsconfig.json"),
    };
    path.is_file().then_some(path)
}

pub fn parse_file(path: &Path) -> Result<TsConfig, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_str(&raw).map_err(|message| ConfigError::Malformed {
        path: path.to_path_buf(),
        message,
    })
}

fn parse_str(raw: &str) -> Result<TsConfig, String> {
    let mut stripped = String::new();
    StripComments::new(raw.as_bytes())
        .read_to_string(&mut stripped)
        .map_err(|e| e.to_string())?;
    // Trailing commas before a closing brace or bracket are legal JSONC.
    let trailing = Regex::new(r",(\s*[}\]])").unwrap();
    let cleaned = trailing.replace_all(&stripped, "$1");
    serde_json::from_str(&cleaned).map_err(|e| e.to_string())
}
