//! Dynamic-segment extraction and URL path normalization.
//!
//! These rules are a protocol: identical file trees must yield identical
//! URLs, bit-for-bit, across implementations.

use routescan_core::types::{DynamicSegment, SegmentList};

/// Extract bracketed dynamic segments from a relative URL pattern, in
/// directory order. `[x]` is required, `[...x]` catch-all, `[[...x]]`
/// optional catch-all.
pub fn extract_dynamic_segments(pattern: &str) -> SegmentList {
    let mut out = SegmentList::new();
    for part in pattern.split('/') {
        if let Some(name) = part
            .strip_prefix("[[...")
            .and_then(|s| s.strip_suffix("]]"))
        {
            if !name.is_empty() {
                out.push(DynamicSegment {
                    name: name.to_string(),
                    is_catch_all: true,
                    is_optional: true,
                });
            }
        } else if let Some(name) = part.strip_prefix("[...").and_then(|s| s.strip_suffix(']')) {
            if !name.is_empty() {
                out.push(DynamicSegment {
                    name: name.to_string(),
                    is_catch_all: true,
                    is_optional: false,
                });
            }
        } else if let Some(name) = part.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
            if !name.is_empty() {
                out.push(DynamicSegment {
                    name: name.to_string(),
                    is_catch_all: false,
                    is_optional: false,
                });
            }
        }
    }
    out
}

/// Convert bracketed segments to colon form, left-to-right, once per
/// segment: `[x]` → `:x`, `[...x]` → `:x*`, `[[...x]]` → `:x?`.
pub fn convert_segments(pattern: &str) -> String {
    pattern
        .split('/')
        .map(|part| {
            if let Some(name) = part
                .strip_prefix("[[...")
                .and_then(|s| s.strip_suffix("]]"))
            {
                format!(":{name}?")
            } else if let Some(name) = part.strip_prefix("[...").and_then(|s| s.strip_suffix(']')) {
                format!(":{name}*")
            } else if let Some(name) = part.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
                format!(":{name}")
            } else {
                part.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Collapse duplicate slashes, ensure a leading slash, and strip the
/// trailing slash. The empty pattern maps to the root `/`.
pub fn normalize_path(path: &str) -> String {
    let parts: Vec<&str> = path.split('/').filter(|p| !p.is_empty()).collect();
    if parts.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", parts.join("/"))
    }
}
