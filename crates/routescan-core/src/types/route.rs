//! Public route records emitted by every extractor.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// HTTP methods recognized by the extractors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

impl HttpMethod {
    /// Upper-case wire name of the method.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
        }
    }

    /// Whether requests with this method conventionally carry a body.
    /// Routes with a bodyless method never emit a `body` example.
    pub fn carries_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }
}

impl FromStr for HttpMethod {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "PATCH" => Ok(HttpMethod::Patch),
            "DELETE" => Ok(HttpMethod::Delete),
            "HEAD" => Ok(HttpMethod::Head),
            "OPTIONS" => Ok(HttpMethod::Options),
            _ => Err(()),
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which parser produced a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RouteOrigin {
    #[serde(rename = "nextjs-app")]
    NextApp,
    #[serde(rename = "nextjs-page")]
    NextPage,
    #[serde(rename = "trpc")]
    Trpc,
}

impl RouteOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteOrigin::NextApp => "nextjs-app",
            RouteOrigin::NextPage => "nextjs-page",
            RouteOrigin::Trpc => "trpc",
        }
    }
}

impl fmt::Display for RouteOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dynamic path segment declared in a bracketed directory name:
/// `[x]`, `[...x]` (catch-all), or `[[...x]]` (optional catch-all).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynamicSegment {
    pub name: String,
    pub is_catch_all: bool,
    pub is_optional: bool,
}

/// Dynamic segments in source order. Routes rarely have more than two.
pub type SegmentList = SmallVec<[DynamicSegment; 2]>;

/// A normalized, JSON-serializable route record.
///
/// `path` is slash-prefixed with dynamic segments in colon form (`:id`,
/// `:slug*`, `:slug?`). `body` and `query` are example fragments and are
/// omitted when the source gave no usable shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Display string, `"METHOD path"`.
    pub name: String,
    pub method: HttpMethod,
    pub path: String,
    /// Absolute path of the originating source file.
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(rename = "type")]
    pub origin: RouteOrigin,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<BTreeMap<String, String>>,
    /// Example body as a JSON document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}
