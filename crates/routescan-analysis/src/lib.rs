//! # routescan-analysis
//!
//! Static route extraction for TypeScript projects. Discovers HTTP-callable
//! endpoints by walking tree-sitter syntax trees: Next.js App Router files,
//! Next.js Pages Router dispatchers, and tRPC router trees.
//!
//! The extractor prefers silence over guessing: a missing route is
//! acceptable, a wrong route is a bug.

pub mod ast;
pub mod extractors;
pub mod normalize;
pub mod parsers;
pub mod patterns;
pub mod project;
pub mod scanner;
pub mod schema;

pub use extractors::{
    extract_all_routes, NextAppExtractor, NextPagesExtractor, RouteExtractor, TrpcExtractor,
};
pub use routescan_core::config::ExtractorOptions;
pub use routescan_core::errors::ExtractError;
pub use routescan_core::types::{HttpMethod, Route, RouteOrigin};
