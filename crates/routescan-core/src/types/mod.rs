//! Shared types used across routescan crates.

pub mod collections;
pub mod route;

pub use route::{DynamicSegment, HttpMethod, Route, RouteOrigin, SegmentList};
