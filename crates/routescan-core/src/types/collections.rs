//! Hash collections used across routescan crates.
//! FxHash is faster than SipHash for the short string keys we index by.

pub use rustc_hash::{FxHashMap, FxHashSet};
