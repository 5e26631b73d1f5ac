//! Tree-sitter parser subsystem — TypeScript and JavaScript grammars behind
//! a manager with a content-hash parse cache.

pub mod cache;
pub mod error_tolerant;
pub mod languages;
pub mod manager;
pub mod traits;
pub mod types;

pub use manager::ParserManager;
pub use types::ParseResult;
