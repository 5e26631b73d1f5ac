//! LanguageParser trait implemented once per grammar.

use std::path::Path;

use routescan_core::errors::ParseError;

use super::types::ParseResult;
use crate::scanner::language_detect::Language;

pub trait LanguageParser {
    fn language(&self) -> Language;
    fn extensions(&self) -> &[&str];
    fn parse(&self, source: &[u8], path: &Path) -> Result<ParseResult, ParseError>;
}
