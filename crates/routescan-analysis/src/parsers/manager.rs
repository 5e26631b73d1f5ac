//! ParserManager — routes files to the TypeScript or JavaScript grammar.

use std::path::Path;

use routescan_core::errors::ParseError;

use super::cache::ParseCache;
use super::languages::javascript::JavaScriptParser;
use super::languages::typescript::TypeScriptParser;
use super::traits::LanguageParser;
use super::types::ParseResult;
use crate::scanner::hasher::hash_content;
use crate::scanner::language_detect::Language;

/// Holds both language parsers and the parse cache.
pub struct ParserManager {
    cache: ParseCache,
    typescript: TypeScriptParser,
    javascript: JavaScriptParser,
}

impl ParserManager {
    pub fn new() -> Self {
        Self {
            cache: ParseCache::default(),
            typescript: TypeScriptParser::new(),
            javascript: JavaScriptParser::new(),
        }
    }

    pub fn with_cache_capacity(capacity: u64) -> Self {
        Self {
            cache: ParseCache::new(capacity),
            ..Self::new()
        }
    }

    fn parser_for(&self, lang: Language) -> &dyn LanguageParser {
        match lang {
            Language::TypeScript => &self.typescript,
            Language::JavaScript => &self.javascript,
        }
    }

    /// Detect language from file extension.
    pub fn detect_language(&self, path: &Path) -> Option<Language> {
        Language::from_extension(path.extension().and_then(|e| e.to_str()))
    }

    /// Parse a file, using the cache if available.
    pub fn parse(&self, source: &[u8], path: &Path) -> Result<ParseResult, ParseError> {
        let lang = self
            .detect_language(path)
            .ok_or_else(|| ParseError::UnsupportedLanguage {
                extension: path
                    .extension()
                    .and_then(|e| e.to_str())
                    .unwrap_or("unknown")
                    .to_string(),
            })?;

        let content_hash = hash_content(source);
        if let Some(cached) = self.cache.get(content_hash) {
            return Ok(cached);
        }

        let result = self.parser_for(lang).parse(source, path)?;
        self.cache.insert(content_hash, result.clone());
        Ok(result)
    }

    pub fn cache_entry_count(&self) -> u64 {
        self.cache.entry_count()
    }
}

impl Default for ParserManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_typescript_and_caches() {
        let manager = ParserManager::new();
        let source = b"export function GET() { return new Response() }";
        let result = manager
            .parse(source, Path::new("app/api/health/route.ts"))
            .unwrap();
        assert_eq!(result.language, Language::TypeScript);
        assert!(!result.has_errors);

        let again = manager
            .parse(source, Path::new("app/api/health/route.ts"))
            .unwrap();
        assert_eq!(result.content_hash, again.content_hash);
    }

    #[test]
    fn rejects_unknown_extension() {
        let manager = ParserManager::new();
        let err = manager.parse(b"print(1)", Path::new("script.py")).unwrap_err();
        assert!(matches!(err, ParseError::UnsupportedLanguage { .. }));
    }
}
