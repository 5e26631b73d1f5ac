//! Language detection from file extension.

use serde::{Deserialize, Serialize};

/// Languages the extractor parses. Route definitions only ever live in
/// TypeScript or JavaScript sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    TypeScript,
    JavaScript,
}

impl Language {
    /// Detect language from a file extension string.
    pub fn from_extension(ext: Option<&str>) -> Option<Language> {
        match ext? {
            "ts" | "tsx" | "mts" | "cts" => Some(Language::TypeScript),
            "js" | "jsx" | "mjs" | "cjs" => Some(Language::JavaScript),
            _ => None,
        }
    }

    /// Returns the display name of the language.
    pub fn name(&self) -> &'static str {
        match self {
            Language::TypeScript => "TypeScript",
            Language::JavaScript => "JavaScript",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_typescript_variants() {
        for ext in ["ts", "tsx", "mts", "cts"] {
            assert_eq!(Language::from_extension(Some(ext)), Some(Language::TypeScript));
        }
        assert_eq!(Language::from_extension(Some("js")), Some(Language::JavaScript));
        assert_eq!(Language::from_extension(Some("py")), None);
        assert_eq!(Language::from_extension(None), None);
    }
}
