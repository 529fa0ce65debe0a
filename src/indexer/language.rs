//! Source language detection from file extensions

use tree_sitter::Language;

/// Script dialects the extractor understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceLanguage {
    TypeScript,
    Tsx,
    JavaScript,
    Jsx,
}

impl SourceLanguage {
    /// Detect the dialect from a file extension (without the dot)
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_lowercase().as_str() {
            "ts" | "mts" | "cts" => Some(SourceLanguage::TypeScript),
            "tsx" => Some(SourceLanguage::Tsx),
            "js" | "mjs" | "cjs" => Some(SourceLanguage::JavaScript),
            "jsx" => Some(SourceLanguage::Jsx),
            _ => None,
        }
    }

    /// Tree-sitter grammar for this dialect
    pub fn grammar(&self) -> Language {
        match self {
            SourceLanguage::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            SourceLanguage::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
            // The JavaScript grammar parses JSX natively
            SourceLanguage::JavaScript | SourceLanguage::Jsx => {
                tree_sitter_javascript::LANGUAGE.into()
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SourceLanguage::TypeScript => "TypeScript",
            SourceLanguage::Tsx => "TypeScript (TSX)",
            SourceLanguage::JavaScript => "JavaScript",
            SourceLanguage::Jsx => "JavaScript (JSX)",
        }
    }
}
