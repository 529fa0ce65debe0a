use super::language::SourceLanguage;
use crate::error::ExtractionCause;
use tree_sitter::{Node, Parser, Tree};

/// Syntax-tree parser for one script dialect
pub struct AstParser {
    parser: Parser,
    language: SourceLanguage,
}

impl AstParser {
    /// Create a new AST parser for the given file extension
    pub fn for_extension(extension: &str) -> Result<Self, ExtractionCause> {
        let language = SourceLanguage::from_extension(extension)
            .ok_or_else(|| ExtractionCause::UnsupportedExtension(extension.to_string()))?;
        Self::new(language)
    }

    pub fn new(language: SourceLanguage) -> Result<Self, ExtractionCause> {
        let mut parser = Parser::new();
        parser
            .set_language(&language.grammar())
            .map_err(|e| ExtractionCause::ParserUnavailable(e.to_string()))?;

        Ok(Self { parser, language })
    }

    /// Parse source text into a tree.
    ///
    /// Tree-sitter recovers from errors, so a tree containing error or
    /// missing nodes is rejected with the position of the first one.
    pub fn parse(&mut self, source_code: &str) -> Result<Tree, ExtractionCause> {
        let tree = self.parser.parse(source_code, None).ok_or_else(|| {
            ExtractionCause::ParserUnavailable("parser returned no tree".to_string())
        })?;

        let root = tree.root_node();
        if root.has_error() {
            let (line, column) = first_error_position(root).unwrap_or((1, 1));
            return Err(ExtractionCause::Syntax { line, column });
        }

        Ok(tree)
    }

    pub fn language(&self) -> SourceLanguage {
        self.language
    }
}

/// 1-based (line, column) of the first error or missing node, depth-first
fn first_error_position(node: Node) -> Option<(usize, usize)> {
    if node.is_error() || node.is_missing() {
        let pos = node.start_position();
        return Some((pos.row + 1, pos.column + 1));
    }
    if !node.has_error() {
        return None;
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(pos) = first_error_position(child) {
            return Some(pos);
        }
    }
    None
}
