//! Doc comment lookup and cleanup

use tree_sitter::Node;

/// Comment block ending on the line directly above `node`, if any.
///
/// Consecutive `//` lines are merged into one block.
pub(crate) fn doc_comment_before(node: Node, source: &str) -> Option<String> {
    let mut block = Vec::new();
    let mut next_start_row = node.start_position().row;
    let mut prev = node.prev_sibling();

    while let Some(sibling) = prev {
        if sibling.kind() != "comment" || sibling.end_position().row + 1 < next_start_row {
            break;
        }
        block.push(sibling);
        next_start_row = sibling.start_position().row;
        prev = sibling.prev_sibling();
    }

    block.reverse();
    join_comments(&block, source)
}

/// Leading comment block of a file: the comments before its first statement
pub(crate) fn leading_comment_block(root: Node, source: &str) -> Option<String> {
    let mut block: Vec<Node> = Vec::new();
    let mut cursor = root.walk();

    for child in root.named_children(&mut cursor) {
        match child.kind() {
            "hash_bang_line" => continue,
            "comment" => {
                if let Some(last) = block.last()
                    && child.start_position().row > last.end_position().row + 1
                {
                    break;
                }
                block.push(child);
            }
            _ => break,
        }
    }

    join_comments(&block, source)
}

fn join_comments(block: &[Node], source: &str) -> Option<String> {
    let text = block
        .iter()
        .map(|n| clean_comment(&source[n.byte_range()]))
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    if text.is_empty() { None } else { Some(text) }
}

/// Strip comment markers, keeping the prose
pub(crate) fn clean_comment(comment: &str) -> String {
    comment
        .lines()
        .map(|line| {
            let mut s = line.trim();
            for prefix in ["/**", "/*", "//", "*/", "*"] {
                s = s.trim_start_matches(prefix);
            }
            s.trim_end_matches("*/").trim().to_string()
        })
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indexer::ast_parser::AstParser;

    #[test]
    fn test_clean_jsdoc() {
        let comment = "/**\n * Fetch a user.\n * @param id the user id\n */";
        assert_eq!(clean_comment(comment), "Fetch a user.\n@param id the user id");
    }

    #[test]
    fn test_clean_line_comment() {
        assert_eq!(clean_comment("// hello world"), "hello world");
        assert_eq!(clean_comment("/* inline */"), "inline");
    }

    #[test]
    fn test_clean_empty_comment() {
        assert_eq!(clean_comment("/** */"), "");
        assert_eq!(clean_comment("//"), "");
    }

    #[test]
    fn test_doc_comment_directly_above() {
        let source = "const a = 1;\n// first\n// second\nfunction f() {}\n";
        let mut parser = AstParser::for_extension("ts").unwrap();
        let tree = parser.parse(source).unwrap();
        let root = tree.root_node();
        let func = root.named_child(root.named_child_count() - 1).unwrap();

        assert_eq!(
            doc_comment_before(func, source),
            Some("first\nsecond".to_string())
        );
    }

    #[test]
    fn test_doc_comment_separated_by_blank_line_is_ignored() {
        let source = "// unrelated\n\nfunction f() {}\n";
        let mut parser = AstParser::for_extension("ts").unwrap();
        let tree = parser.parse(source).unwrap();
        let root = tree.root_node();
        let func = root.named_child(1).unwrap();

        assert_eq!(doc_comment_before(func, source), None);
    }

    #[test]
    fn test_leading_comment_block() {
        let source = "/**\n * User helpers.\n */\n\nimport x from 'x';\n// not leading\n";
        let mut parser = AstParser::for_extension("ts").unwrap();
        let tree = parser.parse(source).unwrap();

        assert_eq!(
            leading_comment_block(tree.root_node(), source),
            Some("User helpers.".to_string())
        );
    }

    #[test]
    fn test_no_leading_comment() {
        let source = "import x from 'x';\n// later\n";
        let mut parser = AstParser::for_extension("ts").unwrap();
        let tree = parser.parse(source).unwrap();

        assert_eq!(leading_comment_block(tree.root_node(), source), None);
    }
}
