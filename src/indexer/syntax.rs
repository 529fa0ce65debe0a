//! Closed classification of top-level syntax nodes.
//!
//! Every direct child of a program is mapped to exactly one variant here and
//! the extractor handles each variant in its own branch.

use tree_sitter::Node;

/// A declaration that can appear at top level, either bare or exported
#[derive(Debug, Clone, Copy)]
pub(crate) enum Declaration<'t> {
    /// `function f() {}`, `function* f() {}`, or an ambient `declare function f();`
    Function(Node<'t>),
    /// `const` / `let` / `var` statement holding one or more declarators
    Variables(Node<'t>),
    Class(Node<'t>),
    Interface(Node<'t>),
    TypeAlias(Node<'t>),
    Enum(Node<'t>),
}

impl<'t> Declaration<'t> {
    pub(crate) fn from_node(node: Node<'t>) -> Option<Self> {
        match node.kind() {
            "function_declaration" | "generator_function_declaration" => {
                Some(Declaration::Function(node))
            }
            "lexical_declaration" | "variable_declaration" => Some(Declaration::Variables(node)),
            "class_declaration" | "abstract_class_declaration" => Some(Declaration::Class(node)),
            "interface_declaration" => Some(Declaration::Interface(node)),
            "type_alias_declaration" => Some(Declaration::TypeAlias(node)),
            "enum_declaration" => Some(Declaration::Enum(node)),
            // A bare `function_signature` outside `declare` is an overload;
            // its implementation follows and is the one recorded
            "ambient_declaration" => {
                let mut cursor = node.walk();
                node.named_children(&mut cursor).find_map(|child| {
                    if child.kind() == "function_signature" {
                        Some(Declaration::Function(child))
                    } else {
                        Declaration::from_node(child)
                    }
                })
            }
            _ => None,
        }
    }
}

/// What an `export` statement carries
#[derive(Debug, Clone, Copy)]
pub(crate) enum ExportBody<'t> {
    /// `export <decl>` or `export default <named decl>`
    Declaration {
        declaration: Declaration<'t>,
        is_default: bool,
    },
    /// `export default <expression>`
    DefaultValue(Node<'t>),
    /// `export { a, b }`, `export * from "x"`; not recorded
    ReExport,
}

/// One direct child of the program node
#[derive(Debug, Clone, Copy)]
pub(crate) enum TopLevel<'t> {
    Import(Node<'t>),
    Export {
        statement: Node<'t>,
        body: ExportBody<'t>,
    },
    Declaration(Declaration<'t>),
    Comment,
    Other,
}

impl<'t> TopLevel<'t> {
    pub(crate) fn classify(node: Node<'t>) -> Self {
        match node.kind() {
            "import_statement" => TopLevel::Import(node),
            "export_statement" => TopLevel::Export {
                statement: node,
                body: export_body(node),
            },
            "comment" => TopLevel::Comment,
            _ => match Declaration::from_node(node) {
                Some(declaration) => TopLevel::Declaration(declaration),
                None => TopLevel::Other,
            },
        }
    }
}

fn export_body<'t>(statement: Node<'t>) -> ExportBody<'t> {
    let is_default = has_token(statement, "default");

    if let Some(declaration) = statement
        .child_by_field_name("declaration")
        .and_then(Declaration::from_node)
    {
        return ExportBody::Declaration {
            declaration,
            is_default,
        };
    }

    if is_default && let Some(value) = statement.child_by_field_name("value") {
        // Named function or class expressions read the same as declarations
        if value.child_by_field_name("name").is_some() {
            let declaration = match value.kind() {
                "function_expression" | "function" | "generator_function" => {
                    Some(Declaration::Function(value))
                }
                "class" => Some(Declaration::Class(value)),
                _ => None,
            };
            if let Some(declaration) = declaration {
                return ExportBody::Declaration {
                    declaration,
                    is_default,
                };
            }
        }
        return ExportBody::DefaultValue(value);
    }

    ExportBody::ReExport
}

/// Whether `node` has an anonymous child token with this exact text (e.g. `async`, `type`)
pub(crate) fn has_token(node: Node, token: &str) -> bool {
    let mut cursor = node.walk();
    node.children(&mut cursor)
        .any(|child| !child.is_named() && child.kind() == token)
}

/// Whether a node is a function literal that can initialise a binding
pub(crate) fn is_function_literal(node: Node) -> bool {
    matches!(
        node.kind(),
        "arrow_function" | "function_expression" | "function" | "generator_function"
    )
}
