//! Metadata extraction: one source file in, one structural record out.
//!
//! Extraction is a pure function of `(text, path, root)`. Only identifiers,
//! type-annotation text and comments are copied into the record; statement
//! bodies are never read except to collect the names of hooks a component
//! calls.

use super::ast_parser::AstParser;
use super::classify::classify_path;
use super::comments::{doc_comment_before, leading_comment_block};
use super::syntax::{has_token, is_function_literal, Declaration, ExportBody, TopLevel};
use crate::error::ExtractionError;
use crate::types::{
    ApiRouteRecord, ComponentRecord, ExportKind, ExportRecord, FileKind, FileRecord,
    FunctionRecord, HttpMethod, ImportRecord, Parameter, PropertyRecord, TypeKind, TypeRecord,
};
use regex::Regex;
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::LazyLock;
use tree_sitter::Node;

/// React hook naming convention: `use` followed by an uppercase letter
static HOOK_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^use[A-Z]").expect("hook pattern is valid"));

/// Return-type names that mark a function as rendering UI
const UI_ELEMENT_TYPES: &[&str] = &["JSX.Element", "ReactElement", "ReactNode"];

/// Longest literal kept verbatim as a parameter default
const MAX_DEFAULT_LITERAL_LEN: usize = 40;

/// Placeholder for parameter defaults that are not plain literals
const ELIDED_DEFAULT: &str = "...";

/// Extract the structural record of one file.
///
/// `path` is the file location, `root` the project root it is reported
/// relative to. A syntax error fails this file only.
pub fn extract_file_record(
    source: &str,
    path: &Path,
    root: &Path,
) -> Result<FileRecord, ExtractionError> {
    let relative_path = relative_path(path, root);
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();

    let tree = AstParser::for_extension(extension)
        .and_then(|mut parser| parser.parse(source))
        .map_err(|cause| ExtractionError::new(relative_path.clone(), cause))?;
    let root_node = tree.root_node();

    let kind = classify_path(&relative_path);
    let mut builder = RecordBuilder::new(source, kind);

    let mut cursor = root_node.walk();
    for child in root_node.named_children(&mut cursor) {
        builder.visit(child);
    }

    tracing::debug!(
        "Extracted {} ({}): {} functions, {} components, {} types, {} routes",
        relative_path,
        kind,
        builder.functions.len(),
        builder.components.len(),
        builder.types.len(),
        builder.api_routes.len()
    );

    Ok(builder.finish(
        path.to_string_lossy().to_string(),
        relative_path,
        leading_comment_block(root_node, source),
    ))
}

/// `/`-separated path of `path` relative to `root`, or `path` itself when it
/// lies outside `root`
pub fn relative_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

/// A function is a component when its name is capitalised and its declared
/// return type names a UI element type.
///
/// Components without a return-type annotation are not detected.
pub fn is_component(name: &str, return_type: Option<&str>) -> bool {
    name.chars().next().is_some_and(|c| c.is_ascii_uppercase())
        && return_type.is_some_and(|ty| UI_ELEMENT_TYPES.iter().any(|ui| ty.contains(ui)))
}

/// Accumulates the record of one file while its top-level nodes are visited
struct RecordBuilder<'s> {
    source: &'s str,
    kind: FileKind,
    imports: Vec<ImportRecord>,
    exports: Vec<ExportRecord>,
    functions: Vec<FunctionRecord>,
    components: Vec<ComponentRecord>,
    types: Vec<TypeRecord>,
    api_routes: Vec<ApiRouteRecord>,
}

/// Parameter list, return type and async flag of a function-like node
struct Signature {
    parameters: Vec<Parameter>,
    return_type: Option<String>,
    is_async: bool,
}

impl<'s> RecordBuilder<'s> {
    fn new(source: &'s str, kind: FileKind) -> Self {
        Self {
            source,
            kind,
            imports: Vec::new(),
            exports: Vec::new(),
            functions: Vec::new(),
            components: Vec::new(),
            types: Vec::new(),
            api_routes: Vec::new(),
        }
    }

    fn visit(&mut self, node: Node) {
        match TopLevel::classify(node) {
            TopLevel::Import(import) => {
                if let Some(record) = self.import_record(import) {
                    self.imports.push(record);
                }
            }
            TopLevel::Export { statement, body } => match body {
                ExportBody::Declaration {
                    declaration,
                    is_default,
                } => {
                    self.export_records(declaration, is_default);
                    let doc = doc_comment_before(statement, self.source);
                    self.declaration(declaration, true, doc);
                }
                ExportBody::DefaultValue(value) => {
                    let name = if value.kind() == "identifier" {
                        self.text(value).to_string()
                    } else {
                        "default".to_string()
                    };
                    self.exports.push(ExportRecord {
                        name,
                        kind: ExportKind::Default,
                    });
                }
                ExportBody::ReExport => {}
            },
            TopLevel::Declaration(declaration) => {
                let doc = doc_comment_before(node, self.source);
                self.declaration(declaration, false, doc);
            }
            TopLevel::Comment | TopLevel::Other => {}
        }
    }

    fn declaration(&mut self, declaration: Declaration, exported: bool, doc: Option<String>) {
        match declaration {
            Declaration::Function(func) => {
                if let Some(name) = self.field_text(func, "name") {
                    self.function_like(name, func, exported, doc);
                }
            }
            Declaration::Variables(statement) => {
                let mut cursor = statement.walk();
                for declarator in statement.named_children(&mut cursor) {
                    if declarator.kind() != "variable_declarator" {
                        continue;
                    }
                    let Some(name) = declarator
                        .child_by_field_name("name")
                        .filter(|n| n.kind() == "identifier")
                    else {
                        continue;
                    };
                    let Some(value) = declarator
                        .child_by_field_name("value")
                        .filter(|v| is_function_literal(*v))
                    else {
                        continue;
                    };
                    let name = self.text(name).to_string();
                    self.function_like(name, value, exported, doc.clone());
                }
            }
            // Classes only contribute export records
            Declaration::Class(_) => {}
            Declaration::Interface(node) => {
                let body = node.child_by_field_name("body");
                self.type_record(node, TypeKind::Interface, body, doc);
            }
            Declaration::TypeAlias(node) => {
                let body = node
                    .child_by_field_name("value")
                    .filter(|v| v.kind() == "object_type");
                self.type_record(node, TypeKind::Type, body, doc);
            }
            Declaration::Enum(node) => {
                let body = node.child_by_field_name("body");
                self.type_record(node, TypeKind::Enum, body, doc);
            }
        }
    }

    fn function_like(&mut self, name: String, func: Node, exported: bool, doc: Option<String>) {
        let signature = self.signature(func);

        if is_component(&name, signature.return_type.as_deref()) {
            self.components.push(ComponentRecord {
                props_type: signature
                    .parameters
                    .first()
                    .and_then(|p| p.type_annotation.clone()),
                hooks_used: self.hooks_used(func),
                name,
                is_exported: exported,
                doc_comment: doc,
            });
            return;
        }

        if self.kind == FileKind::ApiRoute
            && let Some(http_method) = HttpMethod::from_handler_name(&name)
        {
            self.api_routes.push(ApiRouteRecord {
                http_method,
                handler_name: name.clone(),
                doc_comment: doc.clone(),
            });
        }

        self.functions.push(FunctionRecord {
            name,
            parameters: signature.parameters,
            return_type: signature.return_type,
            is_async: signature.is_async,
            is_exported: exported,
            doc_comment: doc,
        });
    }

    fn signature(&self, func: Node) -> Signature {
        let parameters = if let Some(params) = func.child_by_field_name("parameters") {
            self.parameters(params)
        } else if let Some(single) = func.child_by_field_name("parameter") {
            // `x => ...` arrow functions
            vec![Parameter {
                name: self.pattern_name(single),
                type_annotation: None,
                optional: false,
                default: None,
            }]
        } else {
            Vec::new()
        };

        Signature {
            parameters,
            return_type: func
                .child_by_field_name("return_type")
                .map(|n| self.annotation_text(n)),
            is_async: has_token(func, "async"),
        }
    }

    fn parameters(&self, params: Node) -> Vec<Parameter> {
        let mut cursor = params.walk();
        params
            .named_children(&mut cursor)
            .filter_map(|param| match param.kind() {
                "required_parameter" | "optional_parameter" => {
                    let default = param
                        .child_by_field_name("value")
                        .map(|v| self.default_text(v));
                    Some(Parameter {
                        name: param
                            .child_by_field_name("pattern")
                            .map(|p| self.pattern_name(p))
                            .unwrap_or_else(|| "_".to_string()),
                        type_annotation: param
                            .child_by_field_name("type")
                            .map(|t| self.annotation_text(t)),
                        optional: param.kind() == "optional_parameter" || default.is_some(),
                        default,
                    })
                }
                "assignment_pattern" => Some(Parameter {
                    name: param
                        .child_by_field_name("left")
                        .map(|p| self.pattern_name(p))
                        .unwrap_or_else(|| "_".to_string()),
                    type_annotation: None,
                    optional: true,
                    default: param
                        .child_by_field_name("right")
                        .map(|v| self.default_text(v)),
                }),
                "identifier" | "object_pattern" | "array_pattern" | "rest_pattern" => {
                    Some(Parameter {
                        name: self.pattern_name(param),
                        type_annotation: None,
                        optional: false,
                        default: None,
                    })
                }
                _ => None,
            })
            .collect()
    }

    /// Render a binding pattern as its identifiers only
    fn pattern_name(&self, pattern: Node) -> String {
        match pattern.kind() {
            "identifier" | "shorthand_property_identifier_pattern" | "this" => {
                self.text(pattern).to_string()
            }
            "rest_pattern" => {
                let inner = pattern
                    .named_child(0)
                    .map(|n| self.pattern_name(n))
                    .unwrap_or_default();
                format!("...{}", inner)
            }
            "assignment_pattern" | "object_assignment_pattern" => pattern
                .child_by_field_name("left")
                .map(|n| self.pattern_name(n))
                .unwrap_or_else(|| "_".to_string()),
            "pair_pattern" => pattern
                .child_by_field_name("key")
                .map(|n| self.text(n).to_string())
                .unwrap_or_else(|| "_".to_string()),
            "object_pattern" => format!("{{ {} }}", self.child_pattern_names(pattern).join(", ")),
            "array_pattern" => format!("[{}]", self.child_pattern_names(pattern).join(", ")),
            _ => "_".to_string(),
        }
    }

    fn child_pattern_names(&self, pattern: Node) -> Vec<String> {
        let mut cursor = pattern.walk();
        pattern
            .named_children(&mut cursor)
            .filter(|n| n.kind() != "comment")
            .map(|n| self.pattern_name(n))
            .collect()
    }

    /// Keep short literal or identifier defaults, elide anything else
    fn default_text(&self, value: Node) -> String {
        let text = self.text(value);
        let is_literal = matches!(
            value.kind(),
            "string" | "number" | "true" | "false" | "null" | "undefined" | "identifier"
        ) || (matches!(value.kind(), "array" | "object") && value.named_child_count() == 0);

        if is_literal && text.len() <= MAX_DEFAULT_LITERAL_LEN && !text.contains('\n') {
            text.to_string()
        } else {
            ELIDED_DEFAULT.to_string()
        }
    }

    /// Type annotation text without the leading colon, whitespace collapsed
    fn annotation_text(&self, node: Node) -> String {
        self.text(node)
            .trim_start()
            .trim_start_matches(':')
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Names of `useXxx` hooks called inside a function, in first-seen order
    fn hooks_used(&self, func: Node) -> Vec<String> {
        let Some(body) = func.child_by_field_name("body") else {
            return Vec::new();
        };

        let mut hooks: Vec<String> = Vec::new();
        let mut stack = vec![body];
        while let Some(node) = stack.pop() {
            if node.kind() == "call_expression"
                && let Some(callee) = node.child_by_field_name("function")
            {
                let name = match callee.kind() {
                    "identifier" => Some(self.text(callee)),
                    "member_expression" => callee
                        .child_by_field_name("property")
                        .map(|p| self.text(p)),
                    _ => None,
                };
                if let Some(name) = name
                    && is_hook_name(name)
                    && !hooks.iter().any(|h| h == name)
                {
                    hooks.push(name.to_string());
                }
            }

            let mut cursor = node.walk();
            let children: Vec<Node> = node.named_children(&mut cursor).collect();
            stack.extend(children.into_iter().rev());
        }
        hooks
    }

    fn import_record(&self, import: Node) -> Option<ImportRecord> {
        let source_node = import.child_by_field_name("source").or_else(|| {
            let mut cursor = import.walk();
            import
                .named_children(&mut cursor)
                .find(|n| n.kind() == "import_require_clause")
                .and_then(|clause| clause.child_by_field_name("source"))
        })?;
        let source = self
            .text(source_node)
            .trim_matches(|c| c == '"' || c == '\'' || c == '`')
            .to_string();

        let mut names = Vec::new();
        let mut is_default = false;

        let mut cursor = import.walk();
        let clauses: Vec<Node> = import
            .named_children(&mut cursor)
            .filter(|n| matches!(n.kind(), "import_clause" | "import_require_clause"))
            .collect();

        for clause in clauses {
            let mut clause_cursor = clause.walk();
            for part in clause.named_children(&mut clause_cursor) {
                match part.kind() {
                    "identifier" => {
                        is_default = clause.kind() == "import_clause";
                        names.push(self.text(part).to_string());
                    }
                    "namespace_import" => {
                        if let Some(id) = part.named_child(0) {
                            names.push(self.text(id).to_string());
                        }
                    }
                    "named_imports" => {
                        let mut spec_cursor = part.walk();
                        for spec in part.named_children(&mut spec_cursor) {
                            if spec.kind() != "import_specifier" {
                                continue;
                            }
                            if let Some(name) = self.field_text(spec, "name") {
                                names.push(name.trim_matches(['"', '\'']).to_string());
                            }
                        }
                    }
                    _ => {}
                }
            }
        }

        Some(ImportRecord {
            source,
            names,
            is_default,
            is_type_only: has_token(import, "type"),
        })
    }

    fn export_records(&mut self, declaration: Declaration, is_default: bool) {
        let kind_or_default = |kind: ExportKind| {
            if is_default {
                ExportKind::Default
            } else {
                kind
            }
        };

        match declaration {
            Declaration::Variables(statement) => {
                let mut cursor = statement.walk();
                for declarator in statement.named_children(&mut cursor) {
                    if declarator.kind() != "variable_declarator" {
                        continue;
                    }
                    if let Some(name) = declarator
                        .child_by_field_name("name")
                        .filter(|n| n.kind() == "identifier")
                    {
                        self.exports.push(ExportRecord {
                            name: self.text(name).to_string(),
                            kind: kind_or_default(ExportKind::Const),
                        });
                    }
                }
            }
            Declaration::Function(node)
            | Declaration::Class(node)
            | Declaration::Interface(node)
            | Declaration::TypeAlias(node)
            | Declaration::Enum(node) => {
                let kind = match declaration {
                    Declaration::Function(_) => ExportKind::Function,
                    Declaration::Class(_) => ExportKind::Class,
                    Declaration::Interface(_) => ExportKind::Interface,
                    _ => ExportKind::Type,
                };
                let name = self
                    .field_text(node, "name")
                    .unwrap_or_else(|| "default".to_string());
                self.exports.push(ExportRecord {
                    name,
                    kind: kind_or_default(kind),
                });
            }
        }
    }

    fn type_record(
        &mut self,
        node: Node,
        kind: TypeKind,
        body: Option<Node>,
        doc: Option<String>,
    ) {
        let Some(name) = self.field_text(node, "name") else {
            return;
        };
        let properties = body.map(|b| self.members(b)).unwrap_or_default();

        self.types.push(TypeRecord {
            name,
            kind,
            properties,
            doc_comment: doc,
        });
    }

    /// Members of an interface body, object type literal or enum body
    fn members(&self, body: Node) -> Vec<PropertyRecord> {
        let mut cursor = body.walk();
        body.named_children(&mut cursor)
            .filter_map(|member| {
                let doc_comment = doc_comment_before(member, self.source);
                match member.kind() {
                    "property_signature" => Some(PropertyRecord {
                        name: self.field_text(member, "name")?,
                        type_annotation: member
                            .child_by_field_name("type")
                            .map(|t| self.annotation_text(t))
                            .unwrap_or_default(),
                        optional: has_token(member, "?"),
                        doc_comment,
                    }),
                    "method_signature" => {
                        let signature = self.signature(member);
                        let params = signature
                            .parameters
                            .iter()
                            .map(|p| match &p.type_annotation {
                                Some(ty) => format!("{}: {}", p.name, ty),
                                None => p.name.clone(),
                            })
                            .collect::<Vec<_>>()
                            .join(", ");
                        Some(PropertyRecord {
                            name: self.field_text(member, "name")?,
                            type_annotation: format!(
                                "({}) => {}",
                                params,
                                signature.return_type.as_deref().unwrap_or("void")
                            ),
                            optional: has_token(member, "?"),
                            doc_comment,
                        })
                    }
                    // Enum members: `A` or `A = 1`
                    "property_identifier" => Some(PropertyRecord {
                        name: self.text(member).to_string(),
                        type_annotation: String::new(),
                        optional: false,
                        doc_comment,
                    }),
                    "enum_assignment" => Some(PropertyRecord {
                        name: self.field_text(member, "name")?,
                        type_annotation: member
                            .child_by_field_name("value")
                            .map(|v| self.default_text(v))
                            .unwrap_or_default(),
                        optional: false,
                        doc_comment,
                    }),
                    _ => None,
                }
            })
            .collect()
    }

    fn finish(
        self,
        path: String,
        relative_path: String,
        description: Option<String>,
    ) -> FileRecord {
        let dependencies: BTreeSet<String> = self
            .imports
            .iter()
            .filter(|import| is_external_module(&import.source))
            .map(|import| import.source.clone())
            .collect();

        FileRecord {
            path,
            relative_path,
            kind: self.kind,
            imports: self.imports,
            exports: self.exports,
            functions: self.functions,
            components: self.components,
            types: self.types,
            api_routes: self.api_routes,
            dependencies: dependencies.into_iter().collect(),
            description,
        }
    }

    fn text(&self, node: Node) -> &'s str {
        node.utf8_text(self.source.as_bytes()).unwrap_or_default()
    }

    fn field_text(&self, node: Node, field: &str) -> Option<String> {
        node.child_by_field_name(field)
            .map(|n| self.text(n).to_string())
            .filter(|s| !s.trim().is_empty())
    }
}

fn is_hook_name(name: &str) -> bool {
    HOOK_NAME.is_match(name)
}

/// Module specifiers that do not start with a relative-path marker
fn is_external_module(source: &str) -> bool {
    !source.is_empty() && !source.starts_with('.') && !source.starts_with('/')
}
