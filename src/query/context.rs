//! Rendering of ranked records into generator context and source snippets

use crate::config::QueryConfig;
use crate::types::{FileRecord, FunctionRecord};
use std::fmt::Write as _;

/// Separator placed between rendered files
pub const FILE_SEPARATOR: &str = "\n\n---\n\n";

/// Render the structural context for the given files, in rank order
pub fn build_context(files: &[&FileRecord], config: &QueryConfig) -> String {
    files
        .iter()
        .map(|file| render_file(file, config))
        .collect::<Vec<_>>()
        .join(FILE_SEPARATOR)
}

fn render_file(file: &FileRecord, config: &QueryConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "File: {}", file.relative_path);
    let _ = write!(out, "Type: {}", file.kind);

    if let Some(description) = &file.description {
        let _ = write!(out, "\nDescription: {}", one_line(description));
    }

    if !file.api_routes.is_empty() {
        out.push_str("\nAPI Routes:");
        for route in &file.api_routes {
            let _ = write!(out, "\n  - {} {}", route.http_method, route.handler_name);
            if let Some(doc) = &route.doc_comment {
                let _ = write!(out, ": {}", one_line(doc));
            }
        }
    }

    if !file.functions.is_empty() {
        out.push_str("\nFunctions:");
        for func in file.functions.iter().take(config.max_context_functions) {
            let _ = write!(out, "\n  - {}", signature(func));
            if let Some(doc) = &func.doc_comment {
                let _ = write!(out, ": {}", one_line(doc));
            }
        }
    }

    if !file.components.is_empty() {
        out.push_str("\nComponents:");
        for component in &file.components {
            let _ = write!(out, "\n  - {}", component.name);
            if let Some(props) = &component.props_type {
                let _ = write!(out, " (props: {})", props);
            }
            if let Some(doc) = &component.doc_comment {
                let _ = write!(out, ": {}", one_line(doc));
            }
        }
    }

    if !file.types.is_empty() {
        out.push_str("\nTypes:");
        for ty in file.types.iter().take(config.max_context_types) {
            let _ = write!(out, "\n  - {} {}", ty.kind, ty.name);
            if let Some(doc) = &ty.doc_comment {
                let _ = write!(out, ": {}", one_line(doc));
            }
        }
    }

    if !file.dependencies.is_empty() {
        let _ = write!(out, "\nDependencies: {}", file.dependencies.join(", "));
    }

    out
}

/// `name(a: T, b) -> R`
fn signature(func: &FunctionRecord) -> String {
    let params = func
        .parameters
        .iter()
        .map(|p| match &p.type_annotation {
            Some(ty) => format!("{}: {}", p.name, ty),
            None => p.name.clone(),
        })
        .collect::<Vec<_>>()
        .join(", ");

    match &func.return_type {
        Some(ret) => format!("{}({}) -> {}", func.name, params, ret),
        None => format!("{}({})", func.name, params),
    }
}

fn one_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// One-line summary of the names a file defines, never bodies
pub fn snippet(file: &FileRecord) -> String {
    let mut sections = Vec::new();

    if !file.functions.is_empty() {
        let names: Vec<&str> = file.functions.iter().map(|f| f.name.as_str()).collect();
        sections.push(format!("Functions: {}", names.join(", ")));
    }
    if !file.components.is_empty() {
        let names: Vec<&str> = file.components.iter().map(|c| c.name.as_str()).collect();
        sections.push(format!("Components: {}", names.join(", ")));
    }
    if !file.api_routes.is_empty() {
        let methods: Vec<&str> = file
            .api_routes
            .iter()
            .map(|r| r.http_method.as_str())
            .collect();
        sections.push(format!("Routes: {}", methods.join(", ")));
    }

    sections.join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        ApiRouteRecord, ComponentRecord, FileKind, HttpMethod, Parameter, TypeKind, TypeRecord,
    };

    fn record(relative_path: &str, kind: FileKind) -> FileRecord {
        FileRecord {
            path: relative_path.to_string(),
            relative_path: relative_path.to_string(),
            kind,
            imports: vec![],
            exports: vec![],
            functions: vec![],
            components: vec![],
            types: vec![],
            api_routes: vec![],
            dependencies: vec![],
            description: None,
        }
    }

    fn function(name: &str) -> FunctionRecord {
        FunctionRecord {
            name: name.to_string(),
            parameters: vec![],
            return_type: None,
            is_async: false,
            is_exported: false,
            doc_comment: None,
        }
    }

    #[test]
    fn test_render_route_file() {
        let mut file = record("app/api/users/route.ts", FileKind::ApiRoute);
        file.description = Some("User endpoints.".to_string());
        file.api_routes.push(ApiRouteRecord {
            http_method: HttpMethod::Get,
            handler_name: "GET".to_string(),
            doc_comment: Some("List users\nwith paging".to_string()),
        });
        let mut get = function("GET");
        get.parameters.push(Parameter {
            name: "request".to_string(),
            type_annotation: Some("Request".to_string()),
            optional: false,
            default: None,
        });
        get.return_type = Some("Promise<Response>".to_string());
        file.functions.push(get);
        file.dependencies.push("next/server".to_string());

        let context = build_context(&[&file], &QueryConfig::default());
        assert_eq!(
            context,
            "File: app/api/users/route.ts\n\
             Type: api-route\n\
             Description: User endpoints.\n\
             API Routes:\n  - GET GET: List users with paging\n\
             Functions:\n  - GET(request: Request) -> Promise<Response>\n\
             Dependencies: next/server"
        );
    }

    #[test]
    fn test_function_and_type_limits() {
        let mut file = record("lib/many.ts", FileKind::Utility);
        for i in 0..8 {
            file.functions.push(function(&format!("fn{}", i)));
        }
        for i in 0..5 {
            file.types.push(TypeRecord {
                name: format!("T{}", i),
                kind: TypeKind::Interface,
                properties: vec![],
                doc_comment: None,
            });
        }

        let context = build_context(&[&file], &QueryConfig::default());
        assert!(context.contains("fn4()"));
        assert!(!context.contains("fn5()"));
        assert!(context.contains("interface T2"));
        assert!(!context.contains("interface T3"));
    }

    #[test]
    fn test_files_joined_with_separator() {
        let a = record("a.ts", FileKind::Utility);
        let b = record("b.ts", FileKind::Config);
        let context = build_context(&[&a, &b], &QueryConfig::default());
        assert_eq!(
            context,
            "File: a.ts\nType: utility\n\n---\n\nFile: b.ts\nType: config"
        );
    }

    #[test]
    fn test_component_rendering() {
        let mut file = record("components/Card.tsx", FileKind::Component);
        file.components.push(ComponentRecord {
            name: "Card".to_string(),
            props_type: Some("CardProps".to_string()),
            is_exported: true,
            hooks_used: vec!["useState".to_string()],
            doc_comment: None,
        });
        let context = build_context(&[&file], &QueryConfig::default());
        assert!(context.contains("Components:\n  - Card (props: CardProps)"));
    }

    #[test]
    fn test_snippet_lists_names_only() {
        let mut file = record("app/api/users/route.ts", FileKind::ApiRoute);
        file.functions.push(function("GET"));
        file.functions.push(function("POST"));
        for method in [HttpMethod::Get, HttpMethod::Post] {
            file.api_routes.push(ApiRouteRecord {
                http_method: method,
                handler_name: method.as_str().to_string(),
                doc_comment: None,
            });
        }
        assert_eq!(snippet(&file), "Functions: GET, POST | Routes: GET, POST");
        assert_eq!(snippet(&record("x.ts", FileKind::Utility)), "");
    }
}
