//! Follow-up question suggestions

use crate::types::{FileKind, FileRecord};

/// Signals a candidate question depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Signal {
    ApiRoute,
    Component,
    Dependencies,
}

/// Candidate questions in the order they are offered
const CATALOG: &[(Signal, &str)] = &[
    (
        Signal::ApiRoute,
        "How are the API routes authenticated and validated?",
    ),
    (Signal::ApiRoute, "What data do these API endpoints return?"),
    (
        Signal::Component,
        "Which components use these props or hooks?",
    ),
    (Signal::Component, "How is state managed in these components?"),
    (
        Signal::Dependencies,
        "Which external libraries does this feature depend on?",
    ),
];

/// Suggest follow-up questions from the signals present in the relevant files
pub fn suggest_follow_ups(files: &[&FileRecord], max: usize) -> Vec<String> {
    let present = |signal: Signal| {
        files.iter().any(|file| match signal {
            Signal::ApiRoute => file.kind == FileKind::ApiRoute,
            Signal::Component => file.kind == FileKind::Component,
            Signal::Dependencies => !file.dependencies.is_empty(),
        })
    };

    let mut suggestions: Vec<String> = Vec::new();
    for (signal, question) in CATALOG {
        if suggestions.len() >= max {
            break;
        }
        if present(*signal) && !suggestions.iter().any(|s| s == question) {
            suggestions.push(question.to_string());
        }
    }
    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(kind: FileKind, dependencies: &[&str]) -> FileRecord {
        FileRecord {
            path: "x".to_string(),
            relative_path: "x".to_string(),
            kind,
            imports: vec![],
            exports: vec![],
            functions: vec![],
            components: vec![],
            types: vec![],
            api_routes: vec![],
            dependencies: dependencies.iter().map(|d| d.to_string()).collect(),
            description: None,
        }
    }

    #[test]
    fn test_no_signals() {
        let file = record(FileKind::Utility, &[]);
        assert!(suggest_follow_ups(&[&file], 3).is_empty());
    }

    #[test]
    fn test_api_signal() {
        let file = record(FileKind::ApiRoute, &[]);
        assert_eq!(
            suggest_follow_ups(&[&file], 3),
            vec![
                "How are the API routes authenticated and validated?",
                "What data do these API endpoints return?",
            ]
        );
    }

    #[test]
    fn test_capped_in_catalog_order() {
        let route = record(FileKind::ApiRoute, &["zod"]);
        let component = record(FileKind::Component, &[]);
        let suggestions = suggest_follow_ups(&[&component, &route], 3);

        assert_eq!(suggestions.len(), 3);
        assert_eq!(
            suggestions[0],
            "How are the API routes authenticated and validated?"
        );
        assert_eq!(suggestions[2], "Which components use these props or hooks?");
    }

    #[test]
    fn test_dependencies_signal() {
        let file = record(FileKind::Utility, &["lodash"]);
        assert_eq!(
            suggest_follow_ups(&[&file], 3),
            vec!["Which external libraries does this feature depend on?"]
        );
    }

    #[test]
    fn test_zero_cap() {
        let file = record(FileKind::ApiRoute, &["zod"]);
        assert!(suggest_follow_ups(&[&file], 0).is_empty());
    }
}
