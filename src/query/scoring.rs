//! Keyword scoring over precomputed per-file search text

use crate::config::ScoringConfig;
use crate::types::{FileKind, FileRecord};

/// Lowercase searchable text of one file, built from metadata fields only
#[derive(Debug, Clone, PartialEq)]
pub struct SearchDocument {
    pub blob: String,
    pub path: String,
    pub kind: FileKind,
}

impl SearchDocument {
    pub fn from_record(file: &FileRecord) -> Self {
        Self {
            blob: search_blob(file),
            path: file.relative_path.to_lowercase(),
            kind: file.kind,
        }
    }
}

/// Space-joined metadata values of a record, lowercased
pub fn search_blob(file: &FileRecord) -> String {
    let mut parts: Vec<&str> = vec![file.relative_path.as_str(), file.kind.as_str()];

    if let Some(description) = &file.description {
        parts.push(description);
    }
    for import in &file.imports {
        parts.push(&import.source);
        parts.extend(import.names.iter().map(String::as_str));
    }
    parts.extend(file.exports.iter().map(|e| e.name.as_str()));
    for func in &file.functions {
        parts.push(&func.name);
        for param in &func.parameters {
            parts.push(&param.name);
            parts.extend(param.type_annotation.as_deref());
        }
        parts.extend(func.return_type.as_deref());
        parts.extend(func.doc_comment.as_deref());
    }
    for component in &file.components {
        parts.push(&component.name);
        parts.extend(component.props_type.as_deref());
        parts.extend(component.hooks_used.iter().map(String::as_str));
        parts.extend(component.doc_comment.as_deref());
    }
    for ty in &file.types {
        parts.push(&ty.name);
        parts.extend(ty.doc_comment.as_deref());
        for property in &ty.properties {
            parts.push(&property.name);
            parts.push(&property.type_annotation);
            parts.extend(property.doc_comment.as_deref());
        }
    }
    for route in &file.api_routes {
        parts.push(route.http_method.as_str());
        parts.push(&route.handler_name);
        parts.extend(route.doc_comment.as_deref());
    }
    parts.extend(file.dependencies.iter().map(String::as_str));

    parts.join(" ").to_lowercase()
}

/// Applies a [`ScoringConfig`] to search documents
pub struct Scorer<'a> {
    config: &'a ScoringConfig,
}

impl<'a> Scorer<'a> {
    pub fn new(config: &'a ScoringConfig) -> Self {
        Self { config }
    }

    /// Score one document.
    ///
    /// Each keyword adds `keyword_weight` per occurrence in the blob, plus
    /// `path_match_bonus` once if it occurs in the path. The sum is then
    /// multiplied by every kind boost whose trigger occurs in the question.
    pub fn score(&self, document: &SearchDocument, keywords: &[String], question: &str) -> f64 {
        let base: u64 = keywords
            .iter()
            .map(|keyword| {
                let occurrences = document.blob.matches(keyword.as_str()).count() as u64;
                let path_bonus = if document.path.contains(keyword.as_str()) {
                    u64::from(self.config.path_match_bonus)
                } else {
                    0
                };
                u64::from(self.config.keyword_weight) * occurrences + path_bonus
            })
            .sum();

        if base == 0 {
            return 0.0;
        }

        let question = question.to_lowercase();
        self.config
            .kind_boosts
            .iter()
            .filter(|boost| boost.kind == document.kind && question.contains(&boost.trigger))
            .fold(base as f64, |score, boost| score * boost.factor)
    }
}
