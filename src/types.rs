use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Structural category of a source file, derived from its path
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileKind {
    Component,
    ApiRoute,
    Utility,
    Type,
    Config,
}

impl FileKind {
    /// All kinds, in the order they are reported in summaries and statistics
    pub const ALL: [FileKind; 5] = [
        FileKind::ApiRoute,
        FileKind::Component,
        FileKind::Type,
        FileKind::Config,
        FileKind::Utility,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FileKind::Component => "component",
            FileKind::ApiRoute => "api-route",
            FileKind::Utility => "utility",
            FileKind::Type => "type",
            FileKind::Config => "config",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structural summary of one source file.
///
/// Holds identifiers, type-annotation text and comments only. Statement
/// bodies are never copied into any field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    /// Path of the file as discovered on disk
    pub path: String,
    /// Path relative to the indexed root, always `/`-separated
    pub relative_path: String,
    pub kind: FileKind,
    #[serde(default)]
    pub imports: Vec<ImportRecord>,
    #[serde(default)]
    pub exports: Vec<ExportRecord>,
    #[serde(default)]
    pub functions: Vec<FunctionRecord>,
    #[serde(default)]
    pub components: Vec<ComponentRecord>,
    #[serde(default)]
    pub types: Vec<TypeRecord>,
    #[serde(default)]
    pub api_routes: Vec<ApiRouteRecord>,
    /// External module specifiers (non-relative imports), sorted and deduplicated
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Leading comment block of the file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRecord {
    /// Module specifier as written, without quotes
    pub source: String,
    #[serde(default)]
    pub names: Vec<String>,
    pub is_default: bool,
    pub is_type_only: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportKind {
    Function,
    Const,
    Class,
    Type,
    Interface,
    Default,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRecord {
    pub name: String,
    pub kind: ExportKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_annotation: Option<String>,
    pub optional: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionRecord {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<String>,
    pub is_async: bool,
    pub is_exported: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentRecord {
    pub name: String,
    /// Type annotation of the props parameter, if declared
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub props_type: Option<String>,
    pub is_exported: bool,
    #[serde(default)]
    pub hooks_used: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_comment: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Interface,
    Type,
    Enum,
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TypeKind::Interface => "interface",
            TypeKind::Type => "type",
            TypeKind::Enum => "enum",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRecord {
    pub name: String,
    #[serde(rename = "type", default)]
    pub type_annotation: String,
    pub optional: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeRecord {
    pub name: String,
    pub kind: TypeKind,
    #[serde(default)]
    pub properties: Vec<PropertyRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_comment: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    /// Match a handler name against the HTTP verb tokens, case-insensitively
    pub fn from_handler_name(name: &str) -> Option<Self> {
        match name.to_uppercase().as_str() {
            "GET" => Some(HttpMethod::Get),
            "POST" => Some(HttpMethod::Post),
            "PUT" => Some(HttpMethod::Put),
            "DELETE" => Some(HttpMethod::Delete),
            "PATCH" => Some(HttpMethod::Patch),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRouteRecord {
    pub http_method: HttpMethod,
    pub handler_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_comment: Option<String>,
}

/// Aggregate entity counts over every file in a snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexStatistics {
    pub total_functions: usize,
    pub total_components: usize,
    pub total_types: usize,
    pub total_api_routes: usize,
}

impl IndexStatistics {
    /// Sum the per-category array lengths of every record
    pub fn from_files(files: &[FileRecord]) -> Self {
        files.iter().fold(Self::default(), |acc, file| Self {
            total_functions: acc.total_functions + file.functions.len(),
            total_components: acc.total_components + file.components.len(),
            total_types: acc.total_types + file.types.len(),
            total_api_routes: acc.total_api_routes + file.api_routes.len(),
        })
    }
}

/// One full-rebuild aggregate of all file records.
///
/// This is also the persisted index artifact; the serialized field names are
/// shared by the builder and the query engine and must stay stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexSnapshot {
    pub generated_at: DateTime<Utc>,
    pub root_path: String,
    pub total_files: usize,
    pub kind_counts: BTreeMap<FileKind, usize>,
    pub files: Vec<FileRecord>,
    pub statistics: IndexStatistics,
}

impl IndexSnapshot {
    /// Assemble a snapshot from extracted records, deriving counts and statistics
    pub fn new(root_path: impl Into<String>, files: Vec<FileRecord>) -> Self {
        let mut kind_counts: BTreeMap<FileKind, usize> =
            FileKind::ALL.iter().map(|kind| (*kind, 0)).collect();
        for file in &files {
            *kind_counts.entry(file.kind).or_insert(0) += 1;
        }

        Self {
            generated_at: Utc::now(),
            root_path: root_path.into(),
            total_files: files.len(),
            kind_counts,
            statistics: IndexStatistics::from_files(&files),
            files,
        }
    }

    pub fn kind_count(&self, kind: FileKind) -> usize {
        self.kind_counts.get(&kind).copied().unwrap_or(0)
    }

    pub fn file(&self, relative_path: &str) -> Option<&FileRecord> {
        self.files.iter().find(|f| f.relative_path == relative_path)
    }
}

/// Coarse bucket describing how strongly the top match fits the question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
}

impl fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConfidenceTier::High => "high",
            ConfidenceTier::Medium => "medium",
            ConfidenceTier::Low => "low",
        })
    }
}

/// Where the `answer` text of a query result came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnswerStatus {
    /// Produced by the answer generator
    Generated,
    /// The generator failed or timed out; sources are still populated
    Unavailable,
    /// Nothing matched the question; the generator was not called
    NoMatches,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceReference {
    pub file: String,
    pub kind: FileKind,
    pub relevance_score: f64,
    /// One-line list of function, component and route names
    pub snippet: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    pub answer: String,
    pub answer_status: AnswerStatus,
    pub sources: Vec<SourceReference>,
    pub confidence_tier: ConfidenceTier,
    pub follow_ups: Vec<String>,
    pub duration_ms: u64,
}

impl QueryResult {
    /// Whether the answer text is a placeholder rather than generated output
    pub fn is_degraded(&self) -> bool {
        self.answer_status != AnswerStatus::Generated
    }
}
