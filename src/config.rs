/// Configuration system for codebase-qa
///
/// Supports loading from multiple sources with priority:
/// CLI args > Environment variables > Config file > Defaults
use crate::error::{ConfigError, QaError};
use crate::types::FileKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Directory walk and artifact configuration
    #[serde(default)]
    pub indexing: IndexingConfig,

    /// Ranking policy (stop words, weights, kind boosts)
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Result shaping limits and confidence thresholds
    #[serde(default)]
    pub query: QueryConfig,

    /// Answer generator endpoint configuration
    #[serde(default)]
    pub generator: GeneratorConfig,
}

/// Indexing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexingConfig {
    /// Directory names pruned during the walk (dot-prefixed directories are always pruned)
    #[serde(default = "default_ignored_dirs")]
    pub ignored_dirs: Vec<String>,

    /// File extensions that are parsed
    #[serde(default = "default_supported_extensions")]
    pub supported_extensions: Vec<String>,

    /// Maximum file size to parse (in bytes)
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,

    /// Where the persisted index artifact is written and read
    #[serde(default = "default_index_path")]
    pub index_path: PathBuf,

    /// Where the human-readable summary is written
    #[serde(default = "default_summary_path")]
    pub summary_path: PathBuf,

    /// Write the summary after every build
    #[serde(default)]
    pub write_summary: bool,
}

/// Multiplicative boost applied when the question mentions `trigger`
/// and a file has the given kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KindBoost {
    pub kind: FileKind,
    pub trigger: String,
    pub factor: f64,
}

/// Scoring policy used by the query engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Tokens dropped from questions before scoring
    #[serde(default = "default_stop_words")]
    pub stop_words: BTreeSet<String>,

    #[serde(default = "default_kind_boosts")]
    pub kind_boosts: Vec<KindBoost>,

    /// Points per keyword occurrence in a file's search text
    #[serde(default = "default_keyword_weight")]
    pub keyword_weight: u32,

    /// Flat points when a keyword appears in the relative path
    #[serde(default = "default_path_match_bonus")]
    pub path_match_bonus: u32,
}

/// Query result shaping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Ranked files kept as relevant chunks
    #[serde(default = "default_max_relevant_files")]
    pub max_relevant_files: usize,

    /// Files rendered into the generator context and the source list
    #[serde(default = "default_context_files")]
    pub context_files: usize,

    #[serde(default = "default_max_context_functions")]
    pub max_context_functions: usize,

    #[serde(default = "default_max_context_types")]
    pub max_context_types: usize,

    /// Top score strictly above this is high confidence
    #[serde(default = "default_high_confidence_score")]
    pub high_confidence_score: f64,

    /// Top score strictly above this is medium confidence
    #[serde(default = "default_medium_confidence_score")]
    pub medium_confidence_score: f64,

    #[serde(default = "default_max_follow_ups")]
    pub max_follow_ups: usize,
}

/// Answer generator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Base URL of an OpenAI-compatible API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// API key; without one the generator is disabled and answers are degraded
    #[serde(default)]
    pub api_key: Option<String>,

    /// Sampling temperature, kept low for factual answers
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Timeout in seconds for one generation call
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_ignored_dirs() -> Vec<String> {
    ["node_modules", ".next", "dist", "build", "out", ".git", "coverage"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_supported_extensions() -> Vec<String> {
    ["ts", "tsx", "js", "jsx"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_max_file_size() -> u64 {
    1_048_576 // 1 MB
}

fn default_index_path() -> PathBuf {
    crate::paths::PlatformPaths::default_index_path()
}

fn default_summary_path() -> PathBuf {
    crate::paths::PlatformPaths::default_summary_path()
}

fn default_stop_words() -> BTreeSet<String> {
    [
        "the", "and", "are", "was", "were", "been", "being", "have", "has", "had", "does", "did",
        "will", "would", "could", "should", "may", "might", "must", "can", "this", "that",
        "these", "those", "what", "which", "who", "whom", "whose", "where", "when", "why", "how",
        "all", "any", "both", "each", "few", "more", "most", "other", "some", "such", "nor",
        "not", "only", "own", "same", "than", "too", "very", "just", "for", "with", "about",
        "into", "through", "from", "there", "here", "then", "once", "its", "your", "our",
        "their", "his", "her", "you", "they", "them", "also", "use", "used", "uses",
        "using", "work", "works", "working", "show", "tell", "explain", "describe", "code",
        "codebase", "file", "files", "please",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_kind_boosts() -> Vec<KindBoost> {
    vec![
        KindBoost {
            kind: FileKind::ApiRoute,
            trigger: "api".to_string(),
            factor: 2.0,
        },
        KindBoost {
            kind: FileKind::Component,
            trigger: "component".to_string(),
            factor: 2.0,
        },
        KindBoost {
            kind: FileKind::Type,
            trigger: "type".to_string(),
            factor: 1.5,
        },
    ]
}

fn default_keyword_weight() -> u32 {
    10
}

fn default_path_match_bonus() -> u32 {
    20
}

fn default_max_relevant_files() -> usize {
    10
}

fn default_context_files() -> usize {
    5
}

fn default_max_context_functions() -> usize {
    5
}

fn default_max_context_types() -> usize {
    3
}

fn default_high_confidence_score() -> f64 {
    100.0
}

fn default_medium_confidence_score() -> f64 {
    50.0
}

fn default_max_follow_ups() -> usize {
    3
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_temperature() -> f32 {
    0.2
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for IndexingConfig {
    fn default() -> Self {
        Self {
            ignored_dirs: default_ignored_dirs(),
            supported_extensions: default_supported_extensions(),
            max_file_size: default_max_file_size(),
            index_path: default_index_path(),
            summary_path: default_summary_path(),
            write_summary: false,
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            stop_words: default_stop_words(),
            kind_boosts: default_kind_boosts(),
            keyword_weight: default_keyword_weight(),
            path_match_bonus: default_path_match_bonus(),
        }
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            max_relevant_files: default_max_relevant_files(),
            context_files: default_context_files(),
            max_context_functions: default_max_context_functions(),
            max_context_types: default_max_context_types(),
            high_confidence_score: default_high_confidence_score(),
            medium_confidence_score: default_medium_confidence_score(),
            max_follow_ups: default_max_follow_ups(),
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            api_key: None,
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn invalid(key: &str, reason: impl Into<String>) -> QaError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        reason: reason.into(),
    }
    .into()
}

impl Config {
    /// Load configuration from file
    pub fn from_file(path: &Path) -> Result<Self, QaError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()).into());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::LoadFailed(format!("Failed to read config file: {}", e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| ConfigError::ParseFailed(format!("Invalid TOML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default location or create default
    pub fn load_or_default() -> Result<Self, QaError> {
        let config_path = crate::paths::PlatformPaths::default_config_path();

        if config_path.exists() {
            tracing::info!("Loading config from: {}", config_path.display());
            Self::from_file(&config_path)
        } else {
            tracing::info!("No config file found, using defaults");
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<(), QaError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConfigError::SaveFailed(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::SaveFailed(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| ConfigError::SaveFailed(format!("Failed to write config file: {}", e)))?;

        tracing::info!("Saved config to: {}", path.display());
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), QaError> {
        if self.indexing.supported_extensions.is_empty() {
            return Err(invalid(
                "indexing.supported_extensions",
                "must list at least one extension",
            ));
        }

        if self.indexing.max_file_size == 0 {
            return Err(invalid("indexing.max_file_size", "must be greater than 0"));
        }

        if self.scoring.keyword_weight == 0 {
            return Err(invalid("scoring.keyword_weight", "must be greater than 0"));
        }

        if let Some(boost) = self
            .scoring
            .kind_boosts
            .iter()
            .find(|b| b.factor <= 0.0 || b.trigger.trim().is_empty())
        {
            return Err(invalid(
                "scoring.kind_boosts",
                format!(
                    "boost for '{}' needs a non-empty trigger and a positive factor",
                    boost.kind
                ),
            ));
        }

        if self.query.max_relevant_files == 0 {
            return Err(invalid("query.max_relevant_files", "must be greater than 0"));
        }

        if self.query.context_files == 0 {
            return Err(invalid("query.context_files", "must be greater than 0"));
        }

        if self.query.high_confidence_score <= self.query.medium_confidence_score {
            return Err(invalid(
                "query.high_confidence_score",
                format!(
                    "must be greater than query.medium_confidence_score ({})",
                    self.query.medium_confidence_score
                ),
            ));
        }

        if !(0.0..=1.0).contains(&self.generator.temperature) {
            return Err(invalid(
                "generator.temperature",
                format!(
                    "must be between 0.0 and 1.0, got {}",
                    self.generator.temperature
                ),
            ));
        }

        if self.generator.timeout_secs == 0 {
            return Err(invalid("generator.timeout_secs", "must be greater than 0"));
        }

        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable source
    pub(crate) fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup("CODEBASE_QA_INDEX_PATH") {
            self.indexing.index_path = PathBuf::from(path);
        }

        if let Some(url) = lookup("CODEBASE_QA_BASE_URL") {
            self.generator.base_url = url;
        }

        if let Some(model) = lookup("CODEBASE_QA_MODEL") {
            self.generator.model = model;
        }

        if let Some(key) = lookup("CODEBASE_QA_API_KEY")
            && !key.trim().is_empty()
        {
            self.generator.api_key = Some(key);
        }

        if let Some(timeout) = lookup("CODEBASE_QA_TIMEOUT_SECS")
            && let Ok(secs) = timeout.parse()
        {
            self.generator.timeout_secs = secs;
        }
    }

    /// Create a new Config with defaults and environment overrides
    pub fn new() -> Result<Self, QaError> {
        let mut config = Self::load_or_default()?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }
}
