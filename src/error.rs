/// Centralized error types for codebase-qa using thiserror
///
/// File-level extraction failures are collected as warnings, directory-level
/// failures abort a build, and generator failures degrade a query result.
use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum QaError {
    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Index build error: {0}")]
    IndexBuild(#[from] IndexBuildError),

    #[error("Index load error: {0}")]
    IndexLoad(#[from] IndexLoadError),

    #[error("No index is loaded; build or load an index first")]
    IndexNotLoaded,

    #[error("Answer generator error: {0}")]
    Generator(#[from] GeneratorError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// Why a single file could not be turned into a record
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionCause {
    #[error("failed to read file: {0}")]
    ReadFailed(String),

    #[error("file is not valid UTF-8")]
    InvalidUtf8,

    #[error("file size exceeds maximum: {size} > {max}")]
    TooLarge { size: u64, max: u64 },

    #[error("unsupported file extension: {0}")]
    UnsupportedExtension(String),

    #[error("parser unavailable: {0}")]
    ParserUnavailable(String),

    #[error("syntax error at line {line}, column {column}")]
    Syntax { line: usize, column: usize },
}

/// A per-file failure; never aborts a build
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Failed to extract '{file}': {cause}")]
pub struct ExtractionError {
    pub file: String,
    pub cause: ExtractionCause,
}

impl ExtractionError {
    pub fn new(file: impl Into<String>, cause: ExtractionCause) -> Self {
        Self {
            file: file.into(),
            cause,
        }
    }
}

/// Failures that abort a whole index build
#[derive(Error, Debug)]
pub enum IndexBuildError {
    #[error("Root directory not found: {0}")]
    RootNotFound(String),

    #[error("Path is not a directory: {0}")]
    NotADirectory(String),

    #[error("Failed to walk directory '{path}': {reason}")]
    WalkFailed { path: String, reason: String },

    #[error("Failed to persist index to '{path}': {reason}")]
    PersistFailed { path: String, reason: String },
}

/// Failures loading a persisted snapshot
#[derive(Error, Debug)]
pub enum IndexLoadError {
    #[error("Index file not found: {0}")]
    NotFound(String),

    #[error("Failed to read index '{path}': {reason}")]
    ReadFailed { path: String, reason: String },

    #[error("Failed to parse index '{path}': {reason}")]
    ParseFailed { path: String, reason: String },
}

/// Failures of the external answer generator
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Answer generator is not configured")]
    NotConfigured,

    #[error("Answer generation timed out after {0} seconds")]
    Timeout(u64),

    #[error("Request to answer generator failed: {0}")]
    RequestFailed(String),

    #[error("Answer generator returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Answer generator returned an empty response")]
    EmptyResponse,
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration file: {0}")]
    LoadFailed(String),

    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    #[error("Invalid configuration value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("Failed to save configuration: {0}")]
    SaveFailed(String),

    #[error("Configuration file not found: {0}")]
    FileNotFound(String),
}

impl From<anyhow::Error> for QaError {
    fn from(err: anyhow::Error) -> Self {
        QaError::Other(format!("{:#}", err))
    }
}

impl QaError {
    /// Create a new error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        QaError::Other(msg.into())
    }

    /// Check if this is a user error (caller must fix input or order of calls)
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            QaError::IndexNotLoaded
                | QaError::IndexLoad(IndexLoadError::NotFound(_))
                | QaError::IndexBuild(IndexBuildError::RootNotFound(_))
                | QaError::IndexBuild(IndexBuildError::NotADirectory(_))
                | QaError::Config(ConfigError::InvalidValue { .. })
        )
    }

    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            QaError::Generator(GeneratorError::Timeout(_))
                | QaError::Generator(GeneratorError::RequestFailed(_))
                | QaError::Io(_)
        )
    }
}
