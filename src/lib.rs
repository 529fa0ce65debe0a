//! # codebase-qa - structural indexing and question answering for TS/JS projects
//!
//! Parses TypeScript and JavaScript sources with tree-sitter into structural
//! records (imports, exports, function signatures, components, types, API
//! routes), aggregates them into one immutable index snapshot, and answers
//! natural-language questions by ranking those records and handing a bounded
//! context to a pluggable answer generator.
//!
//! Only identifiers, type-annotation text and comments ever leave a source
//! file. Function bodies are never stored, searched or sent anywhere.
//!
//! ## Architecture
//!
//! ```text
//! source tree ─► FileWalker ─► extract_file_record (per file, parallel)
//!                                   │
//!                                   ▼
//!                     IndexBuilder ─► IndexSnapshot ─► index.json
//!                                                          │
//!                                                          ▼
//!                question ─► QueryEngine (keywords, scoring, context)
//!                                   │
//!                                   ▼
//!                           AnswerGenerator ─► QueryResult
//! ```
//!
//! ## Modules
//!
//! - [`indexer`]: file walking, tree-sitter parsing, extraction, snapshot building
//! - [`query`]: keyword extraction, scoring, ranking, context rendering
//! - [`generator`]: answer generator trait and implementations
//! - [`client`]: the [`QaClient`] facade
//! - [`config`]: configuration management with environment variable support
//! - [`types`]: records, snapshot and query result types
//! - [`error`]: error taxonomy
//! - [`paths`]: platform default locations
//!
//! ## Usage Example
//!
//! ```no_run
//! use codebase_qa::{Config, QaClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), codebase_qa::QaError> {
//!     let client = QaClient::with_config(Config::default())?;
//!     client.build_index("./my-next-app").await?;
//!
//!     let result = client.answer_question("Which components use useState?").await?;
//!     for source in &result.sources {
//!         println!("{} ({:.0})", source.file, source.relevance_score);
//!     }
//!     Ok(())
//! }
//! ```

/// Host-facing client wrapping build, load and answer
pub mod client;

/// Configuration management with environment variable overrides
pub mod config;

/// Error types and utilities
pub mod error;

/// Answer generator boundary
pub mod generator;

/// Directory walking, parsing and structural extraction
pub mod indexer;

/// Platform default paths
pub mod paths;

/// Ranking and answering over a loaded snapshot
pub mod query;

/// Structural records, snapshot and query result types
pub mod types;

pub use client::QaClient;
pub use config::Config;
pub use error::QaError;
pub use types::{FileKind, FileRecord, IndexSnapshot, QueryResult};
