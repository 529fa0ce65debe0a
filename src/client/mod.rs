//! Core library client for codebase-qa
//!
//! [`QaClient`] exposes the three entry points a host process needs:
//! build an index, load a persisted index, and answer a question against
//! the loaded index. Any command wrapper maps its arguments onto these.

use crate::config::Config;
use crate::error::QaError;
use crate::generator::{create_generator, AnswerGenerator};
use crate::indexer::{load_snapshot, persist_snapshot, write_summary, BuildReport, IndexBuilder};
use crate::query::QueryEngine;
use crate::types::{IndexSnapshot, QueryResult};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Main client for indexing a codebase and asking questions about it
///
/// # Example
///
/// ```no_run
/// use codebase_qa::QaClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), codebase_qa::QaError> {
///     let client = QaClient::new()?;
///
///     let report = client.build_index("/path/to/project").await?;
///     println!("Indexed {} files", report.snapshot.total_files);
///
///     let result = client.answer_question("What API endpoints exist?").await?;
///     println!("{}", result.answer);
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct QaClient {
    pub(crate) config: Arc<Config>,
    pub(crate) generator: Arc<dyn AnswerGenerator>,
    // The one loaded snapshot, wrapped in its query engine
    pub(crate) engine: Arc<RwLock<Option<Arc<QueryEngine>>>>,
}

impl QaClient {
    /// Create a client from the default config file, environment overrides
    /// and defaults
    pub fn new() -> Result<Self, QaError> {
        let config = Config::new()?;
        Self::with_config(config)
    }

    /// Create a client with a custom configuration.
    ///
    /// The answer generator is chosen from `config.generator`.
    pub fn with_config(config: Config) -> Result<Self, QaError> {
        config.validate()?;
        let generator = create_generator(&config.generator)?;
        Ok(Self::with_generator(config, generator))
    }

    /// Create a client with an explicit answer generator
    pub fn with_generator(config: Config, generator: Arc<dyn AnswerGenerator>) -> Self {
        tracing::debug!(
            "Initializing client (generator: {}, index: {})",
            generator.name(),
            config.indexing.index_path.display()
        );
        Self {
            config: Arc::new(config),
            generator,
            engine: Arc::new(RwLock::new(None)),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Where the index artifact is written and read by default
    pub fn index_path(&self) -> &Path {
        &self.config.indexing.index_path
    }

    /// Rebuild the index of `root` from scratch.
    ///
    /// The snapshot is persisted to the configured index path and becomes the
    /// loaded snapshot. Per-file failures are returned as warnings in the
    /// report; a directory-level failure persists nothing.
    pub async fn build_index(&self, root: impl AsRef<Path>) -> Result<BuildReport, QaError> {
        let root = root.as_ref().to_path_buf();
        let config = self.config.clone();

        let report = tokio::task::spawn_blocking(move || -> Result<BuildReport, QaError> {
            let report = IndexBuilder::new(config.indexing.clone()).build(&root)?;
            persist_snapshot(&report.snapshot, &config.indexing.index_path)?;
            if config.indexing.write_summary {
                write_summary(&report.snapshot, &config.indexing.summary_path)?;
            }
            Ok(report)
        })
        .await
        .map_err(|e| QaError::other(format!("Index build task failed: {}", e)))??;

        self.install(Arc::new(report.snapshot.clone())).await;
        Ok(report)
    }

    /// Load a persisted snapshot and make it the loaded snapshot
    pub async fn load_index(&self, path: impl AsRef<Path>) -> Result<Arc<IndexSnapshot>, QaError> {
        let path: PathBuf = path.as_ref().to_path_buf();
        let snapshot = tokio::task::spawn_blocking(move || load_snapshot(&path))
            .await
            .map_err(|e| QaError::other(format!("Index load task failed: {}", e)))??;

        let snapshot = Arc::new(snapshot);
        self.install(snapshot.clone()).await;
        Ok(snapshot)
    }

    /// Answer a question against the loaded snapshot.
    ///
    /// Fails only when no snapshot is loaded; generator problems come back
    /// as a degraded [`QueryResult`].
    pub async fn answer_question(&self, question: &str) -> Result<QueryResult, QaError> {
        let engine = self
            .engine
            .read()
            .await
            .clone()
            .ok_or(QaError::IndexNotLoaded)?;

        Ok(engine.answer(question).await)
    }

    /// The currently loaded snapshot, if any
    pub async fn snapshot(&self) -> Option<Arc<IndexSnapshot>> {
        self.engine
            .read()
            .await
            .as_ref()
            .map(|engine| engine.snapshot_handle())
    }

    async fn install(&self, snapshot: Arc<IndexSnapshot>) {
        let engine = QueryEngine::new(snapshot, &self.config, self.generator.clone());
        *self.engine.write().await = Some(Arc::new(engine));
    }
}

#[cfg(test)]
mod tests;
