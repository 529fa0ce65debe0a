//! Full-rebuild index construction, persistence and loading

use super::extractor::extract_file_record;
use super::file_info::SourceFile;
use super::file_walker::FileWalker;
use crate::config::IndexingConfig;
use crate::error::{ExtractionError, IndexBuildError, IndexLoadError};
use crate::types::{FileRecord, IndexSnapshot};
use rayon::prelude::*;
use serde::Serialize;
use std::fs;
use std::path::Path;
use std::time::Instant;

/// Outcome of one build: the snapshot plus every per-file failure
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildReport {
    pub snapshot: IndexSnapshot,
    #[serde(serialize_with = "warning_list::serialize")]
    pub warnings: Vec<ExtractionError>,
    pub duration_ms: u64,
}

/// Walks a tree and aggregates one [`IndexSnapshot`] per call
pub struct IndexBuilder {
    config: IndexingConfig,
}

impl IndexBuilder {
    pub fn new(config: IndexingConfig) -> Self {
        Self { config }
    }

    /// Build a fresh snapshot of `root`.
    ///
    /// Per-file failures end up in [`BuildReport::warnings`]; only failures to
    /// walk the directory itself abort the build.
    pub fn build(&self, root: &Path) -> Result<BuildReport, IndexBuildError> {
        let start = Instant::now();
        tracing::info!("Building index for {}", root.display());

        let files = FileWalker::new(root)
            .with_ignored_dirs(self.config.ignored_dirs.iter().cloned())
            .with_extensions(self.config.supported_extensions.iter().cloned())
            .walk()?;

        // Collecting an indexed parallel iterator keeps walk order
        let outcomes: Vec<Result<FileRecord, ExtractionError>> = files
            .par_iter()
            .map(|file| self.extract(file, root))
            .collect();

        let mut records = Vec::with_capacity(outcomes.len());
        let mut warnings = Vec::new();
        for outcome in outcomes {
            match outcome {
                Ok(record) => records.push(record),
                Err(e) => {
                    tracing::warn!("{}", e);
                    warnings.push(e);
                }
            }
        }

        let snapshot = IndexSnapshot::new(root.display().to_string(), records);
        let duration_ms = start.elapsed().as_millis() as u64;

        tracing::info!(
            "Indexed {} files ({} warnings) in {}ms: {} functions, {} components, {} types, {} API routes",
            snapshot.total_files,
            warnings.len(),
            duration_ms,
            snapshot.statistics.total_functions,
            snapshot.statistics.total_components,
            snapshot.statistics.total_types,
            snapshot.statistics.total_api_routes
        );

        Ok(BuildReport {
            snapshot,
            warnings,
            duration_ms,
        })
    }

    fn extract(&self, file: &SourceFile, root: &Path) -> Result<FileRecord, ExtractionError> {
        let text = file
            .read_text(self.config.max_file_size)
            .map_err(|cause| ExtractionError::new(file.relative_path.clone(), cause))?;
        extract_file_record(&text, &file.path, root)
    }
}

/// Write a snapshot as pretty JSON.
///
/// The JSON goes to a sibling temp file first and is renamed into place, so
/// a failed write leaves any previous artifact untouched.
pub fn persist_snapshot(snapshot: &IndexSnapshot, path: &Path) -> Result<(), IndexBuildError> {
    let persist_failed = |reason: String| IndexBuildError::PersistFailed {
        path: path.display().to_string(),
        reason,
    };

    let json = serde_json::to_string_pretty(snapshot).map_err(|e| persist_failed(e.to_string()))?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| persist_failed(e.to_string()))?;
    }

    let mut temp_name = path.file_name().unwrap_or_default().to_os_string();
    temp_name.push(".tmp");
    let temp_path = path.with_file_name(temp_name);

    fs::write(&temp_path, json).map_err(|e| persist_failed(e.to_string()))?;
    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(persist_failed(e.to_string()));
    }

    tracing::info!("Wrote index to {}", path.display());
    Ok(())
}

/// Read a persisted snapshot
pub fn load_snapshot(path: &Path) -> Result<IndexSnapshot, IndexLoadError> {
    if !path.exists() {
        return Err(IndexLoadError::NotFound(path.display().to_string()));
    }

    let content = fs::read_to_string(path).map_err(|e| IndexLoadError::ReadFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let snapshot: IndexSnapshot =
        serde_json::from_str(&content).map_err(|e| IndexLoadError::ParseFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

    tracing::info!(
        "Loaded index of {} files from {}",
        snapshot.total_files,
        path.display()
    );
    Ok(snapshot)
}

/// Warnings serialize as `{ file, cause }` pairs with the cause as text
mod warning_list {
    use crate::error::ExtractionError;
    use serde::{Serialize, Serializer};

    #[derive(Serialize)]
    struct Warning {
        file: String,
        cause: String,
    }

    pub fn serialize<S: Serializer>(
        warnings: &[ExtractionError],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        warnings
            .iter()
            .map(|w| Warning {
                file: w.file.clone(),
                cause: w.cause.to_string(),
            })
            .collect::<Vec<_>>()
            .serialize(serializer)
    }
}
