//! File walking functionality for directory traversal

use super::extractor::relative_path;
use super::file_info::SourceFile;
use super::language::SourceLanguage;
use crate::error::IndexBuildError;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Recursive, pruned, deterministically ordered enumeration of source files
pub struct FileWalker {
    pub(crate) root: PathBuf,
    pub(crate) ignored_dirs: BTreeSet<String>,
    pub(crate) extensions: BTreeSet<String>,
}

impl FileWalker {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            ignored_dirs: BTreeSet::new(),
            extensions: ["ts", "tsx", "js", "jsx"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }

    /// Directory names pruned wherever they appear
    pub fn with_ignored_dirs<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored_dirs = dirs.into_iter().map(Into::into).collect();
        self
    }

    /// Extensions (without the dot) that are handed to the extractor
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|e| e.into().trim_start_matches('.').to_lowercase())
            .collect();
        self
    }

    /// Walk the directory and collect all supported files, in file-name order
    pub fn walk(&self) -> Result<Vec<SourceFile>, IndexBuildError> {
        if !self.root.exists() {
            return Err(IndexBuildError::RootNotFound(
                self.root.display().to_string(),
            ));
        }
        if !self.root.is_dir() {
            return Err(IndexBuildError::NotADirectory(
                self.root.display().to_string(),
            ));
        }

        let mut files = Vec::new();

        let walker = WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !self.is_pruned(entry));

        for entry in walker {
            let entry = entry.map_err(|e| IndexBuildError::WalkFailed {
                path: e
                    .path()
                    .unwrap_or(&self.root)
                    .display()
                    .to_string(),
                reason: e.to_string(),
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let Some(language) = self.supported_language(path) else {
                continue;
            };

            // Size is checked again when the file is read
            let size = entry.metadata().map(|m| m.len()).unwrap_or(0);

            files.push(SourceFile {
                path: path.to_path_buf(),
                relative_path: relative_path(path, &self.root),
                language,
                size,
            });
        }

        tracing::info!(
            "Found {} source files under {}",
            files.len(),
            self.root.display()
        );
        Ok(files)
    }

    /// Whether a directory entry is skipped along with its whole subtree
    pub(crate) fn is_pruned(&self, entry: &DirEntry) -> bool {
        // Never prune the root itself, even if it is a dot-directory
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return false;
        }

        let name = entry.file_name().to_string_lossy();
        let pruned = name.starts_with('.') || self.ignored_dirs.contains(name.as_ref());
        if pruned {
            tracing::debug!("Pruning directory: {}", entry.path().display());
        }
        pruned
    }

    pub(crate) fn supported_language(&self, path: &Path) -> Option<SourceLanguage> {
        let extension = path.extension()?.to_str()?.to_lowercase();
        if !self.extensions.contains(&extension) {
            return None;
        }
        SourceLanguage::from_extension(&extension)
    }
}
