//! Human-readable markdown rendering of a snapshot.
//!
//! The summary is write-only; nothing reads it back.

use crate::error::IndexBuildError;
use crate::types::{FileKind, FileRecord, IndexSnapshot};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

fn kind_heading(kind: FileKind) -> &'static str {
    match kind {
        FileKind::ApiRoute => "API Routes",
        FileKind::Component => "Components",
        FileKind::Type => "Types",
        FileKind::Config => "Configuration",
        FileKind::Utility => "Utilities",
    }
}

/// Render the snapshot as markdown, one section per non-empty kind
pub fn render_summary(snapshot: &IndexSnapshot) -> String {
    let mut out = String::new();
    let stats = &snapshot.statistics;

    let _ = writeln!(out, "# Codebase Summary\n");
    let _ = writeln!(out, "- Root: `{}`", snapshot.root_path);
    let _ = writeln!(
        out,
        "- Generated: {}",
        snapshot.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    let _ = writeln!(out, "- Files: {}", snapshot.total_files);
    let _ = writeln!(
        out,
        "- Functions: {} | Components: {} | Types: {} | API routes: {}",
        stats.total_functions, stats.total_components, stats.total_types, stats.total_api_routes
    );

    for kind in FileKind::ALL {
        let files: Vec<&FileRecord> = snapshot.files.iter().filter(|f| f.kind == kind).collect();
        if files.is_empty() {
            continue;
        }

        let _ = writeln!(out, "\n## {} ({})", kind_heading(kind), files.len());
        for file in files {
            render_file(&mut out, file);
        }
    }

    out
}

fn render_file(out: &mut String, file: &FileRecord) {
    let _ = writeln!(out, "\n### `{}`", file.relative_path);
    if let Some(description) = &file.description {
        let _ = writeln!(out, "\n{}", description.lines().next().unwrap_or_default());
    }

    if !file.api_routes.is_empty() {
        let routes: Vec<String> = file
            .api_routes
            .iter()
            .map(|r| format!("`{}`", r.http_method))
            .collect();
        let _ = writeln!(out, "\n- Routes: {}", routes.join(", "));
    }
    if !file.components.is_empty() {
        let names: Vec<String> = file
            .components
            .iter()
            .map(|c| format!("`{}`", c.name))
            .collect();
        let _ = writeln!(out, "- Components: {}", names.join(", "));
    }
    if !file.functions.is_empty() {
        let names: Vec<String> = file
            .functions
            .iter()
            .map(|f| format!("`{}`", f.name))
            .collect();
        let _ = writeln!(out, "- Functions: {}", names.join(", "));
    }
    if !file.types.is_empty() {
        let names: Vec<String> = file
            .types
            .iter()
            .map(|t| format!("`{}` ({})", t.name, t.kind))
            .collect();
        let _ = writeln!(out, "- Types: {}", names.join(", "));
    }
    if !file.dependencies.is_empty() {
        let _ = writeln!(out, "- Dependencies: {}", file.dependencies.join(", "));
    }
}

/// Render and write the summary to `path`
pub fn write_summary(snapshot: &IndexSnapshot, path: &Path) -> Result<(), IndexBuildError> {
    let persist_failed = |e: std::io::Error| IndexBuildError::PersistFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(persist_failed)?;
    }
    fs::write(path, render_summary(snapshot)).map_err(persist_failed)?;

    tracing::info!("Wrote summary to {}", path.display());
    Ok(())
}
