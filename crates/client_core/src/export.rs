use std::{
    fs,
    path::{Path, PathBuf},
};

use shared::{domain::TaskSet, export::ExportFormat};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to render {format} export: {source}")]
    Render {
        format: ExportFormat,
        source: serde_json::Error,
    },
    #[error("failed to write '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Renders `tasks` in `format` and writes the file at `path`.
pub fn write_export(
    path: &Path,
    format: ExportFormat,
    tasks: &TaskSet,
) -> Result<PathBuf, ExportError> {
    let rendered = format
        .render(tasks)
        .map_err(|source| ExportError::Render { format, source })?;
    fs::write(path, rendered).map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), %format, tasks = tasks.len(), "exported tasks");
    Ok(path.to_path_buf())
}
