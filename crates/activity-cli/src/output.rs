//! Writing the output document: target path, backups, and the JSON itself.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use activity_model::OutputDocument;

/// File replaced by `--replace-default`.
pub const DEFAULT_ACTIVITIES_FILENAME: &str = "default-activities.json";

/// Markers of a project root, checked from the working directory upward.
const PROJECT_MARKERS: &[&str] = &["package.json", "src"];

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("failed to serialize activities: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to back up {path}: {source}")]
    Backup {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Result of writing the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenOutput {
    pub path: PathBuf,
    pub backup: Option<PathBuf>,
    pub bytes: u64,
}

/// Nearest ancestor of `start` (inclusive) holding a `package.json` or a
/// `src` directory; `start` itself when there is none.
pub fn find_project_root(start: &Path) -> PathBuf {
    start
        .ancestors()
        .find(|dir| PROJECT_MARKERS.iter().any(|marker| dir.join(marker).exists()))
        .unwrap_or(start)
        .to_path_buf()
}

/// Output file inside `directory`.
///
/// Replacing the default wins over any file name. Otherwise the explicit
/// `filename` is used, then `configured`.
pub fn output_path(
    directory: &Path,
    replace_default: bool,
    filename: Option<&str>,
    configured: &str,
) -> PathBuf {
    if replace_default {
        return directory.join(DEFAULT_ACTIVITIES_FILENAME);
    }
    directory.join(filename.unwrap_or(configured))
}

/// `<stem>.backup.<timestamp>.json`, next to `path`.
pub fn backup_path(path: &Path, timestamp: i64) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!("{stem}.backup.{timestamp}.json"))
}

/// Copies an existing `path` to its backup name. `Ok(None)` when there is
/// nothing to back up.
pub fn backup_existing(path: &Path, timestamp: i64) -> Result<Option<PathBuf>, WriteError> {
    if !path.exists() {
        return Ok(None);
    }
    let backup = backup_path(path, timestamp);
    fs::copy(path, &backup).map_err(|source| WriteError::Backup {
        path: path.to_path_buf(),
        source,
    })?;
    info!(backup = %backup.display(), "backed up existing file");
    Ok(Some(backup))
}

/// Pretty JSON, two-space indent, non-ASCII left as is.
pub fn render_document(document: &OutputDocument) -> Result<String, WriteError> {
    serde_json::to_string_pretty(document).map_err(WriteError::Serialize)
}

/// Writes `document` to `path`, backing up any existing file first when
/// `backup_timestamp` is given.
pub fn write_document(
    document: &OutputDocument,
    path: &Path,
    backup_timestamp: Option<i64>,
) -> Result<WrittenOutput, WriteError> {
    let json = render_document(document)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| WriteError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let backup = match backup_timestamp {
        Some(timestamp) => backup_existing(path, timestamp)?,
        None => None,
    };
    fs::write(path, &json).map_err(|source| WriteError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    let bytes = json.len() as u64;
    info!(path = %path.display(), bytes, "wrote activities");
    Ok(WrittenOutput {
        path: path.to_path_buf(),
        backup,
        bytes,
    })
}
