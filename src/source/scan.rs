//! Logs directory discovery.

use crate::model::error::ScanError;
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

/// Recursively list `.log` and `.log.gz` files under `logs_dir`.
///
/// Creates the directory when it does not exist, so a fresh install shows an
/// empty menu instead of an error. Paths use forward slashes and are sorted.
pub fn scan_log_files(logs_dir: &Path) -> Result<Vec<String>, ScanError> {
    if !logs_dir.exists() {
        std::fs::create_dir_all(logs_dir).map_err(|source| ScanError::CreateDir {
            path: logs_dir.to_path_buf(),
            source,
        })?;
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(logs_dir).sort_by_file_name() {
        let entry = entry.map_err(|source| ScanError::Walk {
            path: logs_dir.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path().to_string_lossy().replace('\\', "/");
        if is_log_file(&path) {
            files.push(path);
        }
    }

    files.sort();
    debug!(count = files.len(), dir = ?logs_dir, "Scanned logs directory");
    Ok(files)
}

fn is_log_file(path: &str) -> bool {
    let lower = path.to_lowercase();
    lower.ends_with(".log") || lower.ends_with(".log.gz")
}
