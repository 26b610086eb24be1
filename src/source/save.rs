//! Writing parsed entries to the output directory.

use crate::model::error::SaveError;
use crate::model::{CoreProtectLogEntry, LogEntry};
use crate::parser::format_line;
use std::path::{Path, PathBuf};
use tracing::info;

/// Snapshot of the entries currently on screen.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveRequest {
    /// Standard entries, written in canonical line form.
    Standard(Vec<LogEntry>),
    /// CoreProtect entries, written as their raw source lines.
    CoreProtect(Vec<CoreProtectLogEntry>),
}

impl SaveRequest {
    /// Number of entries in the snapshot.
    pub fn len(&self) -> usize {
        match self {
            SaveRequest::Standard(e) => e.len(),
            SaveRequest::CoreProtect(e) => e.len(),
        }
    }

    /// True when there is nothing to write.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// File body: one line per entry, each terminated by `\n`.
    pub fn render(&self) -> String {
        let mut out = String::new();
        match self {
            SaveRequest::Standard(entries) => {
                for entry in entries {
                    out.push_str(&format_line(entry));
                    out.push('\n');
                }
            }
            SaveRequest::CoreProtect(entries) => {
                for entry in entries {
                    out.push_str(entry.raw_line());
                    out.push('\n');
                }
            }
        }
        out
    }
}

/// Write `request` to `output_dir/filename`, creating the directory.
pub fn save_entries(
    output_dir: &Path,
    request: &SaveRequest,
    filename: &str,
) -> Result<PathBuf, SaveError> {
    if request.is_empty() {
        return Err(SaveError::Empty);
    }
    validate_filename(filename)?;

    std::fs::create_dir_all(output_dir).map_err(|source| SaveError::Io {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let path = output_dir.join(filename);
    std::fs::write(&path, request.render()).map_err(|source| SaveError::Io {
        path: path.clone(),
        source,
    })?;

    info!(path = ?path, entries = request.len(), "Saved entries");
    Ok(path)
}

fn validate_filename(filename: &str) -> Result<(), SaveError> {
    let trimmed = filename.trim();
    if trimmed.is_empty()
        || trimmed == "."
        || trimmed == ".."
        || trimmed.contains('/')
        || trimmed.contains('\\')
    {
        return Err(SaveError::InvalidFilename(filename.to_string()));
    }
    Ok(())
}
