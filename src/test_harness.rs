//! Shared helpers for rendering tests.

use crate::model::{ReadError, SaveError, ScanError};
use crate::source::{LogStore, SaveRequest};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Convert a ratatui buffer to a string representation.
///
/// Captures the visual output character by character, preserving layout.
/// Empty lines are removed to keep assertions readable.
pub fn buffer_to_string(buffer: &ratatui::buffer::Buffer) -> String {
    let area = buffer.area();
    let mut lines = Vec::new();

    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            line.push_str(buffer[(x, y)].symbol());
        }
        let trimmed = line.trim_end();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }

    lines.join("\n")
}

/// In-memory [`LogStore`] keyed by path.
#[derive(Debug, Default)]
pub struct MemoryStore {
    files: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Store holding the given files.
    pub fn with_files<'a>(files: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            files: files
                .into_iter()
                .map(|(p, t)| (p.to_string(), t.to_string()))
                .collect(),
        }
    }
}

impl LogStore for MemoryStore {
    fn scan(&self) -> Result<Vec<String>, ScanError> {
        Ok(self.files.keys().cloned().collect())
    }

    fn read(&self, path: &str) -> Result<String, ReadError> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| ReadError::NotFound {
                path: PathBuf::from(path),
            })
    }

    fn save(&self, request: &SaveRequest, filename: &str) -> Result<PathBuf, SaveError> {
        if request.is_empty() {
            return Err(SaveError::Empty);
        }
        Ok(PathBuf::from("output").join(filename))
    }
}
