//! Log file store.
//!
//! This module provides the filesystem side of the viewer:
//! - Scanning the logs directory for `.log` and `.log.gz` files
//! - Reading a file with transparent gzip decompression
//! - Writing parsed entries back out to the output directory
//!
//! The state machine never calls these directly. The effect runner invokes
//! them on a background thread through the [`LogStore`] trait.

use crate::model::error::{ReadError, SaveError, ScanError};
use std::path::PathBuf;

pub mod file;
pub mod save;
pub mod scan;

pub use save::SaveRequest;

/// Filesystem operations the viewer depends on.
pub trait LogStore: Send + Sync {
    /// List discoverable log files, forward-slash paths sorted by path.
    fn scan(&self) -> Result<Vec<String>, ScanError>;

    /// Read a file's text, decompressing `.gz` files.
    fn read(&self, path: &str) -> Result<String, ReadError>;

    /// Write entries to `filename` inside the output directory.
    ///
    /// Returns the path written.
    fn save(&self, request: &SaveRequest, filename: &str) -> Result<PathBuf, SaveError>;
}

/// [`LogStore`] backed by the local filesystem.
#[derive(Debug, Clone)]
pub struct FsLogStore {
    logs_dir: PathBuf,
    output_dir: PathBuf,
}

impl FsLogStore {
    /// Store rooted at the given logs and output directories.
    pub fn new(logs_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            logs_dir: logs_dir.into(),
            output_dir: output_dir.into(),
        }
    }

    /// Directory scanned for log files.
    pub fn logs_dir(&self) -> &PathBuf {
        &self.logs_dir
    }

    /// Directory saved files are written to.
    pub fn output_dir(&self) -> &PathBuf {
        &self.output_dir
    }
}

impl LogStore for FsLogStore {
    fn scan(&self) -> Result<Vec<String>, ScanError> {
        scan::scan_log_files(&self.logs_dir)
    }

    fn read(&self, path: &str) -> Result<String, ReadError> {
        file::read_file_content(path)
    }

    fn save(&self, request: &SaveRequest, filename: &str) -> Result<PathBuf, SaveError> {
        save::save_entries(&self.output_dir, request, filename)
    }
}
