//! Whole-file reading with gzip support.

use crate::model::error::ReadError;
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Read a log file to a string.
///
/// Paths ending in `.gz` (any case) are decompressed. Invalid UTF-8 is
/// replaced rather than rejected since server logs occasionally carry
/// mis-encoded player chat.
pub fn read_file_content(path: &str) -> Result<String, ReadError> {
    let file_path = Path::new(path);
    if !file_path.exists() {
        return Err(ReadError::NotFound {
            path: file_path.to_path_buf(),
        });
    }

    let io_err = |source| ReadError::Io {
        path: file_path.to_path_buf(),
        source,
    };

    let file = File::open(file_path).map_err(io_err)?;
    let mut reader: Box<dyn Read> = if path.to_lowercase().ends_with(".gz") {
        Box::new(GzDecoder::new(BufReader::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };

    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes).map_err(io_err)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
