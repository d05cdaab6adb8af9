//! File helpers shared by config, catalog and profile loading.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{Result, TrailmapError};

/// Maximum size of an input file read into memory (1 MB).
///
/// Config, catalog and profile files are small hand-written documents.
pub const MAX_FILE_SIZE: u64 = 1024 * 1024;

/// Read a file into a string, refusing files over `MAX_FILE_SIZE`.
pub fn read_to_string_limited(path: &Path) -> Result<String> {
    read_to_string_with_limit(path, MAX_FILE_SIZE)
}

/// Read a file into a string, refusing files over `max_size` bytes.
///
/// # Errors
///
/// Returns a storage error if the file cannot be read or is too large.
pub fn read_to_string_with_limit(path: &Path, max_size: u64) -> Result<String> {
    let metadata = fs::metadata(path).map_err(|e| TrailmapError::storage(path, e))?;

    let size = metadata.len();
    if size > max_size {
        return Err(TrailmapError::storage(
            path,
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("file is too large ({} bytes, max {} bytes)", size, max_size),
            ),
        ));
    }

    fs::read_to_string(path).map_err(|e| TrailmapError::storage(path, e))
}
