//! Image file I/O operations service
//!
//! This module separates file I/O operations from the pipeline logic,
//! making the system more testable and maintainable. All handles are
//! scoped: acquired for a bounded span and released at the end of it.

use crate::error::{RemovalError, Result};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Service for handling image file input/output operations
pub struct ImageIOService;

impl ImageIOService {
    /// Read the entire content of the input file into memory
    ///
    /// The bytes are opaque to this crate; no format validation happens here.
    /// Memory use is proportional to the file size.
    ///
    /// # Errors
    /// - `RemovalError::Io` with kind `NotFound` if the path is missing
    /// - `RemovalError::Io` with kind `PermissionDenied` if unreadable
    pub fn read_bytes<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
        let path_ref = path.as_ref();

        let mut file = File::open(path_ref)
            .map_err(|e| RemovalError::file_io_error("open input file", path_ref, e))?;

        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)
            .map_err(|e| RemovalError::file_io_error("read input file", path_ref, e))?;

        Ok(bytes)
    }

    /// Acquire write access to the output path, creating or truncating it
    ///
    /// An existing file at the path is overwritten. The parent directory must
    /// already exist; this service never creates directories.
    ///
    /// # Errors
    /// - `RemovalError::InvalidPath` if the parent directory does not exist
    /// - `RemovalError::Io` with kind `PermissionDenied` if not writable
    pub fn create_output<P: AsRef<Path>>(path: P) -> Result<File> {
        let path_ref = path.as_ref();

        if let Some(parent) = path_ref.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                return Err(RemovalError::invalid_path(format!(
                    "output directory does not exist: {}",
                    parent.display()
                )));
            }
        }

        File::create(path_ref)
            .map_err(|e| RemovalError::file_io_error("create output file", path_ref, e))
    }

    /// Write the result bytes to the output handle in full
    ///
    /// # Errors
    /// - `RemovalError::Io` on a short or failed write
    pub fn write_bytes(file: &mut File, path: &Path, bytes: &[u8]) -> Result<()> {
        file.write_all(bytes)
            .map_err(|e| RemovalError::file_io_error("write output file", path, e))?;
        file.flush()
            .map_err(|e| RemovalError::file_io_error("flush output file", path, e))
    }
}
