//! # File I/O Module
//!
//! File reading and writing for the processor. Each call opens the file, does
//! its work and closes it again; no handle is kept across the header
//! decision.

use std::path::Path;

use crate::error::BoilerplateError;

/// File I/O operations for the processor.
pub struct FileIO;

impl FileIO {
  /// Read full file content.
  ///
  /// Non-UTF-8 content is reported as a read error, which keeps binary files
  /// out of the header logic.
  pub fn read_full_content(path: &Path) -> Result<String, BoilerplateError> {
    std::fs::read_to_string(path).map_err(|source| BoilerplateError::FileReadError {
      path: path.to_path_buf(),
      source,
    })
  }

  /// Overwrite the file with `content`.
  ///
  /// Writing to the existing path keeps its permissions.
  pub fn write_file(path: &Path, content: &str) -> Result<(), BoilerplateError> {
    std::fs::write(path, content).map_err(|source| BoilerplateError::FileWriteError {
      path: path.to_path_buf(),
      source,
    })
  }
}
