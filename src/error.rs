//! # Error Module
//!
//! Domain errors raised while building header templates and applying them to
//! files.
//!
//! The license and comment-style variants are fatal for a run. The file I/O
//! variants are scoped to a single file: the processor turns them into a
//! [`FileOutcome::Error`](crate::report::FileOutcome::Error) and moves on.

use std::path::PathBuf;

/// Errors produced by the boilerplate core.
#[derive(Debug, thiserror::Error)]
pub enum BoilerplateError {
  /// The license file does not exist or cannot be read.
  #[error("License file '{path}' is missing or unreadable: {source}")]
  MissingLicenseFile { path: PathBuf, source: std::io::Error },

  /// The license file has no "Copyright" line to start the header from, or
  /// no year range to keep current.
  #[error("License file '{path}' {reason}")]
  MalformedLicense { path: PathBuf, reason: String },

  /// A comment style is neither a single prefix token nor an open/close pair.
  #[error("Invalid comment style for '{extension}': {message}")]
  InvalidCommentStyle { extension: String, message: String },

  /// A source file could not be read (missing, permissions, not UTF-8).
  #[error("Failed to read file '{path}': {source}")]
  FileReadError { path: PathBuf, source: std::io::Error },

  /// A source file could not be written back.
  #[error("Failed to write file '{path}': {source}")]
  FileWriteError { path: PathBuf, source: std::io::Error },
}
