//! # File Collector Module
//!
//! This module walks the tree and lists the candidate files, in a stable
//! order, skipping hidden and excluded directories.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use glob::Pattern;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// A file found while walking the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Candidate {
  /// The file name is in the excluded set.
  Excluded(PathBuf),
  /// The file should be considered for a header.
  File(PathBuf),
}

/// File collector for directory traversal.
///
/// The `FileCollector` handles:
/// - Pruning directories whose name starts with `.` or is excluded
/// - Flagging files whose name matches an excluded name or pattern
/// - Returning files in a deterministic order (sorted by name per directory)
pub struct FileCollector {
  exclude_dirs: BTreeSet<String>,
  exclude_files: Vec<String>,
  exclude_patterns: Vec<Pattern>,
}

impl FileCollector {
  /// Creates a new FileCollector.
  ///
  /// # Parameters
  ///
  /// * `exclude_dirs` - Directory names that are not descended into
  /// * `exclude_files` - File names, or glob patterns over file names, to skip
  pub fn new(exclude_dirs: BTreeSet<String>, exclude_files: Vec<String>) -> Self {
    let exclude_patterns = exclude_files
      .iter()
      .filter_map(|name| match Pattern::new(name) {
        Ok(pattern) => Some(pattern),
        Err(e) => {
          debug!("Excluded file name '{}' is not a glob pattern ({}); matching it literally", name, e);
          None
        }
      })
      .collect();

    Self {
      exclude_dirs,
      exclude_files,
      exclude_patterns,
    }
  }

  /// Whether a directory should be pruned from the walk.
  pub fn is_excluded_dir(&self, name: &str) -> bool {
    name.starts_with('.') || self.exclude_dirs.contains(name)
  }

  /// Whether a file name is in the excluded set.
  pub fn is_excluded_file(&self, name: &str) -> bool {
    self.exclude_files.iter().any(|excluded| excluded == name)
      || self.exclude_patterns.iter().any(|pattern| pattern.matches(name))
  }

  /// Walks `root` and returns every regular file below it.
  ///
  /// Unreadable directories are logged and skipped.
  pub fn collect(&self, root: &Path) -> Vec<Candidate> {
    debug!("Scanning directory: {}", root.display());
    let start_time = std::time::Instant::now();

    let mut candidates = Vec::new();
    let walker = WalkDir::new(root)
      .sort_by_file_name()
      .into_iter()
      .filter_entry(|entry| entry.depth() == 0 || !entry.file_type().is_dir() || !self.is_excluded_dir(&file_name(entry)));

    for entry in walker {
      let entry = match entry {
        Ok(entry) => entry,
        Err(e) => {
          warn!("Error walking {}: {}", root.display(), e);
          continue;
        }
      };

      if !entry.file_type().is_file() {
        continue;
      }

      let path = entry.into_path();
      let excluded = path
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| self.is_excluded_file(name));

      candidates.push(if excluded {
        Candidate::Excluded(path)
      } else {
        Candidate::File(path)
      });
    }

    debug!(
      "Found {} files in {}ms",
      candidates.len(),
      start_time.elapsed().as_millis()
    );

    candidates
  }
}

fn file_name(entry: &DirEntry) -> String {
  entry.file_name().to_string_lossy().into_owned()
}
