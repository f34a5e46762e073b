//! # Report Module
//!
//! This module records what happened to each processed file, tallies the
//! outcomes into a summary, and can write both out as a JSON report.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use serde::Serialize;

/// Change applied (or, in check mode, required) to a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAction {
  /// The file already carried the current notice, or was empty
  Unchanged,
  /// The copyright year range was refreshed
  Updated,
  /// The header was inserted
  Created,
}

/// Outcome of processing a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
  Unchanged,
  Updated,
  Created,
  /// The file could not be read or written; holds the reason
  Error(String),
}

impl FileOutcome {
  /// Short lowercase label used in progress lines and reports.
  pub const fn label(&self) -> &'static str {
    match self {
      Self::Unchanged => "unchanged",
      Self::Updated => "updated",
      Self::Created => "created",
      Self::Error(_) => "error",
    }
  }

  /// Whether the file was (or would be) modified.
  pub const fn is_change(&self) -> bool {
    matches!(self, Self::Updated | Self::Created)
  }
}

impl From<FileAction> for FileOutcome {
  fn from(action: FileAction) -> Self {
    match action {
      FileAction::Unchanged => Self::Unchanged,
      FileAction::Updated => Self::Updated,
      FileAction::Created => Self::Created,
    }
  }
}

/// Information about a processed file for reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
  /// Path to the file
  pub path: PathBuf,
  /// What happened to it
  pub outcome: FileOutcome,
}

/// Summary of the processing results
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProcessingSummary {
  /// Files that already had the current notice (or were empty)
  pub unchanged: usize,
  /// Files whose year range was refreshed
  pub updated: usize,
  /// Files that received a header
  pub created: usize,
  /// Files that failed to read or write
  pub errors: usize,
  /// Files skipped because their name is excluded
  pub excluded: usize,
  /// Total processing time
  #[serde(skip_serializing)]
  pub processing_time: Duration,
  /// Processing time in seconds for serialization
  #[serde(rename = "processing_time_seconds")]
  pub processing_time_secs: f64,
}

impl ProcessingSummary {
  /// Create a ProcessingSummary from a collection of FileReports
  pub fn from_reports(files: &[FileReport], excluded: usize, processing_time: Duration) -> Self {
    let mut summary = Self {
      excluded,
      processing_time,
      processing_time_secs: processing_time.as_secs_f64(),
      ..Self::default()
    };

    for file in files {
      match file.outcome {
        FileOutcome::Unchanged => summary.unchanged += 1,
        FileOutcome::Updated => summary.updated += 1,
        FileOutcome::Created => summary.created += 1,
        FileOutcome::Error(_) => summary.errors += 1,
      }
    }

    summary
  }

  /// Number of files that were (or would be) modified.
  pub const fn changed(&self) -> usize {
    self.updated + self.created
  }
}

/// Writes the per-file outcomes and the summary as pretty-printed JSON.
pub fn write_json_report(output_path: &Path, files: &[FileReport], summary: &ProcessingSummary) -> Result<()> {
  let content = generate_json(files, summary)?;
  fs::write(output_path, content).with_context(|| format!("Failed to write report to {}", output_path.display()))
}

fn generate_json(files: &[FileReport], summary: &ProcessingSummary) -> Result<String> {
  use serde_json::{Map, Value, json, to_string_pretty};

  let files_array: Vec<Value> = files
    .iter()
    .map(|file| {
      let mut file_map = Map::new();
      file_map.insert(
        "path".to_string(),
        Value::String(file.path.to_string_lossy().to_string()),
      );
      file_map.insert("status".to_string(), Value::String(file.outcome.label().to_string()));
      if let FileOutcome::Error(reason) = &file.outcome {
        file_map.insert("error".to_string(), Value::String(reason.clone()));
      }
      Value::Object(file_map)
    })
    .collect();

  let report = json!({
      "generated_at": Local::now().to_rfc3339(),
      "summary": serde_json::to_value(summary)?,
      "files": files_array
  });

  Ok(to_string_pretty(&report)?)
}
