//! # Output Module
//!
//! This module centralizes all user-facing output for the boilerplate tool:
//! section headings, one progress line per file, and the final summary.
//!
//! Everything goes to stdout and is silenced by `-q`. Diagnostics go through
//! `tracing` on stderr instead.

use std::io::Write as _;
use std::path::Path;

use owo_colors::{OwoColorize, Stream};
use tracing::debug;

use crate::logging::{is_quiet, is_verbose};
use crate::report::{FileOutcome, ProcessingSummary};

/// Print a section heading on a new paragraph.
pub fn print_section(message: &str) {
  if is_quiet() {
    return;
  }

  println!();
  println!("{}", message.if_supports_color(Stream::Stdout, |m| m.bold().blue().to_string()));
}

/// Print a section heading that the next message completes on the same line,
/// e.g. "Generating boilerplate... Done!".
pub fn print_section_start(message: &str) {
  if is_quiet() {
    return;
  }

  println!();
  print!("{}", message.if_supports_color(Stream::Stdout, |m| m.bold().blue().to_string()));
  if let Err(e) = std::io::stdout().flush() {
    debug!("Failed to flush stdout: {}", e);
  }
}

/// Complete a line started with [`print_section_start`].
pub fn print_done() {
  if is_quiet() {
    return;
  }

  println!("{}", "Done!".if_supports_color(Stream::Stdout, |s| s.green()));
}

/// Print the progress line for a processed file.
///
/// Format: ` - <path>: <outcome>`
pub fn print_file_outcome(path: &Path, outcome: &FileOutcome, root: Option<&Path>) {
  if is_quiet() {
    return;
  }

  let display_path = make_relative_path(path, root);
  let label = outcome.label();
  let status = match outcome {
    FileOutcome::Unchanged => label.if_supports_color(Stream::Stdout, |s| s.bold().to_string()).to_string(),
    FileOutcome::Updated => label
      .if_supports_color(Stream::Stdout, |s| s.bold().yellow().to_string())
      .to_string(),
    FileOutcome::Created => label
      .if_supports_color(Stream::Stdout, |s| s.bold().green().to_string())
      .to_string(),
    FileOutcome::Error(reason) => {
      let status = label.if_supports_color(Stream::Stdout, |s| s.bold().red().to_string());
      if is_verbose() {
        format!("{} ({})", status, reason)
      } else {
        status.to_string()
      }
    }
  };

  println!(" - {}: {}", display_path, status);
}

/// Print the progress line for a file skipped because its name is excluded.
pub fn print_excluded(path: &Path) {
  if is_quiet() {
    return;
  }

  let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
  println!(
    " - {}: {}",
    name,
    "excluded".if_supports_color(Stream::Stdout, |s| s.bold().to_string())
  );
}

/// Print the processing summary, one count per outcome.
///
/// In check mode the counts describe what a real run would do.
/// In verbose mode, also shows timing.
pub fn print_summary(summary: &ProcessingSummary, check_only: bool) {
  if is_quiet() {
    return;
  }

  let (updated_verb, created_verb) = if check_only {
    ("to update", "missing a header")
  } else {
    ("updated", "created")
  };

  print_section("Summary:");
  println!(
    " - {}",
    format!("{} files unchanged", summary.unchanged).if_supports_color(Stream::Stdout, |s| s.bold().to_string())
  );
  println!(
    " - {}",
    format!("{} files {}", summary.updated, updated_verb)
      .if_supports_color(Stream::Stdout, |s| s.bold().yellow().to_string())
  );
  println!(
    " - {}",
    format!("{} files {}", summary.created, created_verb)
      .if_supports_color(Stream::Stdout, |s| s.bold().green().to_string())
  );
  println!(
    " - {}",
    format!("{} errors", summary.errors).if_supports_color(Stream::Stdout, |s| s.bold().red().to_string())
  );

  if is_verbose() {
    println!(
      " - {} files excluded ({:.2}s)",
      summary.excluded,
      summary.processing_time.as_secs_f64()
    );
  }
}

/// Print a hint for the user about what to do next.
pub fn print_hint(message: &str) {
  if is_quiet() {
    return;
  }

  println!();
  println!("{}", message.if_supports_color(Stream::Stdout, |s| s.yellow()));
}

/// Make a path relative to the root for display.
pub fn make_relative_path(path: &Path, root: Option<&Path>) -> String {
  if let Some(root) = root {
    path
      .strip_prefix(root)
      .map(|p| p.to_string_lossy().to_string())
      .unwrap_or_else(|_| path.to_string_lossy().to_string())
  } else {
    path.to_string_lossy().to_string()
  }
}
