//! # Processor Module
//!
//! This module applies the rendered headers to the files of a tree.
//!
//! The module is organized into several submodules:
//! - [`file_io`] - File reading and writing operations
//! - [`content_transformer`] - Header detection, year refresh and insertion
//! - [`file_collector`] - Directory traversal and exclusions
//!
//! The [`Processor`] struct is the main entry point, orchestrating the
//! submodules. Each file is handled on its own: a read or write failure is
//! recorded as that file's outcome and the walk continues.

mod content_transformer;
mod file_collector;
mod file_io;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

pub use content_transformer::{ContentTransformer, Transformation, YearUpdate};
pub use file_collector::{Candidate, FileCollector};
pub use file_io::FileIO;
use tracing::{debug, trace, warn};

use crate::config::Settings;
use crate::diff::DiffManager;
use crate::error::BoilerplateError;
use crate::output::{print_excluded, print_file_outcome};
use crate::report::{FileAction, FileOutcome, FileReport, ProcessingSummary};
use crate::templates::{LicenseText, TemplateSet};

/// Headers for a run, rendered from the refreshed license file.
#[derive(Debug)]
pub struct PreparedHeaders {
  /// What happened (or, in check mode, would happen) to the license file
  pub action: FileAction,
  /// License text carrying the current year range
  pub license: LicenseText,
  /// One rendered header per supported extension
  pub templates: TemplateSet,
}

/// Result of walking the whole tree.
#[derive(Debug)]
pub struct ProcessingRun {
  /// One report per supported file, in traversal order
  pub reports: Vec<FileReport>,
  /// Counts per outcome
  pub summary: ProcessingSummary,
}

/// Processor for applying headers to a tree.
///
/// The `Processor` is responsible for:
/// - Refreshing the copyright years of the license file itself
/// - Walking the tree, skipping excluded directories and files
/// - Applying the header matching each file's extension
/// - Collecting per-file outcomes for the summary and reports
pub struct Processor {
  /// Root of the tree
  root: PathBuf,

  /// License file whose year range is refreshed before the walk
  license_path: PathBuf,

  /// Whether to only report what would change, without writing
  check_only: bool,

  /// Content transformer for header detection and insertion
  content_transformer: ContentTransformer,

  /// File collector for directory traversal
  file_collector: FileCollector,

  /// Manager for showing pending changes in check mode
  diff_manager: DiffManager,
}

impl Processor {
  /// Creates a new processor from the run settings.
  pub fn new(settings: &Settings, check_only: bool, diff_manager: DiffManager) -> Self {
    Self {
      root: settings.root.clone(),
      license_path: settings.license_path.clone(),
      check_only,
      content_transformer: ContentTransformer::new(settings.first_year, settings.current_year),
      file_collector: FileCollector::new(settings.exclude_dirs.clone(), settings.exclude_files.clone()),
      diff_manager,
    }
  }

  /// Applies `header` to the file at `path`.
  ///
  /// Reads the file, decides whether it is unchanged, needs its year range
  /// refreshed or needs the header inserted, and writes the result back in
  /// full. In check mode nothing is written.
  ///
  /// # Errors
  ///
  /// [`BoilerplateError::FileReadError`] or
  /// [`BoilerplateError::FileWriteError`] when the file cannot be read
  /// (including non-UTF-8 content) or written.
  pub fn apply(&self, header: &str, path: &Path) -> Result<FileAction, BoilerplateError> {
    let content = FileIO::read_full_content(path)?;
    let transformation = self.content_transformer.transform(header, &content);
    self.commit(path, &content, transformation)
  }

  /// Writes a transformation back to disk (or shows it, in check mode).
  fn commit(&self, path: &Path, original: &str, transformation: Transformation) -> Result<FileAction, BoilerplateError> {
    let action = match &transformation {
      Transformation::Unchanged => return Ok(FileAction::Unchanged),
      Transformation::Updated(_) => FileAction::Updated,
      Transformation::Created(_) => FileAction::Created,
    };

    if let Some(new_content) = transformation.new_content() {
      if self.check_only {
        self.diff_manager.display_diff(path, original, new_content);
      } else {
        FileIO::write_file(path, new_content)?;
      }
    }

    Ok(action)
  }

  /// Refreshes the year range in the license file and renders the headers
  /// from the refreshed text.
  ///
  /// Every header is rendered before the license file is written, so an
  /// invalid comment style leaves the tree untouched. In check mode the file
  /// is not written, but the headers still carry the refreshed years.
  ///
  /// # Errors
  ///
  /// - [`BoilerplateError::MissingLicenseFile`] if the license file cannot be
  ///   read
  /// - [`BoilerplateError::MalformedLicense`] if it has no "Copyright" notice,
  ///   or no `Copyright (c) <years>` range for headers to be matched against
  /// - [`BoilerplateError::InvalidCommentStyle`] for a bad extension entry
  /// - [`BoilerplateError::FileWriteError`] if the refreshed file cannot be
  ///   written
  pub fn refresh_license(
    &self,
    comment_styles: &BTreeMap<String, Vec<String>>,
  ) -> Result<PreparedHeaders, BoilerplateError> {
    let content = FileIO::read_full_content(&self.license_path).map_err(|e| match e {
      BoilerplateError::FileReadError { path, source } => BoilerplateError::MissingLicenseFile { path, source },
      other => other,
    })?;

    // Reject a malformed license before looking at its years
    LicenseText::from_content(&self.license_path, &content)?;

    let updated = match self.content_transformer.update_year(&content) {
      YearUpdate::Outdated(updated) => Some(updated),
      YearUpdate::Current => None,
      YearUpdate::Missing => {
        return Err(BoilerplateError::MalformedLicense {
          path: self.license_path.clone(),
          reason: format!(
            "has no \"Copyright (c) <years>\" notice to keep current (expected e.g. \"{}\")",
            self.content_transformer.canonical_notice()
          ),
        });
      }
    };

    let license = LicenseText::from_content(&self.license_path, updated.as_deref().unwrap_or(&content))?;
    let templates = TemplateSet::build(&license, comment_styles)?;

    let action = match updated {
      Some(updated) => {
        if self.check_only {
          self.diff_manager.display_diff(&self.license_path, &content, &updated);
        } else {
          FileIO::write_file(&self.license_path, &updated)?;
        }
        FileAction::Updated
      }
      None => FileAction::Unchanged,
    };

    debug!("License file {}: {:?}", self.license_path.display(), action);

    Ok(PreparedHeaders {
      action,
      license,
      templates,
    })
  }

  /// Processes a single file, turning per-file errors into an outcome.
  pub fn process_file(&self, header: &str, path: &Path) -> FileOutcome {
    trace!("Applying header to {}", path.display());

    match self.apply(header, path) {
      Ok(action) => FileOutcome::from(action),
      Err(e) => {
        warn!("{}", e);
        FileOutcome::Error(e.to_string())
      }
    }
  }

  /// Walks the tree and applies the matching header to every supported file.
  ///
  /// Files with an unsupported extension are skipped silently; files whose
  /// name is excluded are listed but not counted.
  pub fn process(&self, templates: &TemplateSet) -> ProcessingRun {
    let start_time = Instant::now();
    let mut reports = Vec::new();
    let mut excluded = 0;

    for candidate in self.file_collector.collect(&self.root) {
      let path = match candidate {
        Candidate::Excluded(path) => {
          print_excluded(&path);
          excluded += 1;
          continue;
        }
        Candidate::File(path) => path,
      };

      let Some(header) = templates.for_path(&path) else {
        debug!(" - {}: not supported", path.display());
        continue;
      };

      let outcome = self.process_file(header, &path);
      print_file_outcome(&path, &outcome, Some(&self.root));
      reports.push(FileReport { path, outcome });
    }

    let summary = ProcessingSummary::from_reports(&reports, excluded, start_time.elapsed());
    ProcessingRun { reports, summary }
  }
}
