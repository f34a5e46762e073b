//! # Run Command
//!
//! This module implements the single command of the tool: refresh the
//! license file, then add or refresh the header of every supported file under
//! the root.

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use chrono::Datelike;
use clap::Args;
use tracing::debug;

use crate::config::{Settings, load_config};
use crate::diff::DiffManager;
use crate::info_log;
use crate::logging::{ColorMode, init_tracing, set_quiet, set_verbose};
use crate::output::{print_done, print_hint, print_section, print_section_start, print_summary};
use crate::processor::Processor;
use crate::report::write_json_report;

/// Arguments for a run
#[derive(Args, Debug)]
pub struct RunArgs {
  /// Root of the tree to process
  #[arg(default_value = ".")]
  pub root: PathBuf,

  /// License file to take the header from (default: LICENSE in the root)
  #[arg(long, short = 'f', value_name = "FILE")]
  pub license_file: Option<PathBuf>,

  /// Last year of the copyright range (default: the current year)
  #[arg(long)]
  pub year: Option<i32>,

  /// Check mode: report what would change without writing any file
  #[arg(long)]
  pub check: bool,

  /// Show a diff of each pending change (check mode only)
  #[arg(long, requires = "check")]
  pub show_diff: bool,

  /// Extra directory name to skip (repeatable)
  #[arg(long, value_name = "NAME")]
  pub exclude_dir: Vec<String>,

  /// File name or glob pattern to skip (repeatable)
  #[arg(long, value_name = "NAME")]
  pub exclude_file: Vec<String>,

  /// Generate a JSON report of every file's outcome and save to the specified
  /// path
  #[arg(long, value_name = "OUTPUT")]
  pub report_json: Option<PathBuf>,

  /// Path to config file (default: .boilerplate.toml in the root)
  #[arg(long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Ignore config file even if present
  #[arg(long)]
  pub no_config: bool,

  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except errors
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,
}

impl RunArgs {
  /// Resolves the run settings: builtin defaults, then the config file, then
  /// the command line.
  fn settings(&self) -> Result<Settings> {
    let current_year = self.year.unwrap_or_else(|| chrono::Local::now().year());
    let mut settings = Settings::new(self.root.clone(), current_year);

    if let Some(config) = load_config(self.config.as_deref(), &self.root, self.no_config)? {
      debug!("Using configuration file");
      settings.merge_config(config);
    }

    if let Some(ref license_file) = self.license_file {
      settings.license_path = license_file.clone();
    }
    settings.exclude_dirs.extend(self.exclude_dir.iter().cloned());
    settings.exclude_files.extend(self.exclude_file.iter().cloned());

    Ok(settings)
  }
}

/// Run the tool with the given arguments
pub fn run(args: RunArgs) -> Result<()> {
  // Initialize tracing subscriber for structured logging
  init_tracing(args.quiet, args.verbose);

  // Set verbose mode for output formatting and info_log! macro
  if args.verbose > 0 {
    set_verbose();
  } else if args.quiet {
    set_quiet();
  }
  args.colors.apply();

  let settings = args.settings()?;
  debug!(
    "Processing {} with copyright {}-{}",
    settings.root.display(),
    settings.first_year,
    settings.current_year
  );

  let processor = Processor::new(&settings, args.check, DiffManager::new(args.show_diff));

  print_section_start("Generating boilerplate... ");
  let templates = processor
    .refresh_license(&settings.comment_styles)
    .with_context(|| format!("Failed to render headers from {}", settings.license_path.display()))?
    .templates;
  debug!(
    "Rendered headers for: {}",
    templates.extensions().collect::<Vec<_>>().join(", ")
  );
  print_done();

  print_section("Adding boilerplate to files...");
  let outcome = processor.process(&templates);
  print_section("DONE!");
  print_summary(&outcome.summary, args.check);

  if let Some(ref output_path) = args.report_json {
    write_json_report(output_path, &outcome.reports, &outcome.summary)?;
    info_log!("Generated JSON report at {}", output_path.display());
  }

  // Exit with non-zero code if in check mode and there are pending changes
  if args.check && outcome.summary.changed() > 0 {
    print_hint("Run without --check to add missing headers and update years.");
    process::exit(1);
  }

  Ok(())
}
