#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result};
use assert_cmd::prelude::*;

/// License used by most tests; its year range is outdated on purpose.
pub const LICENSE: &str = "MIT License\n\nCopyright (c) 2020-2022 CRS4\n\nPermission is hereby granted, free of charge.\n";

/// The notice every file should carry after a run with `--year 2025`.
pub const CANONICAL: &str = "Copyright (c) 2020-2025";

/// The `.py` header rendered from [`LICENSE`] with `--year 2025`.
pub const PY_HEADER: &str = "# Copyright (c) 2020-2025 CRS4\n#\n# Permission is hereby granted, free of charge.\n\n";

/// The license text (from its "Copyright" line) after a run with
/// `--year 2025`.
pub const LICENSE_TEXT: &str = "Copyright (c) 2020-2025 CRS4\n\nPermission is hereby granted, free of charge.\n";

/// Writes each `(relative path, content)` pair under `root`, creating parent
/// directories as needed.
pub fn write_files(root: &Path, files: &[(&str, &str)]) -> Result<()> {
  for (path, content) in files {
    let full = root.join(path);
    if let Some(parent) = full.parent() {
      fs::create_dir_all(parent).with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(&full, content).with_context(|| format!("Failed to write {}", full.display()))?;
  }
  Ok(())
}

/// Reads a file under `root` as a string.
pub fn read(root: &Path, path: &str) -> Result<String> {
  fs::read_to_string(root.join(path)).with_context(|| format!("Failed to read {path}"))
}

/// Builds a `boilerplate` command for the tree at `root`.
///
/// The year is pinned to 2025 and colors are disabled so output and file
/// contents are deterministic. Environment overrides are cleared.
pub fn boilerplate(root: &Path) -> Result<Command> {
  let mut cmd = Command::cargo_bin("boilerplate")?;
  cmd
    .current_dir(root)
    .env_remove("BOILERPLATE_CONFIG")
    .env_remove("RUST_LOG")
    .args(["--year", "2025", "--colors=never"]);
  Ok(cmd)
}
