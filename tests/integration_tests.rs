mod common;

use anyhow::Result;
use assert_cmd::prelude::*;
use common::{CANONICAL, LICENSE, LICENSE_TEXT, PY_HEADER, boilerplate, read, write_files};
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_adds_and_refreshes_headers() -> Result<()> {
  let temp_dir = tempdir()?;
  let root = temp_dir.path();
  write_files(
    root,
    &[
      ("LICENSE", LICENSE),
      ("app/main.py", "print('hello')\n"),
      ("app/old.py", "# Copyright (c) 2020-2021 CRS4\n\nx = 1\n"),
      ("web/index.html", "<html></html>\n"),
      ("web/app.ts", "export {};\n"),
      ("ci.yml", "on: push\n"),
    ],
  )?;

  boilerplate(root)?
    .assert()
    .success()
    .stdout(predicate::str::contains("Generating boilerplate... Done!"))
    .stdout(predicate::str::contains(" - app/main.py: created"))
    .stdout(predicate::str::contains(" - app/old.py: updated"))
    .stdout(predicate::str::contains(" - web/index.html: created"))
    .stdout(predicate::str::contains("DONE!"))
    .stdout(predicate::str::contains("0 files unchanged"))
    .stdout(predicate::str::contains("1 files updated"))
    .stdout(predicate::str::contains("4 files created"))
    .stdout(predicate::str::contains("0 errors"));

  // The license file itself carries the refreshed range
  assert_eq!(read(root, "LICENSE")?, LICENSE.replace("2020-2022", "2020-2025"));

  assert_eq!(read(root, "app/main.py")?, format!("{PY_HEADER}\nprint('hello')\n"));
  assert_eq!(read(root, "app/old.py")?, "# Copyright (c) 2020-2025 CRS4\n\nx = 1\n");
  assert_eq!(
    read(root, "web/index.html")?,
    format!("<!--\n{LICENSE_TEXT}-->\n\n<html></html>\n")
  );
  assert_eq!(read(root, "web/app.ts")?, format!("/*\n{LICENSE_TEXT}*/\n\nexport {{}};\n"));
  assert_eq!(read(root, "ci.yml")?, format!("{PY_HEADER}\non: push\n"));

  Ok(())
}

#[test]
fn test_second_run_is_idempotent() -> Result<()> {
  let temp_dir = tempdir()?;
  let root = temp_dir.path();
  write_files(
    root,
    &[
      ("LICENSE", LICENSE),
      ("a.py", "import os\n"),
      ("b.css", "body {}\n"),
      ("c.js", "\nconsole.log(1);\n"),
    ],
  )?;

  boilerplate(root)?.assert().success();
  let first = (read(root, "a.py")?, read(root, "b.css")?, read(root, "c.js")?);

  boilerplate(root)?
    .assert()
    .success()
    .stdout(predicate::str::contains("3 files unchanged"))
    .stdout(predicate::str::contains("0 files updated"))
    .stdout(predicate::str::contains("0 files created"));

  let second = (read(root, "a.py")?, read(root, "b.css")?, read(root, "c.js")?);
  assert_eq!(first, second);

  Ok(())
}

#[test]
fn test_empty_file_is_left_alone() -> Result<()> {
  let temp_dir = tempdir()?;
  let root = temp_dir.path();
  write_files(root, &[("LICENSE", LICENSE), ("pkg/__init__.py", "")])?;

  boilerplate(root)?
    .assert()
    .success()
    .stdout(predicate::str::contains(" - pkg/__init__.py: unchanged"));

  assert_eq!(read(root, "pkg/__init__.py")?, "");
  Ok(())
}

#[test]
fn test_shebang_is_preserved() -> Result<()> {
  let temp_dir = tempdir()?;
  let root = temp_dir.path();
  write_files(
    root,
    &[("LICENSE", LICENSE), ("run.py", "#!/usr/bin/env python3\nimport sys\n")],
  )?;

  boilerplate(root)?.assert().success();

  let content = read(root, "run.py")?;
  assert_eq!(content, format!("#!/usr/bin/env python3\n\n{PY_HEADER}\nimport sys\n"));
  assert!(content.starts_with("#!/usr/bin/env python3\n\n# Copyright"));
  Ok(())
}

#[test]
fn test_year_update_changes_nothing_else() -> Result<()> {
  let temp_dir = tempdir()?;
  let root = temp_dir.path();
  let original = "# Copyright (c) 2020-2022 CRS4\n# custom wording\n\nBANNER = 'Copyright (c) 2020-2022'\n";
  write_files(root, &[("LICENSE", LICENSE), ("banner.py", original)])?;

  boilerplate(root)?
    .assert()
    .success()
    .stdout(predicate::str::contains(" - banner.py: updated"));

  assert_eq!(read(root, "banner.py")?, original.replace("2020-2022", "2020-2025"));
  Ok(())
}

#[test]
fn test_unsupported_extension_is_skipped() -> Result<()> {
  let temp_dir = tempdir()?;
  let root = temp_dir.path();
  write_files(
    root,
    &[("LICENSE", LICENSE), ("data.json", "{\"a\": 1}\n"), ("Makefile", "all:\n")],
  )?;

  boilerplate(root)?
    .assert()
    .success()
    .stdout(predicate::str::contains("data.json").not())
    .stdout(predicate::str::contains("0 files created"))
    .stdout(predicate::str::contains("0 errors"));

  assert_eq!(read(root, "data.json")?, "{\"a\": 1}\n");
  assert_eq!(read(root, "Makefile")?, "all:\n");
  Ok(())
}

#[test]
fn test_css_block_header() -> Result<()> {
  let temp_dir = tempdir()?;
  let root = temp_dir.path();
  write_files(root, &[("LICENSE", LICENSE), ("style.css", "body { margin: 0; }\n")])?;

  boilerplate(root)?.assert().success();

  let content = read(root, "style.css")?;
  assert_eq!(content, format!("/*\n{LICENSE_TEXT}*/\n\nbody {{ margin: 0; }}\n"));
  assert_eq!(content.matches(CANONICAL).count(), 1);
  Ok(())
}

#[test]
fn test_excluded_directories_are_not_walked() -> Result<()> {
  let temp_dir = tempdir()?;
  let root = temp_dir.path();
  let untouched = "x = 1\n";
  write_files(
    root,
    &[
      ("LICENSE", LICENSE),
      ("src/keep.py", untouched),
      (".venv/lib.py", untouched),
      ("build/gen.py", untouched),
      ("dist/pkg.js", untouched),
      ("venv/site.py", untouched),
      ("node_modules/dep/index.js", untouched),
      ("target/out.py", untouched),
    ],
  )?;

  boilerplate(root)?
    .args(["--exclude-dir", "target"])
    .assert()
    .success()
    .stdout(predicate::str::contains("1 files created"));

  assert!(read(root, "src/keep.py")?.starts_with("# Copyright (c) 2020-2025"));
  for skipped in [
    ".venv/lib.py",
    "build/gen.py",
    "dist/pkg.js",
    "venv/site.py",
    "node_modules/dep/index.js",
    "target/out.py",
  ] {
    assert_eq!(read(root, skipped)?, untouched, "{skipped} should not be modified");
  }
  Ok(())
}

#[test]
fn test_excluded_files_are_listed_but_not_counted() -> Result<()> {
  let temp_dir = tempdir()?;
  let root = temp_dir.path();
  write_files(
    root,
    &[
      ("LICENSE", LICENSE),
      ("setup.py", "from setuptools import setup\n"),
      ("vendor.min.js", "!function(){}();\n"),
      ("app.py", "x = 1\n"),
    ],
  )?;

  boilerplate(root)?
    .args(["--exclude-file", "setup.py", "--exclude-file", "*.min.js"])
    .assert()
    .success()
    .stdout(predicate::str::contains(" - setup.py: excluded"))
    .stdout(predicate::str::contains(" - vendor.min.js: excluded"))
    .stdout(predicate::str::contains("1 files created"))
    .stdout(predicate::str::contains("0 files unchanged"));

  assert_eq!(read(root, "setup.py")?, "from setuptools import setup\n");
  assert_eq!(read(root, "vendor.min.js")?, "!function(){}();\n");
  Ok(())
}

#[test]
fn test_check_mode_writes_nothing() -> Result<()> {
  let temp_dir = tempdir()?;
  let root = temp_dir.path();
  write_files(
    root,
    &[
      ("LICENSE", LICENSE),
      ("new.py", "x = 1\n"),
      ("old.py", "# Copyright (c) 2020-2021 CRS4\n"),
    ],
  )?;

  boilerplate(root)?
    .arg("--check")
    .assert()
    .code(1)
    .stdout(predicate::str::contains("1 files to update"))
    .stdout(predicate::str::contains("1 files missing a header"))
    .stdout(predicate::str::contains("Run without --check"));

  assert_eq!(read(root, "LICENSE")?, LICENSE);
  assert_eq!(read(root, "new.py")?, "x = 1\n");
  assert_eq!(read(root, "old.py")?, "# Copyright (c) 2020-2021 CRS4\n");
  Ok(())
}

#[test]
fn test_check_mode_passes_on_current_tree() -> Result<()> {
  let temp_dir = tempdir()?;
  let root = temp_dir.path();
  write_files(root, &[("LICENSE", LICENSE), ("a.py", "x = 1\n")])?;

  boilerplate(root)?.assert().success();
  boilerplate(root)?.arg("--check").assert().success();
  Ok(())
}

#[test]
fn test_check_mode_shows_diff() -> Result<()> {
  let temp_dir = tempdir()?;
  let root = temp_dir.path();
  write_files(root, &[("LICENSE", LICENSE), ("a.py", "x = 1\n")])?;

  boilerplate(root)?
    .args(["--check", "--show-diff"])
    .assert()
    .code(1)
    .stderr(predicate::str::contains("+# Copyright (c) 2020-2025 CRS4"))
    .stderr(predicate::str::contains(" x = 1"));
  Ok(())
}

#[test]
fn test_unreadable_file_does_not_abort_the_run() -> Result<()> {
  let temp_dir = tempdir()?;
  let root = temp_dir.path();
  write_files(root, &[("LICENSE", LICENSE), ("a.py", "x = 1\n"), ("z.py", "y = 2\n")])?;
  std::fs::write(root.join("m.py"), [0xff, 0xfe, 0x00, 0x81])?;

  boilerplate(root)?
    .assert()
    .success()
    .stdout(predicate::str::contains(" - m.py: error"))
    .stdout(predicate::str::contains("2 files created"))
    .stdout(predicate::str::contains("1 errors"))
    .stderr(predicate::str::contains("Failed to read file"));

  assert!(read(root, "a.py")?.starts_with("# Copyright"));
  assert!(read(root, "z.py")?.starts_with("# Copyright"));
  assert_eq!(std::fs::read(root.join("m.py"))?, vec![0xff, 0xfe, 0x00, 0x81]);
  Ok(())
}

#[test]
fn test_missing_license_is_fatal() -> Result<()> {
  let temp_dir = tempdir()?;
  let root = temp_dir.path();
  write_files(root, &[("a.py", "x = 1\n")])?;

  boilerplate(root)?
    .assert()
    .failure()
    .stderr(predicate::str::contains("is missing or unreadable"));

  assert_eq!(read(root, "a.py")?, "x = 1\n");
  Ok(())
}

#[test]
fn test_malformed_license_is_fatal() -> Result<()> {
  let temp_dir = tempdir()?;
  let root = temp_dir.path();
  write_files(root, &[("LICENSE", "All rights reserved.\n"), ("a.py", "x = 1\n")])?;

  boilerplate(root)?
    .assert()
    .failure()
    .stderr(predicate::str::contains("does not contain a \"Copyright\" notice"));

  assert_eq!(read(root, "LICENSE")?, "All rights reserved.\n");
  assert_eq!(read(root, "a.py")?, "x = 1\n");
  Ok(())
}

#[test]
fn test_custom_license_file_and_root() -> Result<()> {
  let temp_dir = tempdir()?;
  let root = temp_dir.path();
  write_files(
    root,
    &[
      ("docs/COPYING", "Copyright (c) 2020-2024 Example\n"),
      ("project/a.py", "x = 1\n"),
    ],
  )?;

  boilerplate(root)?
    .args(["--license-file", "docs/COPYING", "project"])
    .assert()
    .success()
    .stdout(predicate::str::contains(" - a.py: created"));

  assert_eq!(read(root, "docs/COPYING")?, "Copyright (c) 2020-2025 Example\n");
  assert_eq!(
    read(root, "project/a.py")?,
    "# Copyright (c) 2020-2025 Example\n\n\nx = 1\n"
  );
  Ok(())
}

#[test]
fn test_json_report() -> Result<()> {
  let temp_dir = tempdir()?;
  let root = temp_dir.path();
  write_files(root, &[("LICENSE", LICENSE), ("a.py", "x = 1\n"), ("b.py", "")])?;

  boilerplate(root)?
    .args(["--report-json", "report.json"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Generated JSON report at report.json"));

  let report: serde_json::Value = serde_json::from_str(&read(root, "report.json")?)?;
  assert_eq!(report["summary"]["created"], 1);
  assert_eq!(report["summary"]["unchanged"], 1);
  assert_eq!(report["summary"]["errors"], 0);
  assert_eq!(report["files"].as_array().map(Vec::len), Some(2));
  assert_eq!(report["files"][0]["status"], "created");
  assert_eq!(report["files"][1]["status"], "unchanged");
  assert!(report["generated_at"].is_string());
  Ok(())
}
