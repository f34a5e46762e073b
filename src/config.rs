//! # Configuration Module
//!
//! This module holds the [`Settings`] for a run: the tree to walk, the license
//! file, the copyright year range, the extension table and the exclusions.
//! Settings are built once at startup and passed explicitly to the template
//! builder and the processor.
//!
//! Defaults can be adjusted with a `.boilerplate.toml` file in the root (or
//! the path in the `BOILERPLATE_CONFIG` environment variable):
//!
//! ```toml
//! first-year = 2020
//! exclude-dirs = ["target"]
//! exclude-files = ["setup.py", "*.min.js"]
//!
//! [comment-styles]
//! ".rs" = "//"
//! ".vue" = ["<!--", "-->"]
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::templates::builtin_comment_styles;
use crate::verbose_log;

/// The default config file name.
pub const DEFAULT_CONFIG_FILENAME: &str = ".boilerplate.toml";

/// Environment variable for specifying config file path.
pub const CONFIG_ENV_VAR: &str = "BOILERPLATE_CONFIG";

/// The license file looked up in the root when none is given.
pub const DEFAULT_LICENSE_FILENAME: &str = "LICENSE";

/// First year of the canonical copyright range.
pub const DEFAULT_FIRST_YEAR: i32 = 2020;

/// Directory names never descended into (hidden directories are skipped too).
pub const DEFAULT_EXCLUDE_DIRS: [&str; 4] = ["build", "dist", "venv", "node_modules"];

/// Comment tokens as written in the config file: a single prefix token or a
/// list of delimiters.
///
/// The list is validated later, when headers are rendered.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum CommentTokens {
  Single(String),
  Multiple(Vec<String>),
}

impl CommentTokens {
  pub fn into_tokens(self) -> Vec<String> {
    match self {
      Self::Single(token) => vec![token],
      Self::Multiple(tokens) => tokens,
    }
  }
}

/// Contents of a `.boilerplate.toml` file.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
  /// License file, relative to the root unless absolute.
  #[serde(default)]
  pub license_file: Option<PathBuf>,

  /// First year of the copyright range.
  #[serde(default)]
  pub first_year: Option<i32>,

  /// Extra directory names to skip.
  #[serde(default)]
  pub exclude_dirs: Vec<String>,

  /// File names (or glob patterns) to skip.
  #[serde(default)]
  pub exclude_files: Vec<String>,

  /// Comment styles added to, or overriding, the builtin table.
  /// Keys are extensions with their leading dot (e.g. ".rs").
  #[serde(default)]
  pub comment_styles: BTreeMap<String, CommentTokens>,
}

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// The config file could not be read.
  #[error("Failed to read config file '{path}': {source}")]
  ReadError { path: PathBuf, source: std::io::Error },

  /// The config file contains invalid TOML.
  #[error("Failed to parse config file '{path}': {source}")]
  ParseError { path: PathBuf, source: toml::de::Error },

  /// An extension key is not written as ".ext".
  #[error("Invalid extension '{extension}': {message}")]
  InvalidExtension { extension: String, message: String },
}

impl Config {
  /// Load configuration from a file.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    verbose_log!("Loading config from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
      path: path.to_path_buf(),
      source: e,
    })?;

    Self::parse(path, &content)
  }

  /// Parse and validate configuration from TOML text.
  pub fn parse(path: &Path, content: &str) -> Result<Self, ConfigError> {
    let config: Config = toml::from_str(content).map_err(|e| ConfigError::ParseError {
      path: path.to_path_buf(),
      source: e,
    })?;

    config.validate()?;

    verbose_log!("Loaded {} comment style overrides", config.comment_styles.len());

    Ok(config)
  }

  /// Extension keys must carry their leading dot and nothing else.
  fn validate(&self) -> Result<(), ConfigError> {
    for extension in self.comment_styles.keys() {
      if !extension.starts_with('.') || extension.len() < 2 {
        return Err(ConfigError::InvalidExtension {
          extension: extension.clone(),
          message: "extension must start with a leading dot, e.g. \".py\"".to_string(),
        });
      }

      if extension[1..].contains(['.', '/', '\\']) {
        return Err(ConfigError::InvalidExtension {
          extension: extension.clone(),
          message: "extension must be a single suffix".to_string(),
        });
      }
    }

    Ok(())
  }
}

/// Everything a run needs, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
  /// Root of the tree to walk.
  pub root: PathBuf,

  /// License file the header text is taken from.
  pub license_path: PathBuf,

  /// First year of the canonical range.
  pub first_year: i32,

  /// Last year of the canonical range.
  pub current_year: i32,

  /// Extension (with dot) to declared comment tokens.
  pub comment_styles: BTreeMap<String, Vec<String>>,

  /// Directory names that are not descended into.
  pub exclude_dirs: BTreeSet<String>,

  /// File names or glob patterns that are skipped.
  pub exclude_files: Vec<String>,
}

impl Settings {
  /// Builtin settings for the tree at `root`.
  pub fn new(root: PathBuf, current_year: i32) -> Self {
    let license_path = root.join(DEFAULT_LICENSE_FILENAME);
    Self {
      root,
      license_path,
      first_year: DEFAULT_FIRST_YEAR,
      current_year,
      comment_styles: builtin_comment_styles(),
      exclude_dirs: DEFAULT_EXCLUDE_DIRS.iter().map(|dir| dir.to_string()).collect(),
      exclude_files: Vec::new(),
    }
  }

  /// Applies a config file on top of the builtin settings.
  ///
  /// Exclusions are added to the defaults; comment styles replace the builtin
  /// entry for the same extension.
  pub fn merge_config(&mut self, config: Config) {
    if let Some(license_file) = config.license_file {
      self.license_path = self.resolve(license_file);
    }
    if let Some(first_year) = config.first_year {
      self.first_year = first_year;
    }

    self.exclude_dirs.extend(config.exclude_dirs);
    self.exclude_files.extend(config.exclude_files);

    for (extension, tokens) in config.comment_styles {
      verbose_log!("Using config comment style for: {}", extension);
      self.comment_styles.insert(extension, tokens.into_tokens());
    }
  }

  /// Resolves a path relative to the root.
  pub fn resolve(&self, path: PathBuf) -> PathBuf {
    if path.is_absolute() { path } else { self.root.join(path) }
  }
}

/// Discover the configuration file path.
///
/// The configuration file is discovered in the following order:
/// 1. Path specified via `--config` flag (passed as `explicit_path`)
/// 2. Path specified via `BOILERPLATE_CONFIG` environment variable
/// 3. `.boilerplate.toml` in the root
pub fn discover_config_path(explicit_path: Option<&Path>, root: &Path) -> Option<PathBuf> {
  if let Some(path) = explicit_path {
    if path.exists() {
      verbose_log!("Using explicit config path: {}", path.display());
      return Some(path.to_path_buf());
    }
    verbose_log!("Explicit config path does not exist: {}", path.display());
    return None;
  }

  if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
    let path = PathBuf::from(&env_path);
    if path.exists() {
      verbose_log!("Using config from {}: {}", CONFIG_ENV_VAR, path.display());
      return Some(path);
    }
    verbose_log!("{} path does not exist: {}", CONFIG_ENV_VAR, env_path);
  }

  let root_config = root.join(DEFAULT_CONFIG_FILENAME);
  if root_config.exists() {
    verbose_log!("Using root config: {}", root_config.display());
    return Some(root_config);
  }

  verbose_log!("No config file found");
  None
}

/// Load configuration from the discovered path, if any.
pub fn load_config(explicit_path: Option<&Path>, root: &Path, no_config: bool) -> Result<Option<Config>> {
  if no_config {
    verbose_log!("Config file discovery disabled (--no-config)");
    return Ok(None);
  }

  match discover_config_path(explicit_path, root) {
    Some(path) => {
      let config = Config::load(&path).with_context(|| format!("Failed to load config from {}", path.display()))?;
      Ok(Some(config))
    }
    None => Ok(None),
  }
}
