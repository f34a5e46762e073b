//! # Templates Module
//!
//! This module derives the canonical license text from the `LICENSE` file and
//! renders it as a comment block for each supported file extension.
//!
//! The module includes:
//! - [`LicenseText`] for the license notice, starting at its "Copyright" line
//! - [`CommentStyle`] for the two ways a header can be embedded as a comment
//! - [`TemplateSet`] for the headers rendered once per run, keyed by extension
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use boilerplate::templates::{LicenseText, TemplateSet, builtin_comment_styles};
//!
//! # fn main() -> anyhow::Result<()> {
//! let license = LicenseText::load(Path::new("LICENSE"))?;
//! let templates = TemplateSet::build(&license, &builtin_comment_styles())?;
//!
//! if let Some(header) = templates.for_path(Path::new("app/main.py")) {
//!   print!("{header}");
//! }
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::BoilerplateError;
use crate::verbose_log;

/// The literal a license file must contain; everything before it is dropped.
pub const COPYRIGHT_MARKER: &str = "Copyright";

/// The license notice used as the body of every header.
///
/// Always starts at the first occurrence of [`COPYRIGHT_MARKER`] in the
/// license file, so any title lines ("MIT License", ...) are not repeated in
/// source files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseText(String);

impl LicenseText {
  /// Reads the license file at `path` and truncates it to the copyright
  /// notice.
  ///
  /// # Errors
  ///
  /// - [`BoilerplateError::MissingLicenseFile`] if the file cannot be read
  /// - [`BoilerplateError::MalformedLicense`] if it has no "Copyright" notice
  pub fn load(path: &Path) -> Result<Self, BoilerplateError> {
    verbose_log!("Loading license from: {}", path.display());

    let content = fs::read_to_string(path).map_err(|source| BoilerplateError::MissingLicenseFile {
      path: path.to_path_buf(),
      source,
    })?;

    Self::from_content(path, &content)
  }

  /// Builds the license text from already-read file content.
  ///
  /// `path` is only used to name the file in the error.
  pub fn from_content(path: &Path, content: &str) -> Result<Self, BoilerplateError> {
    let start = content
      .find(COPYRIGHT_MARKER)
      .ok_or_else(|| BoilerplateError::MalformedLicense {
        path: path.to_path_buf(),
        reason: format!("does not contain a \"{COPYRIGHT_MARKER}\" notice"),
      })?;

    Ok(Self(content[start..].to_string()))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl std::fmt::Display for LicenseText {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(&self.0)
  }
}

/// How a header is embedded as a comment in a given file type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentStyle {
  /// Every line is prefixed with a token (e.g. `#`).
  Line(String),

  /// The untouched text block is wrapped between an opening and a closing
  /// delimiter line (e.g. `/*` and `*/`).
  Block { open: String, close: String },
}

impl CommentStyle {
  /// Create a line-comment style.
  pub fn line(token: &str) -> Self {
    Self::Line(token.to_string())
  }

  /// Create a paired-delimiter style.
  pub fn block(open: &str, close: &str) -> Self {
    Self::Block {
      open: open.to_string(),
      close: close.to_string(),
    }
  }

  /// Builds a style from its declared tokens: one token is a line style, two
  /// tokens are an open/close pair.
  ///
  /// # Errors
  ///
  /// [`BoilerplateError::InvalidCommentStyle`] for any other number of
  /// tokens, or for an empty token.
  pub fn from_tokens(extension: &str, tokens: &[String]) -> Result<Self, BoilerplateError> {
    let invalid = |message: String| BoilerplateError::InvalidCommentStyle {
      extension: extension.to_string(),
      message,
    };

    if tokens.iter().any(|token| token.is_empty()) {
      return Err(invalid("comment delimiters cannot be empty".to_string()));
    }

    match tokens {
      [token] => Ok(Self::line(token)),
      [open, close] => Ok(Self::block(open, close)),
      _ => Err(invalid(format!(
        "expected a single token or an open/close pair, got {} tokens",
        tokens.len()
      ))),
    }
  }
}

/// Wraps the license text in the given comment style.
///
/// - Block styles emit `<open>\n<license><close>\n`, keeping the license's
///   own line breaks.
/// - Line styles trim every line and prefix it with the token (blank lines
///   get the bare token), then end with an empty line so the header stands
///   apart from the code that follows.
pub fn render(license: &LicenseText, style: &CommentStyle) -> String {
  match style {
    CommentStyle::Block { open, close } => format!("{open}\n{license}{close}\n"),
    CommentStyle::Line(token) => {
      let lines: Vec<String> = license
        .as_str()
        .lines()
        .map(|line| {
          let line = line.trim();
          if line.is_empty() {
            token.clone()
          } else {
            format!("{token} {line}")
          }
        })
        .collect();

      let mut result = lines.join("\n");
      result.push_str("\n\n");
      result
    }
  }
}

/// The builtin extension table, as declared comment tokens.
///
/// Keys include the leading dot. Anything not listed here is skipped.
pub fn builtin_comment_styles() -> BTreeMap<String, Vec<String>> {
  let hash = || vec!["#".to_string()];
  let c_block = || vec!["/*".to_string(), "*/".to_string()];

  BTreeMap::from([
    (".py".to_string(), hash()),
    (".ts".to_string(), c_block()),
    (".js".to_string(), c_block()),
    (".html".to_string(), vec!["<!--".to_string(), "-->".to_string()]),
    (".css".to_string(), c_block()),
    (".yaml".to_string(), hash()),
    (".yml".to_string(), hash()),
  ])
}

/// Returns the extension of `path` with its leading dot, if it has one.
///
/// Dotfiles such as `.bashrc` have no extension.
pub fn dotted_extension(path: &Path) -> Option<String> {
  path
    .extension()
    .and_then(|ext| ext.to_str())
    .map(|ext| format!(".{ext}"))
}

/// Headers rendered once per run, one per supported extension.
#[derive(Debug, Clone, Default)]
pub struct TemplateSet {
  headers: BTreeMap<String, String>,
}

impl TemplateSet {
  /// Renders the license for every entry of the extension table.
  ///
  /// # Errors
  ///
  /// Fails with the first [`BoilerplateError::InvalidCommentStyle`] found; no
  /// partial set is returned.
  pub fn build(license: &LicenseText, styles: &BTreeMap<String, Vec<String>>) -> Result<Self, BoilerplateError> {
    let headers = styles
      .iter()
      .map(|(extension, tokens)| {
        let style = CommentStyle::from_tokens(extension, tokens)?;
        Ok((extension.clone(), render(license, &style)))
      })
      .collect::<Result<BTreeMap<_, _>, BoilerplateError>>()?;

    verbose_log!("Rendered headers for {} extensions", headers.len());

    Ok(Self { headers })
  }

  /// The rendered header for the file's extension, or `None` when the
  /// extension is not supported.
  pub fn for_path(&self, path: &Path) -> Option<&str> {
    let extension = dotted_extension(path)?;
    self.headers.get(&extension).map(String::as_str)
  }

  pub fn extensions(&self) -> impl Iterator<Item = &str> {
    self.headers.keys().map(String::as_str)
  }
}
