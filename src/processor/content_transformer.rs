//! # Content Transformer Module
//!
//! This module decides what happens to a file's text: whether it already
//! carries the current copyright notice, needs its year range refreshed, or
//! needs the header inserted (after a shebang line, if any).
//!
//! Everything here works on strings only; reading and writing files is left to
//! [`FileIO`](super::FileIO).

use std::sync::LazyLock;

use regex::Regex;

/// Matches an existing copyright notice such as `Copyright (c) 2020-2024`.
static COPYRIGHT_REGEX: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"Copyright \(c\) [0-9-]+").expect("copyright regex must compile"));

/// Result of transforming a file's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transformation {
  /// Nothing to do: empty file, or the notice is already current.
  Unchanged,
  /// The year range of an existing notice was rewritten.
  Updated(String),
  /// The header was inserted.
  Created(String),
}

/// State of the copyright notice in a file's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum YearUpdate {
  /// No copyright notice was found.
  Missing,
  /// The notice already carries the canonical year range.
  Current,
  /// The notice was outdated; holds the refreshed content.
  Outdated(String),
}

impl Transformation {
  /// The new file content, if the file changes.
  pub fn new_content(&self) -> Option<&str> {
    match self {
      Self::Unchanged => None,
      Self::Updated(content) | Self::Created(content) => Some(content),
    }
  }
}

/// Header detection, year refresh and insertion for a single file's text.
pub struct ContentTransformer {
  /// The canonical notice, e.g. `Copyright (c) 2020-2025`
  canonical_notice: String,
}

impl ContentTransformer {
  /// Creates a transformer whose canonical notice spans `first_year` to
  /// `current_year`.
  pub fn new(first_year: i32, current_year: i32) -> Self {
    Self {
      canonical_notice: format!("Copyright (c) {first_year}-{current_year}"),
    }
  }

  pub fn canonical_notice(&self) -> &str {
    &self.canonical_notice
  }

  /// Splits off a shebang line so the header can go right after it.
  ///
  /// Returns the preserved head (the shebang line, its newline and one blank
  /// line) and the remaining content. Files without a shebang get an empty
  /// head.
  pub fn extract_prefix<'a>(&self, content: &'a str) -> (String, &'a str) {
    if !content.starts_with("#!") {
      return (String::new(), content);
    }

    let (first_line, rest) = match content.find('\n') {
      Some(end) => (&content[..end], &content[end + 1..]),
      None => (content, ""),
    };

    (format!("{first_line}\n\n"), rest)
  }

  /// Refreshes the year range of the first copyright notice found.
  ///
  /// Every occurrence of the matched text in the whole content is replaced,
  /// not just the one inside the header.
  pub fn update_year(&self, content: &str) -> YearUpdate {
    let Some(found) = COPYRIGHT_REGEX.find(content) else {
      return YearUpdate::Missing;
    };
    if found.as_str() == self.canonical_notice {
      return YearUpdate::Current;
    }

    YearUpdate::Outdated(content.replace(found.as_str(), &self.canonical_notice))
  }

  /// Decides how `content` must change to carry `header`.
  ///
  /// - Empty content is never touched.
  /// - Content with a copyright notice only gets its year range refreshed.
  /// - Otherwise the header is inserted at the top, after a shebang line if
  ///   there is one, separated from the original content by a blank line.
  pub fn transform(&self, header: &str, content: &str) -> Transformation {
    if content.is_empty() {
      return Transformation::Unchanged;
    }

    match self.update_year(content) {
      YearUpdate::Outdated(updated) => return Transformation::Updated(updated),
      YearUpdate::Current => return Transformation::Unchanged,
      YearUpdate::Missing => {}
    }

    let (head, tail) = self.extract_prefix(content);
    let separator = if tail.starts_with('\n') { "" } else { "\n" };

    Transformation::Created(format!("{head}{header}{separator}{tail}"))
  }
}
