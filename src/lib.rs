//! # boilerplate
//!
//! A tool that keeps the copyright/license header at the top of every source
//! file in a tree current.
//!
//! `boilerplate` takes the notice from the project's `LICENSE` file (starting
//! at its "Copyright" line), wraps it in the comment syntax of each supported
//! file type and walks the tree. Every file ends up in one of three states:
//!
//! * **unchanged** - it already carries `Copyright (c) <first>-<current>`, or
//!   it is empty
//! * **updated** - it carried an older year range, which is rewritten in
//!   place
//! * **created** - it had no notice, so the header is inserted at the top
//!   (after a shebang line, if any)
//!
//! Files with an unsupported extension are left alone, as are hidden
//! directories and `build`, `dist`, `venv` and `node_modules`.
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//!
//! use boilerplate::config::Settings;
//! use boilerplate::diff::DiffManager;
//! use boilerplate::processor::Processor;
//!
//! fn main() -> anyhow::Result<()> {
//!     let settings = Settings::new(PathBuf::from("."), 2025);
//!
//!     // Render the headers from LICENSE, then refresh its years
//!     let processor = Processor::new(&settings, false, DiffManager::default());
//!     let prepared = processor.refresh_license(&settings.comment_styles)?;
//!
//!     let run = processor.process(&prepared.templates);
//!     println!("{} files changed", run.summary.changed());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! * [`processor`] - Tree walking and header application
//! * [`templates`] - License text loading and per-extension rendering
//! * [`config`] - Run settings and the `.boilerplate.toml` file
//! * [`logging`] - Logging utilities for verbose output
//!
//! [`processor`]: crate::processor
//! [`templates`]: crate::templates
//! [`config`]: crate::config
//! [`logging`]: crate::logging

pub mod cli;
pub mod config;
pub mod diff;
pub mod error;
pub mod logging;
pub mod output;
pub mod processor;
pub mod report;
pub mod templates;
