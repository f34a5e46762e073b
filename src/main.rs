//! # boilerplate
//!
//! Keeps the copyright header at the top of every source file current.

use anyhow::Result;
use boilerplate::cli::{Cli, run};

fn main() -> Result<()> {
  let cli = Cli::parse_args();
  run(cli.run_args)
}
