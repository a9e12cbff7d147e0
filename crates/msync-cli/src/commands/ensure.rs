//! `msync ensure`

use std::path::Path;

use colored::Colorize;
use msync_core::ensure_module;

use super::{load_config, print_outcome};
use crate::error::Result;

/// Create or repair the manifest and initializers of the configured module.
pub fn run_ensure(cwd: &Path, config_path: &Path) -> Result<()> {
    let config = load_config(cwd, config_path)?;
    let outcomes = ensure_module(&config)?;

    if outcomes.is_empty() {
        println!("{} Module is already set up", "OK".green().bold());
    }
    for outcome in &outcomes {
        print_outcome(outcome);
    }
    Ok(())
}
