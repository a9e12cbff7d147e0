//! Command implementations
//!
//! Every command takes the working directory explicitly; relative paths on
//! the command line are resolved against it.

mod ensure;
mod event;
mod init;
mod watch;

pub use ensure::run_ensure;
pub use event::run_event;
pub use init::{FolderOverrides, run_init};
pub use watch::run_watch;

use std::path::{Path, PathBuf};

use colored::Colorize;
use msync_core::{SyncConfig, SyncOutcome};

use crate::error::{CliError, Result};

/// `path` made absolute against `cwd`.
pub(crate) fn absolutize(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

/// Load the configuration file, with a hint when it does not exist yet.
pub(crate) fn load_config(cwd: &Path, path: &Path) -> Result<SyncConfig> {
    let path = absolutize(cwd, path);
    if !path.is_file() {
        return Err(CliError::user(format!(
            "No configuration at {}. Run 'msync init' first.",
            path.display()
        )));
    }
    Ok(SyncConfig::load(&path)?)
}

pub(crate) fn print_outcome(outcome: &SyncOutcome) {
    let tag = match outcome {
        SyncOutcome::Ignored { .. } => "SKIP".yellow().bold(),
        o if o.is_change() => "OK".green().bold(),
        _ => "--".dimmed(),
    };
    println!("{tag} {outcome}");
}
