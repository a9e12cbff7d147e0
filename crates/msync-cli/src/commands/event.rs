//! `msync created` / `msync deleted`

use std::path::Path;
use std::sync::Arc;

use colored::Colorize;
use msync_core::{ChangeKind, Dispatcher, SyncEvent};

use super::{absolutize, load_config, print_outcome};
use crate::error::{CliError, Result};
use crate::notifier::ConsoleNotifier;

/// Feed a single change through the dispatcher.
///
/// Every document's result is printed; the command fails if any of them
/// failed.
pub fn run_event(cwd: &Path, config_path: &Path, kind: ChangeKind, path: &Path) -> Result<()> {
    let config = load_config(cwd, config_path)?;
    let dispatcher = Dispatcher::new(config, Arc::new(ConsoleNotifier));

    let path = absolutize(cwd, path);
    let event = match kind {
        ChangeKind::Created => SyncEvent::created(path),
        ChangeKind::Deleted => SyncEvent::deleted(path),
    };

    let mut errors = Vec::new();
    for result in dispatcher.apply_all(&event) {
        match result {
            Ok(outcome) => print_outcome(&outcome),
            Err(e) => errors.push(e),
        }
    }

    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0).into()),
        n => {
            for e in &errors {
                eprintln!("{}: {e}", "error".red().bold());
            }
            Err(CliError::user(format!("{n} documents failed to update")))
        }
    }
}
