//! `msync watch`

use std::path::Path;
use std::sync::Arc;
use std::sync::mpsc;

use colored::Colorize;
use msync_core::{Dispatcher, FileWatcher, ensure_module};

use super::{load_config, print_outcome};
use crate::error::{CliError, Result};
use crate::notifier::ConsoleNotifier;

/// Bootstrap the module, then synchronize every change until interrupted.
pub fn run_watch(cwd: &Path, config_path: &Path) -> Result<()> {
    let config = load_config(cwd, config_path)?;
    if !config.enabled {
        return Err(CliError::user(format!(
            "Synchronization is disabled in {}",
            config_path.display()
        )));
    }

    for outcome in ensure_module(&config)? {
        print_outcome(&outcome);
    }

    let (tx, rx) = mpsc::channel();
    let watcher = FileWatcher::start(&config.watched_folders(), tx)?;
    if watcher.watched().is_empty() {
        return Err(CliError::user("None of the configured folders exist"));
    }

    for folder in watcher.watched() {
        println!("{} {}", "Watching".cyan().bold(), folder);
    }
    println!("Press Ctrl-C to stop.");

    let dispatcher = Dispatcher::new(config, Arc::new(ConsoleNotifier));
    dispatcher.run(&rx);
    drop(watcher);
    Ok(())
}
