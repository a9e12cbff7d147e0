//! `msync init`

use std::path::{Path, PathBuf};

use colored::Colorize;
use msync_core::{SyncConfig, ensure_module};

use super::{absolutize, print_outcome};
use crate::error::{CliError, Result};

/// Folders given explicitly on the command line.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FolderOverrides {
    pub views: Option<PathBuf>,
    pub wizard: Option<PathBuf>,
    pub controllers: Option<PathBuf>,
    pub data: Option<PathBuf>,
    pub security: Option<PathBuf>,
    pub models: Option<PathBuf>,
}

impl FolderOverrides {
    fn apply(self, cwd: &Path, config: &mut SyncConfig) {
        let resolve = |path: PathBuf| absolutize(cwd, &path);
        if let Some(path) = self.views {
            config.views_path = Some(resolve(path));
        }
        if let Some(path) = self.wizard {
            config.wizard_path = Some(resolve(path));
        }
        if let Some(path) = self.controllers {
            config.controllers_path = Some(resolve(path));
        }
        if let Some(path) = self.data {
            config.data_path = Some(resolve(path));
        }
        if let Some(path) = self.security {
            config.security_path = Some(resolve(path));
        }
        if let Some(path) = self.models {
            config.models_path = Some(resolve(path));
        }
    }
}

/// Write a configuration for `module` and bootstrap it.
pub fn run_init(
    cwd: &Path,
    config_path: &Path,
    module: &Path,
    overrides: FolderOverrides,
    disabled: bool,
    force: bool,
) -> Result<()> {
    let config_path = absolutize(cwd, config_path);
    if config_path.exists() && !force {
        return Err(CliError::user(format!(
            "{} already exists. Use --force to overwrite it.",
            config_path.display()
        )));
    }

    let module = absolutize(cwd, module);
    if !module.is_dir() {
        return Err(CliError::user(format!(
            "Module folder {} does not exist",
            module.display()
        )));
    }

    let mut config = SyncConfig::discover(module);
    overrides.apply(cwd, &mut config);
    config.enabled = !disabled;
    config.save(&config_path)?;
    tracing::debug!(path = %config_path.display(), "wrote config");

    for outcome in ensure_module(&config)? {
        print_outcome(&outcome);
    }

    let watched = config.watched_folders();
    println!(
        "{} Configuration written to {}",
        "OK".green().bold(),
        config_path.display()
    );
    if watched.is_empty() {
        println!("   No folders to watch yet");
    }
    for folder in watched {
        println!("   Watching: {}", folder.as_str().yellow());
    }
    if disabled {
        println!("   Synchronization is {}", "disabled".yellow());
    }
    Ok(())
}
