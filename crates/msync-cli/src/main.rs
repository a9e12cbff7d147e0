//! manifest-sync CLI
//!
//! Keeps the data list of `__manifest__.py` and the imports of each
//! `__init__.py` in step with the files of an Odoo-style module.

mod cli;
mod commands;
mod error;
mod logging;
mod notifier;

use clap::Parser;
use colored::Colorize;
use msync_core::ChangeKind;

use cli::{Cli, Commands};
use commands::FolderOverrides;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;
    tracing::debug!("Verbose mode enabled");

    match cli.command {
        Some(cmd) => execute_command(cmd, &cli.config),
        None => {
            println!("{} manifest-sync", "msync".green().bold());
            println!();
            println!("Run {} for available commands.", "msync --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(cmd: Commands, config: &std::path::Path) -> Result<()> {
    let cwd = std::env::current_dir()?;
    match cmd {
        Commands::Init {
            module,
            views,
            wizard,
            controllers,
            data,
            security,
            models,
            disabled,
            force,
        } => {
            let overrides = FolderOverrides {
                views,
                wizard,
                controllers,
                data,
                security,
                models,
            };
            commands::run_init(&cwd, config, &module, overrides, disabled, force)
        }
        Commands::Ensure => commands::run_ensure(&cwd, config),
        Commands::Watch => commands::run_watch(&cwd, config),
        Commands::Created { path } => commands::run_event(&cwd, config, ChangeKind::Created, &path),
        Commands::Deleted { path } => commands::run_event(&cwd, config, ChangeKind::Deleted, &path),
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_cli_error_user() {
        let error = crate::error::CliError::user("test error");
        assert_eq!(format!("{}", error), "test error");
    }
}
