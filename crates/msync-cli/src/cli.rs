//! CLI argument parsing using clap derive

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// manifest-sync - Keep an Odoo module's manifest and initializers in step with its files
#[derive(Parser, Debug)]
#[command(name = "msync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (TOML, JSON or YAML)
    #[arg(short, long, global = true, env = "MSYNC_CONFIG", default_value = msync_core::CONFIG_FILE_NAME)]
    pub config: PathBuf,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Write a configuration file and bootstrap the module
    ///
    /// Folders default to the conventional sub-folders that exist.
    ///
    /// Examples:
    ///   msync init                     # Module in the current directory
    ///   msync init addons/sale_extra   # Module elsewhere
    ///   msync init --views ui/views    # Override one folder
    Init {
        /// Module folder containing __manifest__.py
        #[arg(default_value = ".")]
        module: PathBuf,

        /// Folder of view definitions
        #[arg(long)]
        views: Option<PathBuf>,

        /// Folder of wizards
        #[arg(long)]
        wizard: Option<PathBuf>,

        /// Folder of controllers
        #[arg(long)]
        controllers: Option<PathBuf>,

        /// Folder of data files
        #[arg(long)]
        data: Option<PathBuf>,

        /// Folder of security files
        #[arg(long)]
        security: Option<PathBuf>,

        /// Folder of models
        #[arg(long)]
        models: Option<PathBuf>,

        /// Write the configuration with synchronization disarmed
        #[arg(long)]
        disabled: bool,

        /// Overwrite an existing configuration file
        #[arg(short, long)]
        force: bool,
    },

    /// Create or repair the manifest and initializers
    Ensure,

    /// Watch the configured folders and synchronize until interrupted
    Watch,

    /// Synchronize the creation of one file
    Created {
        /// Path of the new file
        path: PathBuf,
    },

    /// Synchronize the deletion of one file
    Deleted {
        /// Path of the removed file
        path: PathBuf,
    },
}
