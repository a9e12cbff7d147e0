//! Manifest and initializer synchronization
//!
//! Keeps two generated lists of an Odoo-style module in step with the files
//! on disk:
//!
//! - the `'data': [...]` list of `__manifest__.py`, grouped by folder
//!   (`views/`, `wizard/`, `controllers/`, `data/`, `security/`)
//! - the `from . import <module>` lines of each Python folder's `__init__.py`
//!
//! New files are inserted at their sorted position; deleted files are
//! commented out rather than removed.
//!
//! # Architecture
//!
//! ```text
//!   FileWatcher (notify) --SyncEvent--> Dispatcher --+--> ManifestSynchronizer
//!                                           |         +--> InitializerSynchronizer
//!                                           v
//!                                        Notifier
//! ```
//!
//! Synchronizers hold no document state between calls; each event re-reads
//! the document, edits it with `msync-blocks` and writes it back atomically.

pub mod bootstrap;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod group;
pub mod initializer;
pub mod manifest;
pub mod notifier;
pub mod outcome;
pub mod watcher;

pub use bootstrap::{
    DEFAULT_MANIFEST_TEMPLATE, INIT_FILE_NAME, MANIFEST_FILE_NAME, Migration, ensure_module,
    migrate_manifest,
};
pub use config::{CONFIG_FILE_NAME, CONFIG_SECTION, SyncConfig};
pub use dispatch::{ChangeKind, Dispatcher, SyncEvent, Target};
pub use error::{Error, Result};
pub use group::Group;
pub use initializer::InitializerSynchronizer;
pub use manifest::ManifestSynchronizer;
pub use notifier::{MemoryNotifier, Notification, Notifier, TracingNotifier};
pub use outcome::{Bootstrap, SyncOutcome};
pub use watcher::FileWatcher;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn error_block_not_found_displays_path() {
        let error = Error::BlockNotFound {
            path: PathBuf::from("/m/__manifest__.py"),
            marker: "'data': [".into(),
        };
        let display = error.to_string();
        assert!(display.contains("/m/__manifest__.py"), "got: {display}");
        assert!(display.contains("'data': ["), "got: {display}");
    }
}
