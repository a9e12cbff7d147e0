//! Initializer synchronizer
//!
//! Keeps the `from . import <module>` lines of one folder's `__init__.py`
//! in a single alphabetical list.

use std::path::Path;

use msync_blocks::{Insertion, LineDocument, disable_matching, import_insertion, import_statement};
use msync_fs::{NormalizedPath, io};

use crate::bootstrap::{self, INIT_FILE_NAME};
use crate::outcome::SyncOutcome;
use crate::{Error, Result};

/// Synchronizer for one folder's `__init__.py`.
#[derive(Debug, Clone)]
pub struct InitializerSynchronizer {
    folder: NormalizedPath,
    init_file: NormalizedPath,
}

impl InitializerSynchronizer {
    pub fn new(folder: impl AsRef<Path>) -> Self {
        let folder = NormalizedPath::resolved(folder);
        let init_file = folder.join(INIT_FILE_NAME);
        Self { folder, init_file }
    }

    pub fn folder(&self) -> &NormalizedPath {
        &self.folder
    }

    pub fn init_path(&self) -> &NormalizedPath {
        &self.init_file
    }

    /// Create an empty `__init__.py` if missing.
    pub fn ensure(&self) -> Result<bool> {
        bootstrap::ensure_initializer(&self.folder)
    }

    /// Add `from . import <module>` at its sorted position.
    pub fn on_module_created(&self, module: &str) -> Result<SyncOutcome> {
        let _span = tracing::debug_span!("init_insert", folder = %self.folder, module).entered();
        self.ensure()?;

        let mut doc = self.load()?;
        match import_insertion(&doc, module) {
            Insertion::Duplicate => Ok(SyncOutcome::AlreadyPresent {
                document: self.init_file.to_native(),
                entry: module.to_string(),
            }),
            Insertion::At(line) => {
                doc.insert(line, import_statement(module));
                bootstrap::write(&self.init_file, &doc.render())?;
                tracing::info!(line, "inserted import");
                Ok(SyncOutcome::Inserted {
                    document: self.init_file.to_native(),
                    entry: module.to_string(),
                    line,
                })
            }
        }
    }

    /// Comment out every active `from . import <module>` line.
    ///
    /// A missing `__init__.py` has nothing to disable.
    pub fn on_module_deleted(&self, module: &str) -> Result<SyncOutcome> {
        let _span = tracing::debug_span!("init_disable", folder = %self.folder, module).entered();

        let mut doc = match io::read_text(&self.init_file) {
            Ok(content) => LineDocument::parse(&content),
            Err(e) if e.is_not_found() => LineDocument::default(),
            Err(source) => {
                return Err(Error::ReadFailure {
                    path: self.init_file.to_native(),
                    source,
                });
            }
        };

        let statement = import_statement(module);
        let count = disable_matching(&mut doc, |line| line.trim() == statement);
        if count == 0 {
            return Ok(SyncOutcome::NothingToDisable {
                document: self.init_file.to_native(),
                entry: module.to_string(),
            });
        }

        bootstrap::write(&self.init_file, &doc.render())?;
        tracing::info!(count, "disabled import");
        Ok(SyncOutcome::Disabled {
            document: self.init_file.to_native(),
            entry: module.to_string(),
            count,
        })
    }

    fn load(&self) -> Result<LineDocument> {
        let content = io::read_text(&self.init_file).map_err(|source| Error::ReadFailure {
            path: self.init_file.to_native(),
            source,
        })?;
        Ok(LineDocument::parse(&content))
    }
}
