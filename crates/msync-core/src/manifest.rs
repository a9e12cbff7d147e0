//! Manifest synchronizer
//!
//! Keeps the `'data': [...]` list of `__manifest__.py` in step with the
//! files of the watched folders. Every call reads the document from disk,
//! edits it in memory and writes it back in one piece.

use std::path::Path;

use msync_blocks::{
    CLOSE_TOKEN, DATA_MARKER, Insertion, LineDocument, disable_matching, entry_line,
    insertion_index, locate_block, parse_entries,
};
use msync_fs::{NormalizedPath, io};

use crate::bootstrap::{self, DEFAULT_MANIFEST_TEMPLATE, MANIFEST_FILE_NAME};
use crate::outcome::{Bootstrap, SyncOutcome};
use crate::{Error, Group, Result};

/// Synchronizer for one module's `__manifest__.py`.
#[derive(Debug, Clone)]
pub struct ManifestSynchronizer {
    module_folder: NormalizedPath,
    manifest: NormalizedPath,
}

impl ManifestSynchronizer {
    pub fn new(module_folder: impl AsRef<Path>) -> Self {
        let module_folder = NormalizedPath::resolved(module_folder);
        let manifest = module_folder.join(MANIFEST_FILE_NAME);
        Self {
            module_folder,
            manifest,
        }
    }

    pub fn manifest_path(&self) -> &NormalizedPath {
        &self.manifest
    }

    /// Create or migrate the manifest. See [`bootstrap::ensure_manifest`].
    pub fn ensure(&self) -> Result<Option<Bootstrap>> {
        bootstrap::ensure_manifest(&self.manifest)
    }

    /// Path of `file` as listed in the manifest: relative to the module
    /// folder, forward slashes.
    pub fn relative_path(&self, file: &Path) -> String {
        let file = NormalizedPath::new(file);
        let resolved = match (file.parent(), file.file_name()) {
            (Some(parent), Some(name)) => NormalizedPath::resolved(parent.to_native()).join(name),
            _ => file,
        };
        resolved.relative_to(&self.module_folder)
    }

    /// Insert `file` into the data list at its sorted position within `group`.
    ///
    /// A missing manifest is created from the template first.
    pub fn on_file_created(&self, file: &Path, group: Group) -> Result<SyncOutcome> {
        let entry = self.relative_path(file);
        let _span = tracing::debug_span!("manifest_insert", %group, %entry).entered();

        if io::create_if_missing(&self.manifest, DEFAULT_MANIFEST_TEMPLATE).map_err(|source| {
            Error::WriteFailure {
                path: self.manifest.to_native(),
                source,
            }
        })? {
            tracing::info!(path = %self.manifest, "created manifest from template");
        }

        let mut doc = self.load()?;
        let block = locate_block(doc.lines(), DATA_MARKER, CLOSE_TOKEN)
            .map_err(|e| Error::block(self.manifest.to_native(), e))?;
        let entries = parse_entries(doc.lines(), &block);

        match insertion_index(&entries, &block, group.as_str(), &entry) {
            Insertion::Duplicate => {
                tracing::debug!("entry already present");
                Ok(SyncOutcome::AlreadyPresent {
                    document: self.manifest.to_native(),
                    entry,
                })
            }
            Insertion::At(line) => {
                doc.insert(line, entry_line(&block.indent, &entry));
                bootstrap::write(&self.manifest, &doc.render())?;
                tracing::info!(line, "inserted manifest entry");
                Ok(SyncOutcome::Inserted {
                    document: self.manifest.to_native(),
                    entry,
                    line,
                })
            }
        }
    }

    /// Comment out every active line quoting `file`, anywhere in the manifest.
    pub fn on_file_deleted(&self, file: &Path, group: Group) -> Result<SyncOutcome> {
        let entry = self.relative_path(file);
        let _span = tracing::debug_span!("manifest_disable", %group, %entry).entered();

        let mut doc = self.load()?;
        let needle = format!("'{entry}'");
        let count = disable_matching(&mut doc, |line| line.contains(&needle));

        if count == 0 {
            return Ok(SyncOutcome::NothingToDisable {
                document: self.manifest.to_native(),
                entry,
            });
        }

        bootstrap::write(&self.manifest, &doc.render())?;
        tracing::info!(count, "disabled manifest entry");
        Ok(SyncOutcome::Disabled {
            document: self.manifest.to_native(),
            entry,
            count,
        })
    }

    fn load(&self) -> Result<LineDocument> {
        let content = io::read_text(&self.manifest).map_err(|source| Error::ReadFailure {
            path: self.manifest.to_native(),
            source,
        })?;
        Ok(LineDocument::parse(&content))
    }
}
