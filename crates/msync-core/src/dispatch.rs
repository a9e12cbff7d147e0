//! Event dispatch
//!
//! Drivers turn filesystem notifications into [`SyncEvent`] messages and
//! push them into a channel. The [`Dispatcher`] consumes them one at a time,
//! so at most one edit per document is ever in flight.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc::Receiver;

use msync_fs::NormalizedPath;

use crate::bootstrap::INIT_FILE_NAME;
use crate::initializer::InitializerSynchronizer;
use crate::manifest::ManifestSynchronizer;
use crate::notifier::Notifier;
use crate::outcome::SyncOutcome;
use crate::{Group, Result, SyncConfig};

/// Kind of filesystem change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Created,
    Deleted,
}

/// A filesystem change to synchronize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncEvent {
    pub kind: ChangeKind,
    pub path: PathBuf,
}

impl SyncEvent {
    pub fn created(path: impl Into<PathBuf>) -> Self {
        Self {
            kind: ChangeKind::Created,
            path: path.into(),
        }
    }

    pub fn deleted(path: impl Into<PathBuf>) -> Self {
        Self {
            kind: ChangeKind::Deleted,
            path: path.into(),
        }
    }
}

/// Document an event applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// The manifest's data list, under this group
    Manifest(Group),
    /// The initializer of this folder, for this module name
    Initializer { folder: NormalizedPath, module: String },
}

/// Routes events to the synchronizers of one module.
pub struct Dispatcher {
    config: SyncConfig,
    manifest: ManifestSynchronizer,
    groups: Vec<(Group, NormalizedPath)>,
    initializers: Vec<NormalizedPath>,
    notifier: Arc<dyn Notifier>,
}

impl Dispatcher {
    pub fn new(config: SyncConfig, notifier: Arc<dyn Notifier>) -> Self {
        let manifest = ManifestSynchronizer::new(&config.module_folder);
        let groups = config.group_folders();
        let initializers = config.initializer_folders();
        Self {
            config,
            manifest,
            groups,
            initializers,
            notifier,
        }
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Work out which documents `path` feeds.
    ///
    /// Only direct children of a configured folder count: `*.xml` files feed
    /// the manifest under the folder's group, `*.py` files other than
    /// `__init__.py` feed the folder's initializer.
    pub fn classify(&self, path: &Path) -> Vec<Target> {
        let path = NormalizedPath::new(path);
        let (Some(parent), Some(name)) = (path.parent(), path.file_name()) else {
            return Vec::new();
        };
        let parent = NormalizedPath::resolved(parent.to_native());

        match path.extension() {
            Some("xml") => self
                .groups
                .iter()
                .filter(|(_, folder)| *folder == parent)
                .map(|(group, _)| Target::Manifest(*group))
                .collect(),
            Some("py") if name != INIT_FILE_NAME => {
                let module = path.file_stem().unwrap_or(name).to_string();
                self.initializers
                    .iter()
                    .filter(|folder| **folder == parent)
                    .map(|folder| Target::Initializer {
                        folder: folder.clone(),
                        module: module.clone(),
                    })
                    .collect()
            }
            _ => Vec::new(),
        }
    }

    /// Apply one event to every document it concerns, one result per
    /// document. A failing document does not stop the others.
    pub fn apply_all(&self, event: &SyncEvent) -> Vec<Result<SyncOutcome>> {
        if !self.config.enabled {
            return vec![Ok(SyncOutcome::Ignored {
                path: event.path.clone(),
                reason: "synchronization is disabled".into(),
            })];
        }

        let targets = self.classify(&event.path);
        if targets.is_empty() {
            return vec![Ok(SyncOutcome::Ignored {
                path: event.path.clone(),
                reason: "not in a watched folder".into(),
            })];
        }

        targets
            .into_iter()
            .map(|target| self.apply(event, target))
            .collect()
    }

    /// Apply one event, failing if any document failed.
    pub fn handle(&self, event: &SyncEvent) -> Result<Vec<SyncOutcome>> {
        self.apply_all(event).into_iter().collect()
    }

    fn apply(&self, event: &SyncEvent, target: Target) -> Result<SyncOutcome> {
        match (target, event.kind) {
            (Target::Manifest(group), ChangeKind::Created) => {
                self.manifest.on_file_created(&event.path, group)
            }
            (Target::Manifest(group), ChangeKind::Deleted) => {
                self.manifest.on_file_deleted(&event.path, group)
            }
            (Target::Initializer { folder, module }, ChangeKind::Created) => {
                InitializerSynchronizer::new(folder.to_native()).on_module_created(&module)
            }
            (Target::Initializer { folder, module }, ChangeKind::Deleted) => {
                InitializerSynchronizer::new(folder.to_native()).on_module_deleted(&module)
            }
        }
    }

    /// Handle one event and report every result through the notifier.
    ///
    /// Returns the number of documents that failed.
    pub fn dispatch(&self, event: &SyncEvent) -> usize {
        tracing::debug!(kind = ?event.kind, path = %event.path.display(), "dispatching event");

        let mut failures = 0;
        for result in self.apply_all(event) {
            match result {
                Ok(outcome @ SyncOutcome::Ignored { .. }) => {
                    tracing::debug!("{outcome}");
                }
                Ok(outcome) => self.notifier.info(&outcome.to_string()),
                Err(e) => {
                    failures += 1;
                    self.notifier.error(&e.to_string());
                }
            }
        }
        failures
    }

    /// Consume events until every sender is dropped.
    pub fn run(&self, events: &Receiver<SyncEvent>) {
        for event in events.iter() {
            self.dispatch(&event);
        }
        tracing::debug!("event channel closed");
    }
}
