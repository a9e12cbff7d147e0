//! Filesystem watch driver
//!
//! Subscribes to the configured folders and forwards coalesced
//! create/delete events into the dispatcher's channel.

use notify::event::{ModifyKind, RenameMode};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::{Duration, Instant};

use msync_fs::NormalizedPath;

use crate::Result;
use crate::dispatch::{ChangeKind, SyncEvent};

/// Quiet period after the last notification before pending events flush.
const DEBOUNCE: Duration = Duration::from_millis(100);

/// A running watch subscription. Dropping it stops the background thread
/// and closes the event channel.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
    _thread: std::thread::JoinHandle<()>,
    watched: Vec<NormalizedPath>,
}

impl FileWatcher {
    /// Watch `folders` (non-recursively) and send events to `events`.
    ///
    /// Folders that do not exist are skipped with a warning.
    pub fn start(folders: &[NormalizedPath], events: Sender<SyncEvent>) -> Result<Self> {
        let (notify_tx, notify_rx) = mpsc::channel::<notify::Result<Event>>();

        let mut watcher = RecommendedWatcher::new(
            move |res| {
                let _ = notify_tx.send(res);
            },
            Config::default(),
        )?;

        let mut watched = Vec::new();
        for folder in folders {
            if !folder.is_dir() {
                tracing::warn!(folder = %folder, "watched folder does not exist; skipping");
                continue;
            }
            watcher.watch(&folder.to_native(), RecursiveMode::NonRecursive)?;
            tracing::debug!(folder = %folder, "watching");
            watched.push(folder.clone());
        }

        let thread = std::thread::spawn(move || forward(notify_rx, events));

        Ok(Self {
            _watcher: watcher,
            _thread: thread,
            watched,
        })
    }

    /// Folders actually subscribed to.
    pub fn watched(&self) -> &[NormalizedPath] {
        &self.watched
    }
}

/// Forward translated notifications to `events` once `DEBOUNCE` passes
/// without a new one. Returns when either channel closes; events still
/// pending when the notification side closes are flushed first.
pub(crate) fn forward(notify_rx: Receiver<notify::Result<Event>>, events: Sender<SyncEvent>) {
    let mut pending: Vec<SyncEvent> = Vec::new();
    let mut last_event = Instant::now();

    loop {
        match notify_rx.recv_timeout(DEBOUNCE) {
            Ok(Ok(event)) => {
                pending.extend(translate(&event));
                last_event = Instant::now();
            }
            Ok(Err(e)) => {
                tracing::warn!("File watcher error: {e}");
            }
            Err(RecvTimeoutError::Timeout) => {
                if !pending.is_empty()
                    && last_event.elapsed() >= DEBOUNCE
                    && !flush(&mut pending, &events)
                {
                    return;
                }
            }
            Err(RecvTimeoutError::Disconnected) => {
                flush(&mut pending, &events);
                return;
            }
        }
    }
}

/// Send the coalesced pending events. Returns `false` once the receiver is gone.
fn flush(pending: &mut Vec<SyncEvent>, events: &Sender<SyncEvent>) -> bool {
    coalesce(std::mem::take(pending))
        .into_iter()
        .all(|event| events.send(event).is_ok())
}

/// Map a notification to create/delete events for files we care about.
pub fn translate(event: &Event) -> Vec<SyncEvent> {
    let kinds: Vec<(ChangeKind, &PathBuf)> = match event.kind {
        EventKind::Create(_) => event.paths.iter().map(|p| (ChangeKind::Created, p)).collect(),
        EventKind::Remove(_) => event.paths.iter().map(|p| (ChangeKind::Deleted, p)).collect(),
        EventKind::Modify(ModifyKind::Name(RenameMode::From)) => {
            event.paths.iter().map(|p| (ChangeKind::Deleted, p)).collect()
        }
        EventKind::Modify(ModifyKind::Name(RenameMode::To)) => {
            event.paths.iter().map(|p| (ChangeKind::Created, p)).collect()
        }
        EventKind::Modify(ModifyKind::Name(RenameMode::Both)) => match event.paths.as_slice() {
            [from, to] => vec![(ChangeKind::Deleted, from), (ChangeKind::Created, to)],
            _ => Vec::new(),
        },
        _ => Vec::new(),
    };

    kinds
        .into_iter()
        .filter(|(_, path)| is_source_file(path))
        .map(|(kind, path)| SyncEvent {
            kind,
            path: path.clone(),
        })
        .collect()
}

/// Keep the last event per path, ordered by that last occurrence.
pub fn coalesce(events: Vec<SyncEvent>) -> Vec<SyncEvent> {
    let mut last_seen: HashMap<PathBuf, usize> = HashMap::new();
    for (index, event) in events.iter().enumerate() {
        last_seen.insert(event.path.clone(), index);
    }
    events
        .into_iter()
        .enumerate()
        .filter(|(index, event)| last_seen.get(&event.path) == Some(index))
        .map(|(_, event)| event)
        .collect()
}

fn is_source_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("xml") | Some("py")
    )
}
