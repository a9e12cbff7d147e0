//! Tests for the filesystem watch driver against real folders

use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

use msync_core::{ChangeKind, FileWatcher, SyncEvent};
use msync_fs::NormalizedPath;
use msync_test_utils::TestModule;
use pretty_assertions::assert_eq;

const TIMEOUT: Duration = Duration::from_secs(5);

/// Wait for an event of `kind` on `path`, skipping unrelated ones.
fn wait_for(rx: &Receiver<SyncEvent>, kind: ChangeKind, path: &std::path::Path) -> bool {
    let deadline = Instant::now() + TIMEOUT;
    while let Some(remaining) = deadline.checked_duration_since(Instant::now()) {
        match rx.recv_timeout(remaining) {
            Ok(event) if event.kind == kind && event.path == path => return true,
            Ok(_) => continue,
            Err(_) => return false,
        }
    }
    false
}

#[test]
fn test_missing_folders_are_skipped() {
    let module = TestModule::with_standard_layout();
    let folders = vec![
        NormalizedPath::new(module.path("views")),
        NormalizedPath::new(module.path("report")),
    ];
    let (tx, _rx) = mpsc::channel();

    let watcher = FileWatcher::start(&folders, tx).unwrap();

    assert_eq!(watcher.watched(), &folders[..1]);
}

#[test]
fn test_created_file_is_reported() {
    let module = TestModule::with_standard_layout();
    let (tx, rx) = mpsc::channel();
    let _watcher = FileWatcher::start(&[NormalizedPath::new(module.path("views"))], tx).unwrap();

    let file = module.write("views/order_views.xml", "<odoo/>");

    assert!(
        wait_for(&rx, ChangeKind::Created, &file),
        "no create event for {}",
        file.display()
    );
}

#[test]
fn test_removed_file_is_reported() {
    let module = TestModule::with_standard_layout();
    let file = module.write("models/sale_order.py", "");
    let (tx, rx) = mpsc::channel();
    let _watcher = FileWatcher::start(&[NormalizedPath::new(module.path("models"))], tx).unwrap();

    module.remove("models/sale_order.py");

    assert!(
        wait_for(&rx, ChangeKind::Deleted, &file),
        "no delete event for {}",
        file.display()
    );
}

#[test]
fn test_other_files_are_not_reported() {
    let module = TestModule::with_standard_layout();
    let (tx, rx) = mpsc::channel();
    let _watcher = FileWatcher::start(&[NormalizedPath::new(module.path("views"))], tx).unwrap();

    module.write("views/notes.md", "draft");
    let marker = module.write("views/a.xml", "<odoo/>");

    assert!(wait_for(&rx, ChangeKind::Created, &marker));
    assert!(rx.try_iter().all(|event| event.path.extension().is_some_and(|e| e != "md")));
}
