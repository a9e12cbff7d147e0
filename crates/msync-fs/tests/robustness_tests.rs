use assert_fs::prelude::*;
use msync_fs::{NormalizedPath, io};
use predicates::prelude::*;

#[test]
fn create_if_missing_writes_once() {
    let temp = assert_fs::TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.child("models/__init__.py").path());

    assert!(io::create_if_missing(&path, "").unwrap());
    assert!(!io::create_if_missing(&path, "from . import a").unwrap());

    temp.child("models/__init__.py").assert("");
}

#[test]
fn create_if_missing_keeps_existing_content() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("__manifest__.py")
        .write_str("{'data': []}\n")
        .unwrap();
    let path = NormalizedPath::new(temp.child("__manifest__.py").path());

    assert!(!io::create_if_missing(&path, "template").unwrap());

    temp.child("__manifest__.py")
        .assert(predicate::str::contains("'data'"));
}

#[test]
fn write_text_leaves_no_temp_files() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("views").create_dir_all().unwrap();
    let path = NormalizedPath::new(temp.child("views/a.xml").path());

    io::write_text(&path, "<odoo/>").unwrap();
    io::write_text(&path, "<odoo></odoo>").unwrap();

    temp.child("views/a.xml").assert("<odoo></odoo>");
    let leftovers: Vec<_> = std::fs::read_dir(temp.child("views").path())
        .unwrap()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_name() != "a.xml")
        .collect();
    assert!(leftovers.is_empty(), "{leftovers:?}");
}

#[test]
fn resolved_matches_canonical_folder() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("wizard").create_dir_all().unwrap();

    let resolved = NormalizedPath::resolved(temp.child("wizard").path());
    let dotted = NormalizedPath::resolved(temp.child("wizard/../wizard").path());

    assert_eq!(resolved, dotted);
    assert!(resolved.is_dir());
    temp.child("wizard").assert(predicate::path::is_dir());
}
