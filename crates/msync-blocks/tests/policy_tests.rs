//! Insertion-policy invariants over whole documents.

use msync_blocks::{
    CLOSE_TOKEN, DATA_MARKER, Insertion, LineDocument, MENU_VIEWS, entry_line, import_insertion,
    import_statement, insertion_index, locate_block, parse_entries, scan_imports,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

const EMPTY_MANIFEST: &str = "{\n    'data': [\n    ],\n}\n";

fn insert_entry(doc: &mut LineDocument, group: &str, value: &str) -> bool {
    let block = locate_block(doc.lines(), DATA_MARKER, CLOSE_TOKEN).unwrap();
    let entries = parse_entries(doc.lines(), &block);
    match insertion_index(&entries, &block, group, value) {
        Insertion::At(index) => {
            doc.insert(index, entry_line(&block.indent, value));
            true
        }
        Insertion::Duplicate => false,
    }
}

fn insert_import(doc: &mut LineDocument, module: &str) -> bool {
    match import_insertion(doc, module) {
        Insertion::At(index) => {
            doc.insert(index, import_statement(module));
            true
        }
        Insertion::Duplicate => false,
    }
}

fn group_values(doc: &LineDocument, group: &str) -> Vec<String> {
    let block = locate_block(doc.lines(), DATA_MARKER, CLOSE_TOKEN).unwrap();
    parse_entries(doc.lines(), &block)
        .into_iter()
        .map(|entry| entry.value)
        .filter(|value| value.starts_with(&format!("{group}/")))
        .collect()
}

#[test]
fn test_views_inserted_out_of_order_end_sorted() {
    let mut doc = LineDocument::parse(EMPTY_MANIFEST);
    for value in ["views/a_view.xml", "views/c_view.xml", "views/b_view.xml"] {
        assert!(insert_entry(&mut doc, "views", value));
    }

    assert_eq!(
        doc.render(),
        "{\n    'data': [\n        'views/a_view.xml',\n        'views/b_view.xml',\n        'views/c_view.xml',\n    ],\n}\n"
    );
}

#[test]
fn test_groups_stay_contiguous() {
    let mut doc = LineDocument::parse(EMPTY_MANIFEST);
    insert_entry(&mut doc, "security", "security/ir.model.access.csv");
    insert_entry(&mut doc, "views", "views/b.xml");
    insert_entry(&mut doc, "security", "security/groups.xml");
    insert_entry(&mut doc, "views", "views/a.xml");

    let block = locate_block(doc.lines(), DATA_MARKER, CLOSE_TOKEN).unwrap();
    let values: Vec<String> = parse_entries(doc.lines(), &block)
        .into_iter()
        .map(|entry| entry.value)
        .collect();
    assert_eq!(
        values,
        vec![
            "security/groups.xml",
            "security/ir.model.access.csv",
            "views/a.xml",
            "views/b.xml",
        ]
    );
}

#[test]
fn test_disabled_entries_are_left_in_place() {
    let mut doc = LineDocument::parse(
        "{\n    'data': [\n        # 'views/b.xml',\n        'views/c.xml',\n    ],\n}\n",
    );
    insert_entry(&mut doc, "views", "views/a.xml");

    assert_eq!(
        doc.lines()[2..5].to_vec(),
        vec![
            "        # 'views/b.xml',",
            "        'views/a.xml',",
            "        'views/c.xml',",
        ]
    );
}

#[test]
fn test_initializer_from_empty_document() {
    let mut doc = LineDocument::parse("");
    for module in ["zeta", "alpha", "mid"] {
        assert!(insert_import(&mut doc, module));
    }
    assert!(!insert_import(&mut doc, "mid"));

    assert_eq!(
        doc.render(),
        "from . import alpha\nfrom . import mid\nfrom . import zeta"
    );
}

proptest! {
    #[test]
    fn test_group_entries_stay_sorted(names in prop::collection::vec("[a-z_]{1,10}", 1..20)) {
        let mut doc = LineDocument::parse(EMPTY_MANIFEST);
        for name in &names {
            insert_entry(&mut doc, "views", &format!("views/{name}.xml"));
        }

        let values = group_values(&doc, "views");
        let plain: Vec<&String> = values.iter().filter(|v| !v.contains(MENU_VIEWS)).collect();
        prop_assert!(plain.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn test_menu_views_trail_their_group(
        names in prop::collection::vec("[a-z]{1,6}(_menu_views)?", 1..20),
    ) {
        let mut doc = LineDocument::parse(EMPTY_MANIFEST);
        for name in &names {
            insert_entry(&mut doc, "views", &format!("views/{name}.xml"));
            insert_entry(&mut doc, "data", &format!("data/{name}.xml"));
        }

        for group in ["views", "data"] {
            let values = group_values(&doc, group);
            let first_menu = values.iter().position(|v| v.contains(MENU_VIEWS));
            if let Some(first_menu) = first_menu {
                prop_assert!(values[first_menu..].iter().all(|v| v.contains(MENU_VIEWS)));
            }
        }
    }

    #[test]
    fn test_imports_stay_sorted(modules in prop::collection::vec("[a-z_]{1,10}", 1..20)) {
        let mut doc = LineDocument::parse("");
        for module in &modules {
            insert_import(&mut doc, module);
        }

        let names: Vec<String> = scan_imports(doc.lines()).into_iter().map(|i| i.module).collect();
        prop_assert!(names.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
