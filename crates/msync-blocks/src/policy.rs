//! Where a new line goes.
//!
//! Asset entries of one group stay sorted, with the group's menu-views
//! declarations as its trailing subsection. Import lines form one flat
//! sorted list.

use crate::document::LineDocument;
use crate::imports::{import_statement, scan_imports};
use crate::parser::{Block, Entry};

/// Substring marking a menu-views declaration.
pub const MENU_VIEWS: &str = "menu_views";

/// Result of an insertion policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    /// Insert so the new line ends up at this 0-based index.
    At(usize),
    /// The value is already present; nothing to insert.
    Duplicate,
}

/// Compute where `value` goes among the entries of `group`.
///
/// Plain entries of the group (prefix `<group>/`, no `menu_views`) are
/// compared byte-wise; the new line goes before the first one sorting after
/// it. Failing that it goes before the group's first menu-views entry, or
/// after its last plain entry, or at the block end when the group has no
/// entries yet. A menu-views value itself is appended after the last entry
/// of the group.
pub fn insertion_index(entries: &[Entry], block: &Block, group: &str, value: &str) -> Insertion {
    if entries.iter().any(|entry| entry.value == value) {
        return Insertion::Duplicate;
    }

    let prefix = format!("{group}/");
    let (mut plain, menu_views): (Vec<&Entry>, Vec<&Entry>) = entries
        .iter()
        .filter(|entry| entry.value.starts_with(&prefix))
        .partition(|entry| !entry.value.contains(MENU_VIEWS));

    if value.contains(MENU_VIEWS) {
        let last = plain
            .iter()
            .chain(menu_views.iter())
            .map(|entry| entry.line_index)
            .max();
        return Insertion::At(last.map_or(block.end, |index| index + 1));
    }

    plain.sort_by(|a, b| a.value.cmp(&b.value));

    if let Some(next) = plain.iter().find(|entry| entry.value.as_str() > value) {
        return Insertion::At(next.line_index);
    }

    let index = match (plain.last(), menu_views.first()) {
        (_, Some(first_menu)) => first_menu.line_index,
        (Some(last_plain), None) => last_plain.line_index + 1,
        (None, None) => block.end,
    };
    Insertion::At(index)
}

/// Compute where the import of `module` goes.
///
/// Existing imports are treated as a sorted list of names; the new import
/// lands right after its alphabetical predecessor, or before the first
/// import when it sorts first, or at the end of a document without imports.
pub fn import_insertion(doc: &LineDocument, module: &str) -> Insertion {
    let statement = import_statement(module);
    if doc.lines().iter().any(|line| line.trim() == statement) {
        return Insertion::Duplicate;
    }

    let imports = scan_imports(doc.lines());
    let Some(first) = imports.first() else {
        return Insertion::At(doc.len());
    };

    let mut names: Vec<&str> = imports.iter().map(|import| import.module.as_str()).collect();
    names.sort_unstable();
    let position = names.partition_point(|name| *name < module);

    if position == 0 {
        return Insertion::At(first.line_index);
    }

    let predecessor = names[position - 1];
    let index = imports
        .iter()
        .rev()
        .find(|import| import.module == predecessor)
        .map_or(doc.len(), |import| import.line_index + 1);
    Insertion::At(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{CLOSE_TOKEN, DATA_MARKER, locate_block, parse_entries};
    use rstest::rstest;

    fn manifest(entries: &[&str]) -> LineDocument {
        let mut src = String::from("{\n    'data': [\n");
        for entry in entries {
            src.push_str(&format!("        '{entry}',\n"));
        }
        src.push_str("    ],\n}\n");
        LineDocument::parse(&src)
    }

    fn place(entries: &[&str], group: &str, value: &str) -> Insertion {
        let doc = manifest(entries);
        let block = locate_block(doc.lines(), DATA_MARKER, CLOSE_TOKEN).unwrap();
        let parsed = parse_entries(doc.lines(), &block);
        insertion_index(&parsed, &block, group, value)
    }

    // Entries start at line 2; the closer of an n-entry block is line n + 2.
    #[rstest]
    #[case::empty_block(&[], "views", "views/a.xml", 2)]
    #[case::before_greater(&["views/a.xml", "views/c.xml"], "views", "views/b.xml", 3)]
    #[case::first(&["views/b.xml"], "views", "views/a.xml", 2)]
    #[case::after_last(&["views/a.xml"], "views", "views/b.xml", 3)]
    #[case::before_menu_views(&["views/a.xml", "views/menu_views.xml"], "views", "views/z.xml", 3)]
    #[case::only_menu_views(&["views/menu_views.xml"], "views", "views/a.xml", 2)]
    #[case::other_group_only(&["security/ir.model.access.csv"], "views", "views/a.xml", 3)]
    #[case::after_group_not_block_end(&["data/a.xml", "views/a.xml"], "data", "data/b.xml", 3)]
    #[case::menu_views_value_trails(&["views/a.xml", "views/z.xml", "data/x.xml"], "views", "views/menu_views.xml", 4)]
    fn test_insertion_index(
        #[case] entries: &[&str],
        #[case] group: &str,
        #[case] value: &str,
        #[case] expected: usize,
    ) {
        assert_eq!(place(entries, group, value), Insertion::At(expected));
    }

    #[test]
    fn test_duplicate() {
        assert_eq!(
            place(&["views/a.xml"], "views", "views/a.xml"),
            Insertion::Duplicate
        );
    }

    #[test]
    fn test_prefix_requires_separator() {
        // "views_extra/" must not count as part of "views"
        assert_eq!(
            place(&["views_extra/z.xml"], "views", "views/a.xml"),
            Insertion::At(3)
        );
    }

    #[rstest]
    #[case::empty("", "a", Insertion::At(0))]
    #[case::sorts_first("from . import b\nfrom . import c\n", "a", Insertion::At(0))]
    #[case::middle("from . import a\nfrom . import c\n", "b", Insertion::At(1))]
    #[case::last("from . import a\nfrom . import c\n", "d", Insertion::At(2))]
    #[case::after_header("# header\n\nfrom . import b\n", "a", Insertion::At(2))]
    #[case::no_imports("# header\n", "a", Insertion::At(1))]
    #[case::duplicate("from . import a\n", "a", Insertion::Duplicate)]
    #[case::commented_is_not_duplicate("# from . import a\n", "a", Insertion::At(1))]
    fn test_import_insertion(#[case] src: &str, #[case] module: &str, #[case] expected: Insertion) {
        let doc = LineDocument::parse(src);
        assert_eq!(import_insertion(&doc, module), expected);
    }
}
