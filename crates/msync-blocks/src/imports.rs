//! Import statements of package initializer files.

use crate::writer::is_comment;

/// Prefix shared by every relative import line.
pub const IMPORT_PREFIX: &str = "from . import ";

/// An active `from . import <module>` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportLine {
    pub module: String,
    pub line_index: usize,
}

/// The statement importing `module`.
pub fn import_statement(module: &str) -> String {
    format!("{IMPORT_PREFIX}{module}")
}

/// Collect active import lines in document order.
pub fn scan_imports(lines: &[String]) -> Vec<ImportLine> {
    lines
        .iter()
        .enumerate()
        .filter(|(_, line)| !is_comment(line))
        .filter_map(|(line_index, line)| {
            line.trim().strip_prefix(IMPORT_PREFIX).map(|module| ImportLine {
                module: module.trim().to_string(),
                line_index,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_imports_ignores_comments_and_other_code() {
        let lines: Vec<String> = [
            "# -*- coding: utf-8 -*-",
            "from . import sale_order",
            "# from . import old",
            "",
            "import logging",
            "    from . import  res_partner  ",
        ]
        .into_iter()
        .map(String::from)
        .collect();

        let imports = scan_imports(&lines);
        assert_eq!(
            imports,
            vec![
                ImportLine {
                    module: "sale_order".into(),
                    line_index: 1
                },
                ImportLine {
                    module: "res_partner".into(),
                    line_index: 5
                },
            ]
        );
    }
}
