//! Line rendering and in-place disabling.

use crate::document::LineDocument;

/// Comment token of the generated documents.
pub const COMMENT_TOKEN: &str = "#";

/// Whether the line is commented out.
pub fn is_comment(line: &str) -> bool {
    line.trim_start().starts_with(COMMENT_TOKEN)
}

/// Render a list entry: `<indent>'<value>',`.
pub fn entry_line(indent: &str, value: &str) -> String {
    format!("{indent}'{value}',")
}

/// Comment a line out, keeping its indentation.
///
/// ```
/// use msync_blocks::writer::disable_line;
///
/// assert_eq!(disable_line("        'views/a.xml',"), "        # 'views/a.xml',");
/// ```
pub fn disable_line(line: &str) -> String {
    let body = line.trim_start();
    let indent = &line[..line.len() - body.len()];
    format!("{indent}{COMMENT_TOKEN} {body}")
}

/// Disable every active line of the document accepted by `matches`.
///
/// The whole document is scanned, not only a block. Returns how many lines
/// changed; zero means nothing matched.
pub fn disable_matching<F>(doc: &mut LineDocument, matches: F) -> usize
where
    F: Fn(&str) -> bool,
{
    let targets: Vec<usize> = doc
        .lines()
        .iter()
        .enumerate()
        .filter(|(_, line)| !is_comment(line) && matches(line))
        .map(|(index, _)| index)
        .collect();

    for &index in &targets {
        let disabled = disable_line(&doc.lines()[index]);
        doc.replace(index, disabled);
    }

    if !targets.is_empty() {
        tracing::debug!(lines = ?targets, "disabled lines");
    }
    targets.len()
}
