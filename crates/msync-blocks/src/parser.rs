//! Block location and entry extraction for bracketed string lists.

use crate::error::{Error, Result};
use crate::writer::is_comment;
use regex::Regex;
use std::sync::LazyLock;

/// Marker of the asset list inside `__manifest__.py`.
pub const DATA_MARKER: &str = "'data': [";

/// Token closing a bracketed list.
pub const CLOSE_TOKEN: &str = "]";

/// One indentation unit added to the marker's indentation for child lines.
const INDENT_UNIT: &str = "    ";

/// First single-quoted, non-empty string on a line.
static QUOTED_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"'([^']+)'").expect("Invalid quoted string regex"));

/// A located list block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// 0-based index of the marker line.
    pub start: usize,
    /// 0-based index of the closing line. Always greater than `start`.
    pub end: usize,
    /// Indentation for lines inside the block.
    pub indent: String,
}

/// An active entry of a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// The line exactly as it appears in the document.
    pub raw_line: String,
    /// The quoted payload, e.g. `views/order_views.xml`.
    pub value: String,
    /// 0-based index of the line within the document.
    pub line_index: usize,
}

/// Find the first block opened by `marker` and closed by `close`.
///
/// The closing token is only searched for from the line after the marker.
///
/// # Errors
///
/// Returns [`Error::BlockNotFound`] when no line contains the marker and
/// [`Error::BlockNotClosed`] when no later line contains the closer.
///
/// # Example
///
/// ```
/// use msync_blocks::parser::{locate_block, DATA_MARKER, CLOSE_TOKEN};
///
/// let lines: Vec<String> = ["{", "    'data': [", "    ],", "}"]
///     .into_iter()
///     .map(String::from)
///     .collect();
/// let block = locate_block(&lines, DATA_MARKER, CLOSE_TOKEN).unwrap();
/// assert_eq!((block.start, block.end), (1, 2));
/// assert_eq!(block.indent, "        ");
/// ```
pub fn locate_block(lines: &[String], marker: &str, close: &str) -> Result<Block> {
    let start = lines
        .iter()
        .position(|line| line.contains(marker))
        .ok_or_else(|| Error::BlockNotFound {
            marker: marker.to_string(),
        })?;

    let end = lines[start + 1..]
        .iter()
        .position(|line| line.contains(close))
        .map(|offset| start + 1 + offset)
        .ok_or_else(|| Error::BlockNotClosed {
            marker: marker.to_string(),
            close: close.to_string(),
            start: start + 1,
        })?;

    let marker_line = &lines[start];
    let leading = &marker_line[..marker_line.len() - marker_line.trim_start().len()];

    Ok(Block {
        start,
        end,
        indent: format!("{leading}{INDENT_UNIT}"),
    })
}

/// Extract the first single-quoted string of a line.
pub fn quoted_value(line: &str) -> Option<&str> {
    QUOTED_REGEX
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Collect the active entries strictly between the block's boundaries.
///
/// Commented lines and lines without a quoted string are skipped. Entries
/// come back in line order.
pub fn parse_entries(lines: &[String], block: &Block) -> Vec<Entry> {
    lines
        .iter()
        .enumerate()
        .take(block.end)
        .skip(block.start + 1)
        .filter(|(_, line)| !is_comment(line))
        .filter_map(|(line_index, line)| {
            quoted_value(line).map(|value| Entry {
                raw_line: line.clone(),
                value: value.to_string(),
                line_index,
            })
        })
        .collect()
}
