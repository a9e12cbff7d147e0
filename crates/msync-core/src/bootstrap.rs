//! Manifest creation and template migration
//!
//! Older or hand-written manifests may lack the data list. Before any
//! insertion can work the list block has to exist, so documents are
//! brought to a usable shape here.

use crate::outcome::{Bootstrap, SyncOutcome};
use crate::{Error, Result, SyncConfig};
use msync_fs::{NormalizedPath, io};
use regex::Regex;
use std::sync::LazyLock;

/// File name of the asset-list document inside the module folder.
pub const MANIFEST_FILE_NAME: &str = "__manifest__.py";

/// File name of a package initializer.
pub const INIT_FILE_NAME: &str = "__init__.py";

/// Manifest written for new modules and as the destructive fallback.
pub const DEFAULT_MANIFEST_TEMPLATE: &str = "{
    'name': '',
    'version': '1.0',
    'depends': [],
    'data': [
    ],
    'installable': True,
    'application': True,
    'license': 'LGPL-3',
}
";

/// Key that must appear for a manifest to be migrated instead of replaced.
const DATA_KEY: &str = "'data':";

/// Key the empty data list is injected in front of.
const ANCHOR_KEY: &str = "'installable'";

const EMPTY_DATA_BLOCK: &str = "    'data': [\n    ],\n";

/// Indent of a data list that does not start its own line.
const DEFAULT_INDENT: &str = "    ";

static DATA_BLOCK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"'data'\s*:\s*\[[\s\S]*?\]").expect("Invalid data block regex"));

/// A data list opened and closed on one line, e.g. `'data': [],`.
static SINGLE_LINE_DATA_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"'data'\s*:\s*\[([^\]\n]*)\]").expect("Invalid single-line data regex"));

static QUOTED_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"'([^']+)'").expect("Invalid quoted string regex"));

/// How an existing manifest has to change before insertions can work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Migration {
    /// The data list is present
    Keep,
    /// Replace the whole document with the default template
    Restamp,
    /// Replace the document with this content, which gained an empty data list
    Inject(String),
    /// Replace the document with this content, where a one-line data list
    /// was split into one entry per line
    Expand(String),
}

/// Decide how `content` must be migrated.
///
/// Empty content or content without a data key is restamped. A data key
/// without its bracketed list gets an empty list injected right before the
/// `'installable'` key; without that anchor the document is restamped as
/// well. A list opened and closed on one line is split so its closing
/// bracket gets a line of its own.
pub fn migrate_manifest(content: &str) -> Migration {
    if content.trim().is_empty() || !content.contains(DATA_KEY) {
        return Migration::Restamp;
    }
    if DATA_BLOCK_REGEX.is_match(content) {
        return match expand_single_line(content) {
            Some(expanded) => Migration::Expand(expanded),
            None => Migration::Keep,
        };
    }
    match content.find(ANCHOR_KEY) {
        Some(anchor) => Migration::Inject(inject_before(content, anchor)),
        None => Migration::Restamp,
    }
}

/// Start of the line holding `offset`, and whether only whitespace precedes
/// `offset` on that line.
fn line_start(content: &str, offset: usize) -> (usize, bool) {
    let start = content[..offset].rfind('\n').map_or(0, |i| i + 1);
    (start, content[start..offset].trim().is_empty())
}

fn inject_before(content: &str, anchor: usize) -> String {
    let (start, own_line) = line_start(content, anchor);
    let mut migrated = String::with_capacity(content.len() + EMPTY_DATA_BLOCK.len() + 8);
    if own_line {
        migrated.push_str(&content[..start]);
        migrated.push_str(EMPTY_DATA_BLOCK);
        migrated.push_str(&content[start..]);
    } else {
        // The anchor shares its line with earlier keys: break the line so
        // the list still sits inside the dict literal
        migrated.push_str(content[..anchor].trim_end());
        migrated.push('\n');
        migrated.push_str(EMPTY_DATA_BLOCK);
        migrated.push_str(DEFAULT_INDENT);
        migrated.push_str(&content[anchor..]);
    }
    migrated
}

fn expand_single_line(content: &str) -> Option<String> {
    let found = SINGLE_LINE_DATA_REGEX.captures(content)?;
    let whole = found.get(0)?;
    let items = found.get(1).map_or("", |m| m.as_str());

    let (start, own_line) = line_start(content, whole.start());
    let indent = if own_line {
        &content[start..whole.start()]
    } else {
        DEFAULT_INDENT
    };

    let mut migrated = String::with_capacity(content.len() + 64);
    if own_line {
        migrated.push_str(&content[..whole.start()]);
    } else {
        migrated.push_str(content[..whole.start()].trim_end());
        migrated.push('\n');
        migrated.push_str(indent);
    }
    migrated.push_str("'data': [\n");
    for item in QUOTED_REGEX.captures_iter(items) {
        migrated.push_str(&format!("{indent}{DEFAULT_INDENT}'{}',\n", &item[1]));
    }
    migrated.push_str(indent);
    migrated.push(']');
    migrated.push_str(&content[whole.end()..]);
    Some(migrated)
}

/// Create the manifest if missing, otherwise migrate it in place.
///
/// Returns `None` when the document was already usable.
pub fn ensure_manifest(path: &NormalizedPath) -> Result<Option<Bootstrap>> {
    if !path.exists() {
        write(path, DEFAULT_MANIFEST_TEMPLATE)?;
        tracing::info!(path = %path, "created manifest from template");
        return Ok(Some(Bootstrap::Created));
    }

    let content = io::read_text(path).map_err(|source| Error::ReadFailure {
        path: path.to_native(),
        source,
    })?;

    match migrate_manifest(&content) {
        Migration::Keep => Ok(None),
        Migration::Restamp => {
            tracing::warn!(path = %path, "manifest has no data list; replacing with template");
            write(path, DEFAULT_MANIFEST_TEMPLATE)?;
            Ok(Some(Bootstrap::Restamped))
        }
        Migration::Inject(migrated) => {
            tracing::info!(path = %path, "injected empty data list into manifest");
            write(path, &migrated)?;
            Ok(Some(Bootstrap::BlockInjected))
        }
        Migration::Expand(migrated) => {
            tracing::info!(path = %path, "split one-line data list");
            write(path, &migrated)?;
            Ok(Some(Bootstrap::ListExpanded))
        }
    }
}

/// Create an empty `__init__.py` in `folder` if missing.
pub fn ensure_initializer(folder: &NormalizedPath) -> Result<bool> {
    let path = folder.join(INIT_FILE_NAME);
    let created = io::create_if_missing(&path, "").map_err(|source| Error::WriteFailure {
        path: path.to_native(),
        source,
    })?;
    if created {
        tracing::info!(path = %path, "created initializer");
    }
    Ok(created)
}

/// Bring a whole module to a synchronizable state.
///
/// The manifest is created or migrated and every initializer folder gets an
/// `__init__.py`. Returns what was changed; an empty list means the module
/// was already in shape.
pub fn ensure_module(config: &SyncConfig) -> Result<Vec<SyncOutcome>> {
    let module = NormalizedPath::resolved(&config.module_folder);
    let manifest = module.join(MANIFEST_FILE_NAME);
    let mut outcomes = Vec::new();

    if let Some(action) = ensure_manifest(&manifest)? {
        outcomes.push(SyncOutcome::Bootstrapped {
            document: manifest.to_native(),
            action,
        });
    }

    for folder in config.initializer_folders() {
        if ensure_initializer(&folder)? {
            outcomes.push(SyncOutcome::Bootstrapped {
                document: folder.join(INIT_FILE_NAME).to_native(),
                action: Bootstrap::Created,
            });
        }
    }

    Ok(outcomes)
}

pub(crate) fn write(path: &NormalizedPath, content: &str) -> Result<()> {
    io::write_text(path, content).map_err(|source| Error::WriteFailure {
        path: path.to_native(),
        source,
    })
}
