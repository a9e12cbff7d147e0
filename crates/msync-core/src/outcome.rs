//! Results of a synchronization
//!
//! Each handled event produces one outcome per affected document. Only
//! `Inserted`, `Disabled` and `Bootstrapped` change a file.

use serde::Serialize;
use std::path::PathBuf;

/// What a bootstrap did to a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Bootstrap {
    /// The document did not exist and was created
    Created,
    /// The document was empty or lacked a data key and was replaced by the template
    Restamped,
    /// An empty data list was injected before the anchor key
    BlockInjected,
    /// A data list written on one line was split into one entry per line
    ListExpanded,
}

/// Result of one synchronization against one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SyncOutcome {
    /// A new line was inserted at `line` (0-based)
    Inserted {
        document: PathBuf,
        entry: String,
        line: usize,
    },
    /// The entry is already active; the document is unchanged
    AlreadyPresent { document: PathBuf, entry: String },
    /// `count` active lines were commented out
    Disabled {
        document: PathBuf,
        entry: String,
        count: usize,
    },
    /// No active line matched; the document is unchanged
    NothingToDisable { document: PathBuf, entry: String },
    /// The document was created or repaired
    Bootstrapped { document: PathBuf, action: Bootstrap },
    /// The event does not concern any configured document
    Ignored { path: PathBuf, reason: String },
}

impl SyncOutcome {
    /// Whether a file was written.
    pub fn is_change(&self) -> bool {
        matches!(
            self,
            Self::Inserted { .. } | Self::Disabled { .. } | Self::Bootstrapped { .. }
        )
    }
}

fn document_name(document: &std::path::Path) -> std::borrow::Cow<'_, str> {
    document
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_else(|| document.to_string_lossy())
}

impl std::fmt::Display for SyncOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Inserted { document, entry, .. } => {
                write!(f, "Added {entry} to {}", document_name(document))
            }
            Self::AlreadyPresent { document, entry } => {
                write!(f, "{entry} is already present in {}", document_name(document))
            }
            Self::Disabled {
                document,
                entry,
                count,
            } => {
                write!(f, "Commented out {entry} in {}", document_name(document))?;
                if *count > 1 {
                    write!(f, " ({count} lines)")?;
                }
                Ok(())
            }
            Self::NothingToDisable { document, entry } => write!(
                f,
                "No entry for {entry} found in {} to comment out",
                document_name(document)
            ),
            Self::Bootstrapped { document, action } => {
                let verb = match action {
                    Bootstrap::Created => "Created",
                    Bootstrap::Restamped => "Reset to the default template:",
                    Bootstrap::BlockInjected => "Added an empty data list to",
                    Bootstrap::ListExpanded => "Split the data list onto separate lines in",
                };
                write!(f, "{verb} {}", document.display())
            }
            Self::Ignored { path, reason } => write!(f, "Ignored {}: {reason}", path.display()),
        }
    }
}
