//! Line-oriented editing of generated list documents.
//!
//! Two document shapes are handled, both without a real Python grammar:
//!
//! ## Bracketed string list (`__manifest__.py`)
//!
//! ```text
//! {
//!     'data': [
//!         'security/ir.model.access.csv',
//!         # 'views/old_view.xml',
//!         'views/order_views.xml',
//!     ],
//! }
//! ```
//!
//! A block is the marker line containing `'data': [` up to the next line
//! containing `]`. Each line in between carrying a single-quoted string is an
//! entry unless the line is commented out.
//!
//! ## Import list (`__init__.py`)
//!
//! ```text
//! from . import sale_order
//! # from . import retired_model
//! ```
//!
//! The `parser` module locates blocks and extracts entries, `policy` decides
//! where a new line goes, and `writer` renders and disables lines. Nothing in
//! this crate touches the filesystem.

pub mod document;
pub mod error;
pub mod imports;
pub mod parser;
pub mod policy;
pub mod writer;

pub use document::LineDocument;
pub use error::{Error, Result};
pub use imports::{IMPORT_PREFIX, ImportLine, import_statement, scan_imports};
pub use parser::{Block, CLOSE_TOKEN, DATA_MARKER, Entry, locate_block, parse_entries, quoted_value};
pub use policy::{Insertion, MENU_VIEWS, import_insertion, insertion_index};
pub use writer::{COMMENT_TOKEN, disable_line, disable_matching, entry_line, is_comment};
