//! Filesystem primitives for manifest-sync
//!
//! Provides slash-normalized paths, whole-file text I/O with atomic
//! replacement, and configuration documents in TOML, JSON or YAML.

pub mod config;
pub mod error;
pub mod io;
pub mod path;

pub use config::{ConfigFormat, read_config, write_config};
pub use error::{Error, Result};
pub use path::NormalizedPath;
