//! Shared test utilities for the manifest-sync workspace.
//!
//! Dev-dependency only. Provides [`TestModule`], a temporary module folder
//! with helpers for laying out files and asserting on them.

pub mod module;

pub use module::{STANDARD_FOLDERS, TestModule};
