//! [`TestModule`] builder for synchronization scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Conventional sub-folders of a module.
pub const STANDARD_FOLDERS: [&str; 6] = ["views", "wizard", "controllers", "data", "security", "models"];

/// A temporary module folder.
///
/// # Example
///
/// ```rust,no_run
/// use msync_test_utils::TestModule;
///
/// let module = TestModule::with_standard_layout();
/// module.write("views/order_views.xml", "<odoo/>");
/// module.assert_file_exists("views/order_views.xml");
/// ```
pub struct TestModule {
    temp_dir: TempDir,
}

impl Default for TestModule {
    fn default() -> Self {
        Self::new()
    }
}

impl TestModule {
    /// An empty module folder.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// A module folder with every conventional sub-folder created.
    pub fn with_standard_layout() -> Self {
        let module = Self::new();
        for folder in STANDARD_FOLDERS {
            fs::create_dir_all(module.root().join(folder)).unwrap();
        }
        module
    }

    /// Root of the module. Symlinks are resolved so paths compare equal
    /// to what a watcher reports.
    pub fn root(&self) -> PathBuf {
        self.temp_dir
            .path()
            .canonicalize()
            .unwrap_or_else(|_| self.temp_dir.path().to_path_buf())
    }

    /// Absolute path of `relative` inside the module.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    /// Write a file, creating parent folders.
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    /// Read a file inside the module.
    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.path(relative))
            .unwrap_or_else(|e| panic!("TestModule::read: {relative}: {e}"))
    }

    /// Remove a file inside the module.
    pub fn remove(&self, relative: &str) -> PathBuf {
        let path = self.path(relative);
        fs::remove_file(&path).unwrap();
        path
    }

    pub fn assert_file_exists(&self, relative: &str) {
        assert!(
            self.path(relative).is_file(),
            "expected {relative} to exist in {}",
            self.root().display()
        );
    }

    pub fn assert_file_missing(&self, relative: &str) {
        assert!(
            !self.path(relative).exists(),
            "expected {relative} not to exist in {}",
            self.root().display()
        );
    }

    /// Write a `msync.toml` pointing at this module with every standard
    /// folder configured, and return its path.
    pub fn write_config(&self, enabled: bool) -> PathBuf {
        let root = self.root();
        let folder = |name: &str| root.join(name).to_string_lossy().replace('\\', "/");
        let content = format!(
            "module_folder = \"{}\"\nviews_path = \"{}\"\nwizard_path = \"{}\"\ncontrollers_path = \"{}\"\ndata_path = \"{}\"\nsecurity_path = \"{}\"\nmodels_path = \"{}\"\nenabled = {enabled}\n",
            root.to_string_lossy().replace('\\', "/"),
            folder("views"),
            folder("wizard"),
            folder("controllers"),
            folder("data"),
            folder("security"),
            folder("models"),
        );
        self.write("msync.toml", &content)
    }
}

impl AsRef<Path> for TestModule {
    fn as_ref(&self) -> &Path {
        self.temp_dir.path()
    }
}
