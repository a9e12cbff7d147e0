//! Synchronization configuration
//!
//! The configuration names the module folder holding `__manifest__.py` and
//! the folders whose files feed the manifest's data list or a package
//! initializer. It is loaded once at startup and handed to the dispatcher.

use crate::{Error, Group, Result};
use msync_fs::{NormalizedPath, read_config, write_config};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "msync.toml";

/// Key a shared settings document nests the configuration under.
pub const CONFIG_SECTION: &str = "msync";

/// A configuration file holds either the bare configuration or a document
/// with the configuration under [`CONFIG_SECTION`]. Editor workspace state
/// uses `odooManifestInitConfig` for the same section.
#[derive(Deserialize)]
#[serde(untagged)]
enum ConfigDocument {
    Nested {
        #[serde(rename = "msync", alias = "odooManifestInitConfig")]
        section: SyncConfig,
    },
    Bare(SyncConfig),
}

fn default_enabled() -> bool {
    true
}

/// Folder paths and the arming switch.
///
/// Unset folders are simply not watched. Field aliases accept the camelCase
/// keys used by editor-side settings files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Folder containing `__manifest__.py`
    #[serde(alias = "moduleFolder")]
    pub module_folder: PathBuf,

    #[serde(default, alias = "viewsPath", deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub views_path: Option<PathBuf>,

    #[serde(default, alias = "wizardPath", deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub wizard_path: Option<PathBuf>,

    #[serde(default, alias = "controllersPath", deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub controllers_path: Option<PathBuf>,

    #[serde(default, alias = "dataPath", deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub data_path: Option<PathBuf>,

    #[serde(default, alias = "securityPath", deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub security_path: Option<PathBuf>,

    #[serde(default, alias = "modelsPath", deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub models_path: Option<PathBuf>,

    /// Whether synchronization is armed at all
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

/// Treat `""` the same as an absent folder.
fn empty_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<PathBuf>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()).map(PathBuf::from))
}

impl SyncConfig {
    /// A configuration for `module_folder` with no watched folders.
    pub fn new(module_folder: impl Into<PathBuf>) -> Self {
        Self {
            module_folder: module_folder.into(),
            views_path: None,
            wizard_path: None,
            controllers_path: None,
            data_path: None,
            security_path: None,
            models_path: None,
            enabled: default_enabled(),
        }
    }

    /// A configuration using the conventional sub-folder names of
    /// `module_folder` that exist on disk (`views/`, `wizard/`, ...).
    pub fn discover(module_folder: impl Into<PathBuf>) -> Self {
        let mut config = Self::new(module_folder);
        let existing = |name: &str| {
            let candidate = config.module_folder.join(name);
            candidate.is_dir().then_some(candidate)
        };
        let views_path = existing("views");
        let wizard_path = existing("wizard");
        let controllers_path = existing("controllers");
        let data_path = existing("data");
        let security_path = existing("security");
        let models_path = existing("models");

        config.views_path = views_path;
        config.wizard_path = wizard_path;
        config.controllers_path = controllers_path;
        config.data_path = data_path;
        config.security_path = security_path;
        config.models_path = models_path;
        config
    }

    /// Load a configuration file (TOML, JSON or YAML by extension).
    ///
    /// The configuration may sit at the top level or under the `msync`
    /// section of a larger document. Relative folder paths are resolved
    /// against the file's directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let document: ConfigDocument = read_config(&NormalizedPath::new(path))?;
        let mut config = match document {
            ConfigDocument::Nested { section } => section,
            ConfigDocument::Bare(config) => config,
        };

        let base = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        config.resolve_relative(&base);
        config.validate()?;

        tracing::debug!(path = %path.display(), module = %config.module_folder.display(), "loaded config");
        Ok(config)
    }

    /// Save the configuration atomically, as a bare document.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        write_config(&NormalizedPath::new(path.as_ref()), self)?;
        Ok(())
    }

    /// Make every relative path absolute against `base`.
    pub fn resolve_relative(&mut self, base: &Path) {
        let absolutize = |path: &mut PathBuf| {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        };
        absolutize(&mut self.module_folder);
        for folder in [
            &mut self.views_path,
            &mut self.wizard_path,
            &mut self.controllers_path,
            &mut self.data_path,
            &mut self.security_path,
            &mut self.models_path,
        ]
        .into_iter()
        .flatten()
        {
            absolutize(folder);
        }
    }

    /// Reject configurations without a module folder.
    pub fn validate(&self) -> Result<()> {
        if self.module_folder.as_os_str().is_empty() {
            return Err(Error::InvalidConfig {
                message: "module_folder must be set".into(),
            });
        }
        Ok(())
    }

    /// The folder feeding `group`, if configured.
    pub fn group_folder(&self, group: Group) -> Option<&Path> {
        match group {
            Group::Views => self.views_path.as_deref(),
            Group::Wizard => self.wizard_path.as_deref(),
            Group::Controllers => self.controllers_path.as_deref(),
            Group::Data => self.data_path.as_deref(),
            Group::Security => self.security_path.as_deref(),
        }
    }

    /// Configured folders whose `*.xml` files feed the manifest, by group.
    pub fn group_folders(&self) -> Vec<(Group, NormalizedPath)> {
        Group::ALL
            .into_iter()
            .filter_map(|group| {
                self.group_folder(group)
                    .map(|folder| (group, NormalizedPath::resolved(folder)))
            })
            .collect()
    }

    /// Configured folders whose `*.py` files feed an `__init__.py`.
    pub fn initializer_folders(&self) -> Vec<NormalizedPath> {
        [&self.models_path, &self.wizard_path, &self.controllers_path]
            .into_iter()
            .flatten()
            .map(NormalizedPath::resolved)
            .collect()
    }

    /// Every distinct configured folder, in a stable order.
    pub fn watched_folders(&self) -> Vec<NormalizedPath> {
        let mut folders: Vec<NormalizedPath> = self
            .group_folders()
            .into_iter()
            .map(|(_, folder)| folder)
            .chain(self.initializer_folders())
            .collect();
        folders.sort();
        folders.dedup();
        folders
    }
}
