//! Configuration documents
//!
//! A configuration file is one serde document whose format follows the file
//! extension. Reading and writing go through [`io`] so a saved file is
//! replaced atomically.

use crate::{Error, NormalizedPath, Result, io};
use serde::{Serialize, de::DeserializeOwned};

/// Serialization format of a configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
    Yaml,
}

impl ConfigFormat {
    /// Pick the format from the extension of `path` (`.toml`, `.json`,
    /// `.yaml` or `.yml`, case-insensitive).
    pub fn from_path(path: &NormalizedPath) -> Result<Self> {
        let extension = path.extension().unwrap_or_default();
        match extension.to_ascii_lowercase().as_str() {
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(Error::UnsupportedFormat {
                extension: extension.to_string(),
            }),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Toml => "TOML",
            Self::Json => "JSON",
            Self::Yaml => "YAML",
        }
    }

    /// Deserialize `content`. `path` only labels the error.
    pub fn parse<T: DeserializeOwned>(self, path: &NormalizedPath, content: &str) -> Result<T> {
        let parsed = match self {
            Self::Toml => toml::from_str(content).map_err(|e| e.to_string()),
            Self::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            Self::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        };
        parsed.map_err(|message| Error::ConfigParse {
            path: path.to_native(),
            format: self.name(),
            message,
        })
    }

    /// Serialize `value`, ending with a newline.
    pub fn render<T: Serialize>(self, path: &NormalizedPath, value: &T) -> Result<String> {
        let rendered = match self {
            Self::Toml => toml::to_string_pretty(value).map_err(|e| e.to_string()),
            Self::Json => serde_json::to_string_pretty(value).map_err(|e| e.to_string()),
            Self::Yaml => serde_yaml::to_string(value).map_err(|e| e.to_string()),
        };
        let mut content = rendered.map_err(|message| Error::ConfigSerialize {
            path: path.to_native(),
            format: self.name(),
            message,
        })?;
        if !content.ends_with('\n') {
            content.push('\n');
        }
        Ok(content)
    }
}

/// Read and deserialize the configuration file at `path`.
pub fn read_config<T: DeserializeOwned>(path: &NormalizedPath) -> Result<T> {
    let format = ConfigFormat::from_path(path)?;
    let content = io::read_text(path)?;
    format.parse(path, &content)
}

/// Serialize `value` and replace the file at `path` with it.
pub fn write_config<T: Serialize>(path: &NormalizedPath, value: &T) -> Result<()> {
    let format = ConfigFormat::from_path(path)?;
    let content = format.render(path, value)?;
    tracing::debug!(path = %path, format = format.name(), "writing config");
    io::write_text(path, &content)
}
