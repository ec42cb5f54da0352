//! Configuration for `sitemap-touch.toml`.
//!
//! # Layout
//!
//! ```toml
//! [sitemap]
//! path = "/var/www/example.com/sitemap/sitemap.xml"
//! ```
//!
//! | Key            | Purpose                                   | Default       |
//! |----------------|-------------------------------------------|---------------|
//! | `sitemap.path` | Sitemap file updated in place             | `sitemap.xml` |
//!
//! A relative `path` is resolved against the directory of the config file,
//! so the tool behaves the same no matter where the scheduler starts it.

mod error;
mod util;

pub use error::ConfigError;

use crate::log;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use util::{find_config_file, resolve_against};

/// Default config file name, searched upward from the working directory.
pub const DEFAULT_CONFIG_NAME: &str = "sitemap-touch.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root structure of the config file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub sitemap: UpdaterConfig,
}

/// `[sitemap]` section: what the updater works on.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UpdaterConfig {
    /// Sitemap file location.
    pub path: PathBuf,
}

impl Default for UpdaterConfig {
    fn default() -> Self {
        Self::new("sitemap.xml")
    }
}

impl UpdaterConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Locate `config_name` upward from the current directory and load it.
    pub fn load(config_name: &Path) -> Result<Self, ConfigError> {
        let cwd = std::env::current_dir().map_err(|err| ConfigError::Io(PathBuf::from("."), err))?;
        let path = find_config_file(config_name, &cwd)
            .ok_or_else(|| ConfigError::NotFound(config_name.to_path_buf()))?;
        Self::from_path(&path)
    }

    /// Load from an explicit config file path.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        let root = path.parent().unwrap_or_else(|| Path::new(""));
        let config = config.sitemap.resolved(root);
        config.validate()?;
        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(FileConfig, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring: {}", display_path, fields.join(", "));
    }

    fn resolved(mut self, root: &Path) -> Self {
        self.path = resolve_against(root, &self.path);
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.path.as_os_str().is_empty() || self.path.is_dir() {
            return Err(ConfigError::Validation(format!(
                "`sitemap.path` must point to a file, got `{}`",
                self.path.display()
            )));
        }
        Ok(())
    }
}

// ============================================================================
// tests
// ============================================================================
