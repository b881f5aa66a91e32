//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/bookcat/bookcat.toml`
//! 3. Local config: `<dir>/.bookcat.toml`
//! 4. Environment variables: `BOOKCAT_*` prefix
//!
//! Command line flags are applied on top by the CLI layer.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::TreeShape;
use crate::util::path::expand_env_vars;

/// Unified configuration for bookcat.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Catalog file to search (default: ./catalog.toml)
    pub catalog: PathBuf,
    /// Shape of the tree built from the catalog
    pub shape: TreeShape,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            catalog: PathBuf::from("catalog.toml"),
            shape: TreeShape::default(),
        }
    }
}

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub catalog: Option<PathBuf>,
    pub shape: Option<TreeShape>,
}

/// Get the XDG config directory for bookcat.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "bookcat").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("bookcat.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".bookcat.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Expand shell variables and tilde in the catalog path.
    fn expand_paths(&mut self) {
        let expanded = expand_env_vars(self.catalog.to_string_lossy().as_ref());
        self.catalog = PathBuf::from(expanded);
    }

    /// Overlay wins wherever it specifies a value.
    pub fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            catalog: overlay
                .catalog
                .clone()
                .unwrap_or_else(|| self.catalog.clone()),
            shape: overlay.shape.unwrap_or(self.shape),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.bookcat.toml`
    ///
    /// A relative catalog path from the local config is resolved against
    /// `local_dir`.
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let mut raw = load_raw_settings(&local_path)?;
                raw.catalog = raw.catalog.map(|c| {
                    let c = PathBuf::from(expand_env_vars(c.to_string_lossy().as_ref()));
                    if c.is_relative() {
                        dir.join(c)
                    } else {
                        c
                    }
                });
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply BOOKCAT_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("BOOKCAT"))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("catalog") {
            settings.catalog = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("shape") {
            settings.shape = val
                .parse()
                .map_err(|message| ApplicationError::Config { message })?;
        }

        Ok(settings)
    }

    /// Render as TOML, e.g. for `bookcat config show`.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: e.to_string(),
        })
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
