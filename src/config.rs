//! Where to look and what to list.
//!
//! The directory comes from an explicit path, the `INFO_FILES_DIR`
//! environment variable, or the host application's persistent data path
//! built from its company and product names.

use crate::filter::SuffixFilter;
use directories::BaseDirs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DIR_ENV_VAR: &str = "INFO_FILES_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryConfig {
    pub directory: PathBuf,
    pub filter: SuffixFilter,
}

impl InventoryConfig {
    #[must_use]
    pub fn new(directory: PathBuf, filter: SuffixFilter) -> Self {
        Self { directory, filter }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No target directory: pass --dir, set INFO_FILES_DIR, or give both --company and --product")]
    NoDirectory,
    #[error("Could not determine the home directory for the persistent data path")]
    NoBaseDir,
}

/// Inputs a front end collects before building an [`InventoryConfig`].
#[derive(Debug, Default, Clone)]
pub struct ConfigSource {
    pub dir: Option<PathBuf>,
    pub env_dir: Option<PathBuf>,
    pub company: Option<String>,
    pub product: Option<String>,
    pub filter: SuffixFilter,
}

impl ConfigSource {
    /// Fill `env_dir` from the process environment.
    #[must_use]
    pub fn with_env(mut self) -> Self {
        self.env_dir = std::env::var_os(DIR_ENV_VAR)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        self
    }

    pub fn resolve(self) -> Result<InventoryConfig, ConfigError> {
        let directory = if let Some(dir) = self.dir {
            dir
        } else if let Some(dir) = self.env_dir {
            dir
        } else if let (Some(company), Some(product)) = (&self.company, &self.product) {
            persistent_data_path(company, product)?
        } else {
            return Err(ConfigError::NoDirectory);
        };
        Ok(InventoryConfig::new(directory, self.filter))
    }
}

/// Per-user storage directory of an application, laid out the way game
/// engines place their persistent data.
pub fn persistent_data_path(company: &str, product: &str) -> Result<PathBuf, ConfigError> {
    let dirs = BaseDirs::new().ok_or(ConfigError::NoBaseDir)?;
    Ok(persistent_data_path_in(&dirs, company, product))
}

fn persistent_data_path_in(dirs: &BaseDirs, company: &str, product: &str) -> PathBuf {
    platform_root(dirs.home_dir(), dirs.config_dir())
        .join(company)
        .join(product)
}

#[cfg(target_os = "windows")]
fn platform_root(home: &Path, _config: &Path) -> PathBuf {
    home.join("AppData").join("LocalLow")
}

#[cfg(target_os = "macos")]
fn platform_root(home: &Path, _config: &Path) -> PathBuf {
    home.join("Library").join("Application Support")
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn platform_root(_home: &Path, config: &Path) -> PathBuf {
    config.join("unity3d")
}
