//! Path resolution for paths named in config files.
//!
//! Relative paths are taken relative to the directory holding the config file that set them, and
//! a leading `~` expands to the home directory.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::ConfigError;

/// Resolves a dataset path to an absolute, canonical file path.
///
/// The path must exist and be a regular file.
pub fn resolve_dataset_path(path: &str, config_dir: &Path) -> Result<PathBuf, ConfigError> {
    let absolute = anchor_path(path, config_dir)?;

    let canonical = absolute
        .canonicalize()
        .map_err(|source| ConfigError::PathResolution {
            path: absolute.clone(),
            source,
        })?;

    if !canonical.is_file() {
        return Err(ConfigError::DatasetNotFile { path: canonical });
    }

    Ok(canonical)
}

/// Expands `~` and anchors a relative path at `config_dir` without touching the filesystem.
///
/// Used for directories that may not exist yet, such as the model cache.
pub fn anchor_path(path: &str, config_dir: &Path) -> Result<PathBuf, ConfigError> {
    let expanded = expand_tilde(path)?;
    Ok(if expanded.is_absolute() {
        expanded
    } else {
        config_dir.join(expanded)
    })
}

/// Expands a tilde prefix to the home directory.
fn expand_tilde(path: &str) -> Result<PathBuf, ConfigError> {
    if path == "~" {
        return home_dir();
    }

    if let Some(rest) = path.strip_prefix("~/") {
        let home = home_dir()?;
        return Ok(home.join(rest));
    }

    Ok(PathBuf::from(path))
}

/// Returns the home directory.
fn home_dir() -> Result<PathBuf, ConfigError> {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .ok_or(ConfigError::NoHomeDirectory)
}
