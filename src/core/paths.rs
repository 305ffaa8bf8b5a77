// src/core/paths.rs

use crate::constants::{CONFIG_DIR_NAME, GLOBAL_CONFIG_FILENAME, WORKSPACE_CONFIG_FILENAME};
use lazy_static::lazy_static;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use thiserror::Error;

lazy_static! {
    static ref LOADER_CONFIG_DIR: Mutex<Option<PathBuf>> = Mutex::new(None);
}

#[derive(Error, Debug)]
pub enum PathError {
    #[error("Could not find system config directory.")]
    ConfigDirNotFound,
    #[error("Could not expand '{template}': {message}")]
    Expansion { template: String, message: String },
    #[error("Could not resolve '{path}' to an absolute path: {source}")]
    Absolutize {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Returns the loader's configuration directory (`~/.config/pymol-loader` on Linux).
///
/// Memoized: the first call asks the OS, later calls return the cached value.
/// The directory is not created; it is only ever read from.
pub fn get_loader_config_dir() -> Result<PathBuf, PathError> {
    let mut cached = LOADER_CONFIG_DIR
        .lock()
        .unwrap_or_else(PoisonError::into_inner);

    if let Some(path) = &*cached {
        return Ok(path.clone());
    }

    let config_path = dirs::config_dir()
        .ok_or(PathError::ConfigDirNotFound)?
        .join(CONFIG_DIR_NAME);

    *cached = Some(config_path.clone());
    Ok(config_path)
}

/// Path of the global settings file, whether or not it exists.
pub fn get_global_config_path() -> Result<PathBuf, PathError> {
    get_loader_config_dir().map(|dir| dir.join(GLOBAL_CONFIG_FILENAME))
}

/// Path of the settings file for a workspace folder, whether or not it exists.
pub fn workspace_config_path(workspace: &Path) -> PathBuf {
    workspace.join(WORKSPACE_CONFIG_FILENAME)
}

/// Expands `~` and environment variables (`$VAR`, `${VAR}`) in a configured path.
pub fn expand_path_template(template: &str) -> Result<String, PathError> {
    shellexpand::full(template)
        .map(|expanded| expanded.into_owned())
        .map_err(|e| PathError::Expansion {
            template: template.to_string(),
            message: e.to_string(),
        })
}

/// Makes `path` absolute against `base` without touching the filesystem.
///
/// Symlinks are not resolved and the target does not need to exist.
pub fn absolutize(path: &Path, base: &Path) -> Result<PathBuf, PathError> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };
    std::path::absolute(&joined)
        .map(|p| dunce::simplified(&p).to_path_buf())
        .map_err(|source| PathError::Absolutize {
            path: path.display().to_string(),
            source,
        })
}
