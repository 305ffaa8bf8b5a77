//! # Settings Loader
//!
//! Resolves [`LoaderSettings`] from layers, each overriding the one before:
//!
//! 1. Built-in defaults.
//! 2. The global file (`<config dir>/pymol-loader/config.toml`).
//! 3. The first workspace folder's `.pymol-loader.toml`.
//! 4. An explicit `--config` file, which must exist.
//! 5. `PYMOL_LOADER_*` environment variables.
//! 6. Command-line flags.
//!
//! Files are optional except for the explicit one. A file that exists but does
//! not parse is an error rather than being skipped.
use crate::{
    constants::ENV_PREFIX,
    core::paths::{self, PathError},
    models::{LoaderSettings, SettingsFile, SettingsLayer},
};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Why the settings could not be resolved.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// A settings file exists but could not be read.
    #[error("Could not read settings file '{path}': {source}")]
    Read {
        /// The file.
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// A settings file is not valid TOML, or has unknown keys.
    #[error("Invalid settings file '{path}': {source}")]
    Parse {
        /// The file.
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// The `--config` file is missing.
    #[error("Settings file '{0}' does not exist.")]
    MissingConfigFile(String),
    /// A `PYMOL_LOADER_*` value that does not parse, or is not valid Unicode.
    #[error("Invalid value '{value}' for environment variable {var}.")]
    InvalidEnvValue {
        /// The variable name.
        var: String,
        /// The value, lossily decoded.
        value: String,
    },
    /// The resolved port is 0.
    #[error("Port 0 is not a valid PyMOL RPC port.")]
    InvalidPort,
    /// `pythonPath` names an undefined variable.
    #[error("Invalid pythonPath: {0}")]
    PythonPath(#[from] PathError),
}

/// The resolved settings plus a description of every layer that contributed.
#[derive(Debug, Clone)]
pub struct ResolvedSettings {
    /// The effective settings.
    pub settings: LoaderSettings,
    /// Every layer that set something, lowest first.
    pub sources: Vec<String>,
}

/// Collects the inputs of every layer, then resolves them in order.
#[derive(Debug, Default)]
pub struct SettingsLoader {
    global_file: Option<PathBuf>,
    workspace_folders: Vec<PathBuf>,
    explicit_file: Option<PathBuf>,
    env_vars: Vec<(OsString, OsString)>,
    overrides: SettingsLayer,
}

impl SettingsLoader {
    /// A loader wired to the real global config file and process environment.
    pub fn from_environment() -> Self {
        let global_file = match paths::get_global_config_path() {
            Ok(path) => Some(path),
            Err(e) => {
                log::debug!("No global settings file: {}", e);
                None
            }
        };
        Self {
            global_file,
            env_vars: loader_env_vars(std::env::vars_os()),
            ..Self::default()
        }
    }

    /// Overrides the global settings file; `None` skips that layer.
    pub fn global_file(mut self, path: Option<PathBuf>) -> Self {
        self.global_file = path;
        self
    }

    /// The first folder is the working directory and the source of the workspace file.
    pub fn workspace_folders(mut self, folders: Vec<PathBuf>) -> Self {
        self.workspace_folders = folders;
        self
    }

    /// A `--config` file. Unlike the other files, it must exist.
    pub fn explicit_file(mut self, path: Option<PathBuf>) -> Self {
        self.explicit_file = path;
        self
    }

    /// The environment to read `PYMOL_LOADER_*` variables from.
    pub fn env_vars<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<OsString>,
        V: Into<OsString>,
    {
        self.env_vars = vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        self
    }

    /// Command-line flags, the highest layer.
    pub fn overrides(mut self, layer: SettingsLayer) -> Self {
        self.overrides = layer;
        self
    }

    /// Resolves every layer in order. Port 0 and broken files are errors.
    pub fn load(&self) -> Result<ResolvedSettings, SettingsError> {
        let mut settings = LoaderSettings::default();
        let mut sources = vec!["defaults".to_string()];

        if let Some(global) = &self.global_file {
            if let Some(layer) = read_optional_layer(global)? {
                settings.apply(&layer);
                sources.push(global.display().to_string());
            }
        }

        let workspace = self.workspace_folders.first();
        if let Some(folder) = workspace {
            let file = paths::workspace_config_path(folder);
            if let Some(layer) = read_optional_layer(&file)? {
                settings.apply(&layer);
                sources.push(file.display().to_string());
            }
        }

        if let Some(explicit) = &self.explicit_file {
            if !explicit.is_file() {
                return Err(SettingsError::MissingConfigFile(
                    explicit.display().to_string(),
                ));
            }
            let layer = read_layer(explicit)?;
            settings.apply(&layer);
            sources.push(explicit.display().to_string());
        }

        let env_layer = env_layer(&self.env_vars)?;
        if !env_layer.is_empty() {
            settings.apply(&env_layer);
            sources.push("environment".to_string());
        }

        if !self.overrides.is_empty() {
            settings.apply(&self.overrides);
            sources.push("command line".to_string());
        }

        if settings.port == 0 {
            return Err(SettingsError::InvalidPort);
        }
        settings.python_path = paths::expand_path_template(&settings.python_path)?;
        settings.working_directory = workspace.cloned();

        log::debug!("Resolved settings {:?} from {:?}", settings, sources);
        Ok(ResolvedSettings { settings, sources })
    }
}

fn read_optional_layer(path: &Path) -> Result<Option<SettingsLayer>, SettingsError> {
    if !path.is_file() {
        log::debug!("Settings file not present: {}", path.display());
        return Ok(None);
    }
    read_layer(path).map(Some)
}

fn read_layer(path: &Path) -> Result<SettingsLayer, SettingsError> {
    let content = fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.display().to_string(),
        source,
    })?;
    parse_layer(&content).map_err(|source| SettingsError::Parse {
        path: path.display().to_string(),
        source,
    })
}

/// Parses the `[pymolLoader]` table of a settings file.
pub fn parse_layer(content: &str) -> Result<SettingsLayer, toml::de::Error> {
    toml::from_str::<SettingsFile>(content).map(|file| file.pymol_loader)
}

/// Keeps only the loader's variables, so unrelated ones are never decoded.
fn loader_env_vars<I>(vars: I) -> Vec<(OsString, OsString)>
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    vars.into_iter()
        .filter(|(key, _)| key.to_string_lossy().starts_with(ENV_PREFIX))
        .collect()
}

/// Builds the environment layer from `PYMOL_LOADER_*` variables.
fn env_layer(vars: &[(OsString, OsString)]) -> Result<SettingsLayer, SettingsError> {
    let mut layer = SettingsLayer::default();
    for (key, raw_value) in vars {
        let Some(name) = key.to_str().and_then(|k| k.strip_prefix(ENV_PREFIX)) else {
            continue;
        };
        let invalid = || SettingsError::InvalidEnvValue {
            var: key.to_string_lossy().into_owned(),
            value: raw_value.to_string_lossy().into_owned(),
        };
        let Some(value) = raw_value.to_str() else {
            return Err(invalid());
        };
        match name {
            "PYTHON_PATH" => layer.python_path = Some(value.to_string()),
            "WRAPPER_SCRIPT" => layer.wrapper_script = Some(value.to_string()),
            "PORT" => layer.port = Some(value.trim().parse().map_err(|_| invalid())?),
            "REINITIALIZE_ON_LOAD" => {
                layer.reinitialize_on_load = Some(parse_bool(value).ok_or_else(invalid)?);
            }
            _ => {}
        }
    }
    Ok(layer)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
