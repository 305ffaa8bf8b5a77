// src/models.rs

use crate::constants::{DEFAULT_PORT, DEFAULT_PYTHON_PATH};
use serde::Deserialize;
use std::path::{Path, PathBuf};

// --- Invocation ---

/// A single request to load targets into PyMOL.
///
/// The target list is never empty: the only way to build one is through
/// [`InvocationRequest::new`], which refuses an empty selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationRequest {
    targets: Vec<PathBuf>,
    recursive: bool,
}

impl InvocationRequest {
    /// Creates a request, or `None` if `targets` is empty.
    pub fn new(targets: Vec<PathBuf>, recursive: bool) -> Option<Self> {
        if targets.is_empty() {
            return None;
        }
        Some(Self { targets, recursive })
    }

    /// The targets, in the order the user selected them.
    pub fn targets(&self) -> &[PathBuf] {
        &self.targets
    }

    /// Whether folder targets should be expanded recursively by the wrapper.
    pub fn recursive(&self) -> bool {
        self.recursive
    }
}

/// Which kind of selection a trigger accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    /// Structure files. Entries ending in a path separator are dropped.
    Files,
    /// Folders of structure files.
    Folders,
}

/// The user-facing load triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadCommand {
    /// Files only, non-recursive.
    LoadStructures,
    /// Folders, non-recursive.
    LoadFolder,
    /// Folders, recursive.
    LoadFolderRecursive,
}

impl LoadCommand {
    /// The kind of selection this trigger accepts.
    pub fn target_kind(self) -> TargetKind {
        match self {
            Self::LoadStructures => TargetKind::Files,
            Self::LoadFolder | Self::LoadFolderRecursive => TargetKind::Folders,
        }
    }

    /// Whether this trigger asks the wrapper to descend into subfolders.
    pub fn recursive(self) -> bool {
        matches!(self, Self::LoadFolderRecursive)
    }
}

// --- Settings ---

/// The fully resolved configuration the loader runs with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderSettings {
    /// Interpreter executable, already expanded (`~`, `$VAR`).
    pub python_path: String,
    /// Wrapper module or script; empty means the bundled `pymol_loader.cli` module.
    pub wrapper_script: String,
    /// Port of the PyMOL RPC server the wrapper connects to.
    pub port: u16,
    /// When `false`, the wrapper is passed `--no-reinit`.
    pub reinitialize_on_load: bool,
    /// Working directory for the child. `None` inherits the caller's.
    pub working_directory: Option<PathBuf>,
}

impl Default for LoaderSettings {
    fn default() -> Self {
        Self {
            python_path: DEFAULT_PYTHON_PATH.to_string(),
            wrapper_script: String::new(),
            port: DEFAULT_PORT,
            reinitialize_on_load: true,
            working_directory: None,
        }
    }
}

impl LoaderSettings {
    /// Applies every value present in `layer` over the current settings.
    pub fn apply(&mut self, layer: &SettingsLayer) {
        if let Some(python_path) = &layer.python_path {
            self.python_path = python_path.clone();
        }
        if let Some(wrapper_script) = &layer.wrapper_script {
            self.wrapper_script = wrapper_script.clone();
        }
        if let Some(port) = layer.port {
            self.port = port;
        }
        if let Some(reinit) = layer.reinitialize_on_load {
            self.reinitialize_on_load = reinit;
        }
    }

    /// The directory the wrapper runs in, if any.
    pub fn working_directory(&self) -> Option<&Path> {
        self.working_directory.as_deref()
    }
}

/// One partial layer of settings: a config file, the environment, or CLI flags.
/// Absent keys leave the lower layers untouched.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SettingsLayer {
    /// `pythonPath`
    pub python_path: Option<String>,
    /// `wrapperScript`
    pub wrapper_script: Option<String>,
    /// `port`
    pub port: Option<u16>,
    /// `reinitializeOnLoad`
    pub reinitialize_on_load: Option<bool>,
}

impl SettingsLayer {
    /// `true` when the layer sets nothing.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// The on-disk shape of a config file: a single `[pymolLoader]` table.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct SettingsFile {
    /// The `[pymolLoader]` table.
    #[serde(rename = "pymolLoader", default)]
    pub pymol_loader: SettingsLayer,
}
