// src/constants.rs

/// The Python module run by default through `<python> -m`.
pub const LOADER_MODULE: &str = "pymol_loader.cli";

/// The interpreter used when no `pythonPath` is configured.
pub const DEFAULT_PYTHON_PATH: &str = "python";

/// The PyMOL RPC port used when no `port` is configured.
pub const DEFAULT_PORT: u16 = 9123;

/// The table that holds the loader settings inside a config file.
pub const CONFIG_NAMESPACE: &str = "pymolLoader";

/// The name of the directory holding the global config (in the system config dir).
pub const CONFIG_DIR_NAME: &str = "pymol-loader";

/// The name of the global configuration file (inside `CONFIG_DIR_NAME`).
pub const GLOBAL_CONFIG_FILENAME: &str = "config.toml";

/// The name of the per-workspace configuration file.
pub const WORKSPACE_CONFIG_FILENAME: &str = ".pymol-loader.toml";

/// Prefix of the environment variables that override settings.
pub const ENV_PREFIX: &str = "PYMOL_LOADER_";

/// Process exit code used when the interpreter could not be started.
pub const EXIT_CODE_SPAWN_FAILURE: i32 = 127;
