// src/cli/args.rs
use crate::models::SettingsLayer;
use clap::{Args, Parser};
use std::path::PathBuf;

/// Arguments shared by the three load commands.
#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true)] // The dispatcher has already consumed the command name.
pub struct LoadArgs {
    /// The file or folder the command was invoked on.
    pub target: Option<String>,

    /// A selected file or folder. Repeat for a multi-selection; when present,
    /// the primary target is ignored.
    #[arg(long = "select", short = 's', value_name = "PATH")]
    pub selected: Vec<String>,

    #[command(flatten)]
    pub settings: SettingsArgs,
}

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true)]
pub struct ConfigArgs {
    #[command(flatten)]
    pub settings: SettingsArgs,
}

/// Where settings come from, and per-invocation overrides.
#[derive(Args, Debug, Default)]
pub struct SettingsArgs {
    /// A workspace folder. The first one is the wrapper's working directory.
    #[arg(long = "workspace", short = 'w', value_name = "DIR")]
    pub workspaces: Vec<String>,

    /// An extra settings file, applied over the global and workspace files.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// The Python interpreter to run.
    #[arg(long = "python", value_name = "PATH")]
    pub python_path: Option<String>,

    /// The wrapper module, or a path to a wrapper script.
    #[arg(long = "wrapper", value_name = "MODULE|SCRIPT")]
    pub wrapper_script: Option<String>,

    /// The PyMOL RPC port.
    #[arg(long)]
    pub port: Option<u16>,

    /// Do not reinitialize PyMOL before loading.
    #[arg(long)]
    pub no_reinit: bool,
}

impl SettingsArgs {
    /// The command-line layer of the settings. Only flags actually given are set.
    pub fn to_layer(&self) -> SettingsLayer {
        SettingsLayer {
            python_path: self.python_path.clone(),
            wrapper_script: self.wrapper_script.clone(),
            port: self.port,
            reinitialize_on_load: self.no_reinit.then_some(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_args_parse() {
        let args = LoadArgs::try_parse_from([
            "/work/model.pdb",
            "-s",
            "/work/a.pdb",
            "--select",
            "/work/b.pdb",
            "--port",
            "9200",
            "--workspace",
            "/work",
        ])
        .unwrap();
        assert_eq!(args.target.as_deref(), Some("/work/model.pdb"));
        assert_eq!(args.selected, vec!["/work/a.pdb", "/work/b.pdb"]);
        assert_eq!(args.settings.port, Some(9200));
        assert_eq!(args.settings.workspaces, vec!["/work"]);
    }

    #[test]
    fn test_layer_only_contains_given_flags() {
        let args = LoadArgs::try_parse_from(["x.pdb"]).unwrap();
        assert!(args.settings.to_layer().is_empty());

        let args = LoadArgs::try_parse_from(["x.pdb", "--no-reinit", "--python", "python3"]).unwrap();
        let layer = args.settings.to_layer();
        assert_eq!(layer.reinitialize_on_load, Some(false));
        assert_eq!(layer.python_path.as_deref(), Some("python3"));
        assert_eq!(layer.port, None);
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        assert!(LoadArgs::try_parse_from(["x.pdb", "--port", "70000"]).is_err());
    }
}
