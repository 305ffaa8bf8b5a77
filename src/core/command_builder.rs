// src/core/command_builder.rs

use crate::{
    constants::LOADER_MODULE,
    models::{InvocationRequest, LoaderSettings},
};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// What the interpreter is asked to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WrapperTarget {
    /// `<python> -m <module> ...`
    Module(String),
    /// `<python> <script> ...`
    Script(PathBuf),
}

/// Interprets the `wrapperScript` setting.
///
/// Empty selects the bundled module. A value ending in `.py`, or naming an
/// existing file, is run as a script. Anything else is a module name.
///
/// A relative path is looked up in `working_directory` when one is given,
/// since that is where the interpreter will run.
pub fn wrapper_target(wrapper_script: &str, working_directory: Option<&Path>) -> WrapperTarget {
    let trimmed = wrapper_script.trim();
    if trimmed.is_empty() {
        return WrapperTarget::Module(LOADER_MODULE.to_string());
    }
    let candidate = match working_directory {
        Some(dir) => dir.join(trimmed),
        None => PathBuf::from(trimmed),
    };
    if trimmed.ends_with(".py") || candidate.is_file() {
        WrapperTarget::Script(PathBuf::from(trimmed))
    } else {
        WrapperTarget::Module(trimmed.to_string())
    }
}

/// Builds the interpreter's argument vector. Targets stay `OsString` so
/// non-UTF-8 paths reach the child intact:
///
/// `-m <module> --port <port> [--recursive] [--no-reinit] -- <targets...>`
///
/// Targets are passed verbatim and in order; nothing is quoted or escaped.
pub fn build_args(request: &InvocationRequest, settings: &LoaderSettings) -> Vec<OsString> {
    let mut args: Vec<OsString> = Vec::with_capacity(request.targets().len() + 8);

    match wrapper_target(&settings.wrapper_script, settings.working_directory()) {
        WrapperTarget::Module(module) => {
            args.push("-m".into());
            args.push(module.into());
        }
        WrapperTarget::Script(script) => args.push(script.into_os_string()),
    }

    args.push("--port".into());
    args.push(settings.port.to_string().into());
    if request.recursive() {
        args.push("--recursive".into());
    }
    if !settings.reinitialize_on_load {
        args.push("--no-reinit".into());
    }
    args.push("--".into());
    args.extend(request.targets().iter().map(|t| t.as_os_str().to_os_string()));
    args
}

/// Renders the command for the log. Arguments containing a space are wrapped
/// in double quotes; this is for display only and never reaches the child.
pub fn render_command_line(program: &str, args: &[OsString]) -> String {
    std::iter::once(program.to_string())
        .chain(args.iter().map(|a| a.to_string_lossy().into_owned()))
        .map(|part| {
            if part.contains(' ') {
                format!("\"{}\"", part)
            } else {
                part
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(targets: &[&str], recursive: bool) -> InvocationRequest {
        InvocationRequest::new(targets.iter().map(PathBuf::from).collect(), recursive).unwrap()
    }

    fn as_strings(args: &[OsString]) -> Vec<String> {
        args.iter().map(|a| a.to_string_lossy().into_owned()).collect()
    }

    #[test]
    fn test_single_file_with_defaults() {
        let args = build_args(&request(&["/a/model.pdb"], false), &LoaderSettings::default());
        assert_eq!(
            as_strings(&args),
            vec!["-m", "pymol_loader.cli", "--port", "9123", "--", "/a/model.pdb"]
        );
    }

    #[test]
    fn test_recursive_folders_without_reinit() {
        let settings = LoaderSettings {
            reinitialize_on_load: false,
            ..LoaderSettings::default()
        };
        let args = build_args(&request(&["/dir1", "/dir2"], true), &settings);
        assert_eq!(
            as_strings(&args),
            vec![
                "-m",
                "pymol_loader.cli",
                "--port",
                "9123",
                "--recursive",
                "--no-reinit",
                "--",
                "/dir1",
                "/dir2"
            ]
        );
    }

    #[test]
    fn test_optional_flags_track_their_settings() {
        for recursive in [false, true] {
            for reinit in [false, true] {
                let settings = LoaderSettings {
                    reinitialize_on_load: reinit,
                    ..LoaderSettings::default()
                };
                let args = as_strings(&build_args(&request(&["/x"], recursive), &settings));
                assert_eq!(args.contains(&"--recursive".to_string()), recursive);
                assert_eq!(args.contains(&"--no-reinit".to_string()), !reinit);
            }
        }
    }

    #[test]
    fn test_targets_follow_separator_in_order() {
        let targets = ["/b/second.cif", "/a/first.pdb", "/b/second.cif", "/c/with space.pdb"];
        let args = as_strings(&build_args(&request(&targets, false), &LoaderSettings::default()));

        let separator = args.iter().position(|a| a == "--").unwrap();
        assert_eq!(&args[separator + 1..], &targets.map(String::from)[..]);
    }

    #[test]
    fn test_port_is_configurable() {
        let settings = LoaderSettings {
            port: 9999,
            ..LoaderSettings::default()
        };
        let args = as_strings(&build_args(&request(&["/x"], false), &settings));
        assert_eq!(&args[2..4], &["--port".to_string(), "9999".to_string()]);
    }

    #[test]
    fn test_wrapper_module_and_script() {
        assert_eq!(
            wrapper_target("", None),
            WrapperTarget::Module("pymol_loader.cli".to_string())
        );
        assert_eq!(
            wrapper_target("  ", None),
            WrapperTarget::Module("pymol_loader.cli".to_string())
        );
        assert_eq!(
            wrapper_target("my_tools.loader", None),
            WrapperTarget::Module("my_tools.loader".to_string())
        );
        assert_eq!(
            wrapper_target("tools/pymol_load_wrapper.py", None),
            WrapperTarget::Script(PathBuf::from("tools/pymol_load_wrapper.py"))
        );
    }

    #[test]
    fn test_existing_file_is_a_script() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let path = file.path().to_string_lossy().into_owned();
        assert_eq!(wrapper_target(&path, None), WrapperTarget::Script(file.path().to_path_buf()));
    }

    #[test]
    fn test_relative_script_is_found_in_working_directory() {
        let workspace = tempfile::tempdir().unwrap();
        std::fs::create_dir(workspace.path().join("tools")).unwrap();
        std::fs::write(workspace.path().join("tools").join("load_entry"), "").unwrap();

        assert_eq!(
            wrapper_target("tools/load_entry", Some(workspace.path())),
            WrapperTarget::Script(PathBuf::from("tools/load_entry"))
        );
        assert_eq!(
            wrapper_target("tools/load_entry", None),
            WrapperTarget::Module("tools/load_entry".to_string())
        );

        let settings = LoaderSettings {
            wrapper_script: "tools/load_entry".to_string(),
            working_directory: Some(workspace.path().to_path_buf()),
            ..LoaderSettings::default()
        };
        let args = as_strings(&build_args(&request(&["/a.pdb"], false), &settings));
        assert_eq!(args[0], "tools/load_entry");
    }

    #[test]
    fn test_script_replaces_module_flag() {
        let settings = LoaderSettings {
            wrapper_script: "tools/pymol_load_wrapper.py".to_string(),
            ..LoaderSettings::default()
        };
        let args = as_strings(&build_args(&request(&["/a.pdb"], false), &settings));
        assert_eq!(
            args,
            vec!["tools/pymol_load_wrapper.py", "--port", "9123", "--", "/a.pdb"]
        );
    }

    #[test]
    fn test_render_quotes_only_for_display() {
        let args = build_args(
            &request(&["/data/my model.pdb", "/data/plain.cif"], false),
            &LoaderSettings::default(),
        );
        assert_eq!(
            render_command_line("python", &args),
            "python -m pymol_loader.cli --port 9123 -- \"/data/my model.pdb\" /data/plain.cif"
        );
        assert!(as_strings(&args).contains(&"/data/my model.pdb".to_string()));
    }

    #[test]
    fn test_render_quotes_interpreter_with_space() {
        assert_eq!(
            render_command_line("/opt/py env/bin/python", &[OsString::from("-m")]),
            "\"/opt/py env/bin/python\" -m"
        );
    }
}
