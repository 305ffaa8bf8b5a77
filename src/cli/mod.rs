use crate::constants::EXIT_CODE_SPAWN_FAILURE;
use crate::system::executor::ExecutionError;
use clap::Parser;

pub mod args;
pub mod dispatcher;
pub mod handlers;

/// Builds the color-aware help string at runtime.
fn build_help_string() -> &'static str {
    // Replaces the semantic tags of the help template with ANSI styles.
    let use_colors = colored::control::SHOULD_COLORIZE.should_colorize();

    let template = t!("cli.help.template");

    let title = if use_colors { "\x1b[1;33m" } else { "" }; // Bold Yellow
    let hl = if use_colors { "\x1b[1;36m" } else { "" }; // Bold Cyan
    let cmd = if use_colors { "\x1b[36m" } else { "" }; // Cyan
    let group = if use_colors { "\x1b[1;32m" } else { "" }; // Bold Green
    let dim = if use_colors { "\x1b[2m" } else { "" }; // Dim
    let reset = if use_colors { "\x1b[0m" } else { "" };

    let formatted_string = template
        .replace("<title>", title)
        .replace("</title>", reset)
        .replace("<hl>", hl)
        .replace("</hl>", reset)
        .replace("<cmd>", cmd)
        .replace("</cmd>", reset)
        .replace("<group>", group)
        .replace("</group>", reset)
        .replace("<dim>", dim)
        .replace("</dim>", reset);

    Box::leak(formatted_string.into_boxed_str())
}

/// pymol-load: load structure files and folders into a running PyMOL.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    help_template = build_help_string(),
    styles = clap::builder::Styles::styled()
        .header(clap::builder::styling::AnsiColor::Yellow.on_default().bold())
        .usage(clap::builder::styling::AnsiColor::Yellow.on_default().bold())
        .literal(clap::builder::styling::AnsiColor::Cyan.on_default().bold())
        .placeholder(clap::builder::styling::AnsiColor::Green.on_default()),
)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// The command name followed by its own arguments. Each handler parses
    /// the rest with its own parser.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

/// The process exit code for a loader failure that was already reported.
///
/// The wrapper's own exit code is passed through so scripts can tell failures apart.
pub fn exit_code_for(error: &ExecutionError) -> i32 {
    match error {
        ExecutionError::NonZeroExit { code } => *code,
        ExecutionError::Spawn { .. } => EXIT_CODE_SPAWN_FAILURE,
        ExecutionError::Terminated | ExecutionError::Wait(_) => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_code_for(&ExecutionError::NonZeroExit { code: 4 }), 4);
        assert_eq!(
            exit_code_for(&ExecutionError::Spawn {
                program: "python".to_string(),
                source: io::Error::from(io::ErrorKind::NotFound),
            }),
            127
        );
        assert_eq!(exit_code_for(&ExecutionError::Terminated), 1);
    }

    #[test]
    fn test_cli_collects_everything_after_the_command() {
        let cli = Cli::try_parse_from([
            "pymol-load",
            "load-folder",
            "/data",
            "--select",
            "/data/a",
            "--no-reinit",
        ])
        .unwrap();
        assert_eq!(
            cli.args,
            vec!["load-folder", "/data", "--select", "/data/a", "--no-reinit"]
        );
    }
}
