use anyhow::{Result, anyhow};
use clap::CommandFactory;

use crate::{
    cli::{Cli, handlers},
    system::HostContext,
};

/// A registered command: its name, its aliases, and its handler.
struct CommandDefinition {
    name: &'static str,
    aliases: &'static [&'static str],
    handler: fn(Vec<String>, &HostContext) -> Result<()>,
}

/// The single source of truth for all commands.
static COMMAND_REGISTRY: &[CommandDefinition] = &[
    CommandDefinition {
        name: "loadStructures",
        aliases: &["load-structures", "structures"],
        handler: handlers::load::handle_structures,
    },
    CommandDefinition {
        name: "loadFolder",
        aliases: &["load-folder", "folder"],
        handler: handlers::load::handle_folder,
    },
    CommandDefinition {
        name: "loadFolderRecursive",
        aliases: &["load-folder-recursive", "folder-r"],
        handler: handlers::load::handle_folder_recursive,
    },
    CommandDefinition {
        name: "config",
        aliases: &["settings"],
        handler: handlers::config::handle,
    },
];

/// Finds a command definition in the registry by its name or alias.
fn find_command(name: &str) -> Option<&'static CommandDefinition> {
    COMMAND_REGISTRY
        .iter()
        .find(|cmd| cmd.name == name || cmd.aliases.contains(&name))
}

/// The canonical name of a command, if `name` is a command or one of its aliases.
pub fn canonical_name(name: &str) -> Option<&'static str> {
    find_command(name).map(|cmd| cmd.name)
}

/// Routes `<command> [args...]` to its handler.
pub fn dispatch(all_args: Vec<String>, host: &HostContext) -> Result<()> {
    log::debug!("Dispatching args: {:?}", all_args);

    let mut args = all_args.into_iter();
    let Some(name) = args.next() else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match name.as_str() {
        "-h" | "--help" | "help" => {
            Cli::command().print_help()?;
            return Ok(());
        }
        "-V" | "--version" => {
            println!("{}", Cli::command().render_version().trim_end());
            return Ok(());
        }
        _ => {}
    }

    let command = find_command(&name).ok_or_else(|| {
        let available = COMMAND_REGISTRY
            .iter()
            .map(|cmd| cmd.name)
            .collect::<Vec<_>>()
            .join(", ");
        anyhow!(
            t!("dispatch.error.unknown_command"),
            name = name,
            available = available
        )
    })?;

    (command.handler)(args.collect(), host)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::{notifier::RecordingNotifier, sink::BufferSink};
    use std::sync::Arc;

    #[test]
    fn test_names_and_aliases_resolve() {
        assert_eq!(canonical_name("loadStructures"), Some("loadStructures"));
        assert_eq!(canonical_name("load-structures"), Some("loadStructures"));
        assert_eq!(canonical_name("folder"), Some("loadFolder"));
        assert_eq!(canonical_name("folder-r"), Some("loadFolderRecursive"));
        assert_eq!(canonical_name("settings"), Some("config"));
        assert_eq!(canonical_name("load"), None);
    }

    #[test]
    fn test_unknown_command_lists_available_ones() {
        let host = HostContext::new(Arc::new(BufferSink::new()), Arc::new(RecordingNotifier::new()));
        let err = dispatch(vec!["explode".to_string()], &host).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("explode"));
        assert!(message.contains("loadFolderRecursive"));
    }

    #[test]
    fn test_dispatch_reaches_the_handler() {
        let notifier = Arc::new(RecordingNotifier::new());
        let host = HostContext::new(Arc::new(BufferSink::new()), notifier.clone());

        // No target at all: the handler warns instead of starting a process.
        dispatch(vec!["folder".to_string()], &host).unwrap();
        assert_eq!(notifier.warnings().len(), 1);
    }
}
