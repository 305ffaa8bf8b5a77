// src/cli/handlers/commons.rs

// The loading flow shared by every load command.

use anyhow::{Context, Result};
use clap::Parser;
use std::env;
use std::path::Path;

use crate::{
    cli::args::{LoadArgs, SettingsArgs},
    core::{
        invoker,
        selection,
        settings::{ResolvedSettings, SettingsLoader},
    },
    models::{InvocationRequest, LoadCommand, LoaderSettings},
    system::{HostContext, executor::ExecutionError},
};

/// Parses the command's arguments, resolves the selection and settings, and
/// runs the loader.
///
/// An empty selection is not an error: the user gets a warning and no process
/// is started.
pub fn handle_load(command: LoadCommand, args: Vec<String>, host: &HostContext) -> Result<()> {
    let load_args = LoadArgs::try_parse_from(&args)?;
    let base = env::current_dir().context(t!("load.error.no_cwd"))?;

    let request = match selection::resolve_selection(
        load_args.target.as_deref(),
        &load_args.selected,
        command.target_kind(),
        command.recursive(),
        &base,
    ) {
        Ok(request) => request,
        Err(e) if e.is_empty_selection() => {
            host.notifier
                .warn(&format!(t!("load.warn.no_selection"), reason = e));
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let resolved = load_settings(&load_args.settings, &base)?;
    run_loader(&request, &resolved.settings, host)?;
    Ok(())
}

/// Resolves the settings for one invocation from files, environment and flags.
pub fn load_settings(args: &SettingsArgs, base: &Path) -> Result<ResolvedSettings> {
    let workspaces = selection::resolve_workspace_folders(&args.workspaces, base)
        .context(t!("settings.error.workspace"))?;

    SettingsLoader::from_environment()
        .workspace_folders(workspaces)
        .explicit_file(args.config.clone())
        .overrides(args.to_layer())
        .load()
        .context(t!("settings.error.load"))
}

/// Runs the wrapper for `request` and reports the outcome exactly once:
/// a success notification, or a failure notification carrying the error.
///
/// The error is still returned so the front-end can pick an exit code; it
/// should not be shown to the user a second time.
pub fn run_loader(
    request: &InvocationRequest,
    settings: &LoaderSettings,
    host: &HostContext,
) -> Result<(), ExecutionError> {
    host.notifier.progress(t!("loader.progress.title"));

    match invoker::invoke(request, settings, &host.sink) {
        Ok(()) => {
            host.notifier.info(t!("loader.info.loaded"));
            Ok(())
        }
        Err(e) => {
            log::debug!("Loader failed: {:?}", e);
            host.notifier
                .error(&format!(t!("loader.error.failed"), error = e));
            Err(e)
        }
    }
}
