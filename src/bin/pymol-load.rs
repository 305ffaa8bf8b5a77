// src/bin/pymol-load.rs

use clap::Parser;
use colored::*;
use pymol_load::{
    cli::{self, Cli, dispatcher},
    system::{HostContext, executor::ExecutionError},
    t,
};

/// The entry point of `pymol-load`.
/// It sets up logging, parses arguments, dispatches to the command's handler,
/// and performs centralized error handling.
fn main() {
    env_logger::init();

    let host = HostContext::terminal();

    if let Err(e) = dispatcher::dispatch(Cli::parse().args, &host) {
        // --- Centralized Error Handling ---
        // Loader failures were already shown by the handler; only the exit code is left.
        if let Some(exec_err) = e.downcast_ref::<ExecutionError>() {
            std::process::exit(cli::exit_code_for(exec_err));
        }

        // Argument errors of a command (including its `--help`) are printed by clap.
        if let Some(clap_err) = e.downcast_ref::<clap::Error>() {
            clap_err.exit();
        }

        eprintln!("\n{}: {:#}", t!("notify.label.error").red().bold(), e);
        std::process::exit(1);
    }
}
