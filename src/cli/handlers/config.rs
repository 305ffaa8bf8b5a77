// src/cli/handlers/config.rs

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use std::env;

use super::commons;
use crate::{
    cli::args::ConfigArgs,
    constants::LOADER_MODULE,
    core::command_builder::{self, WrapperTarget},
    system::HostContext,
};

/// Prints the settings a load command would run with, and where they came from.
pub fn handle(args: Vec<String>, _host: &HostContext) -> Result<()> {
    let config_args = ConfigArgs::try_parse_from(&args)?;
    let base = env::current_dir().context(t!("load.error.no_cwd"))?;
    let resolved = commons::load_settings(&config_args.settings, &base)?;
    let settings = &resolved.settings;

    let wrapper = match command_builder::wrapper_target(
        &settings.wrapper_script,
        settings.working_directory(),
    ) {
        WrapperTarget::Module(module) if module == LOADER_MODULE => {
            format!("{} {}", module, t!("config.value.default").dimmed())
        }
        WrapperTarget::Module(module) => module,
        WrapperTarget::Script(script) => {
            format!("{} {}", script.display(), t!("config.value.script").dimmed())
        }
    };
    let working_directory = settings
        .working_directory()
        .map(|dir| dir.display().to_string())
        .unwrap_or_else(|| t!("config.value.inherit").dimmed().to_string());

    println!("{}", t!("config.title").yellow().bold());
    println!("  {} {}", format!("{:<20}", "pythonPath").cyan(), settings.python_path);
    println!("  {} {}", format!("{:<20}", "wrapperScript").cyan(), wrapper);
    println!("  {} {}", format!("{:<20}", "port").cyan(), settings.port);
    println!(
        "  {} {}",
        format!("{:<20}", "reinitializeOnLoad").cyan(),
        settings.reinitialize_on_load
    );
    println!("  {} {}", format!("{:<20}", "workingDirectory").cyan(), working_directory);

    println!("\n{}", t!("config.sources").yellow().bold());
    for source in &resolved.sources {
        println!("  {} {}", "→".blue(), source);
    }
    Ok(())
}
