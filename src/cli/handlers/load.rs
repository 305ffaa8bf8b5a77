// src/cli/handlers/load.rs

use super::commons;
use crate::{models::LoadCommand, system::HostContext};
use anyhow::Result;

/// `loadStructures`: load the selected files.
pub fn handle_structures(args: Vec<String>, host: &HostContext) -> Result<()> {
    commons::handle_load(LoadCommand::LoadStructures, args, host)
}

/// `loadFolder`: load the structures directly inside the selected folders.
pub fn handle_folder(args: Vec<String>, host: &HostContext) -> Result<()> {
    commons::handle_load(LoadCommand::LoadFolder, args, host)
}

/// `loadFolderRecursive`: load the structures anywhere below the selected folders.
pub fn handle_folder_recursive(args: Vec<String>, host: &HostContext) -> Result<()> {
    commons::handle_load(LoadCommand::LoadFolderRecursive, args, host)
}
