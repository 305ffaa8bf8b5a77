//! # pymol-load
//!
//! Loads molecular structure files and folders into a running PyMOL by
//! launching the external `pymol_loader` wrapper and streaming its output.
//!
//! The crate is split the same way the binary uses it:
//!
//! - **`core`**: selection resolution, layered settings, argument construction
//!   and the loader invoker.
//! - **`system`**: process execution and the host capabilities (log sink and
//!   notifications) that the invoker reports through.
//! - **`cli`**: the command registry and handlers behind the `pymol-load` binary.

include!(concat!(env!("OUT_DIR"), "/translations.rs"));

pub mod cli;
pub mod constants;
pub mod core;
pub mod models;
pub mod system;
