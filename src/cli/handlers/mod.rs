// src/cli/handlers/mod.rs

// One module per command family; `commons` holds the shared loading flow.

pub mod commons;
pub mod config;
pub mod load;
