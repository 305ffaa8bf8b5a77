// src/core/mod.rs

pub mod command_builder;
pub mod invoker;
pub mod paths;
pub mod selection;
pub mod settings;
