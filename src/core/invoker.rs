// src/core/invoker.rs

use crate::{
    core::command_builder,
    models::{InvocationRequest, LoaderSettings},
    system::{
        executor::{self, ExecutionError},
        sink::LogSink,
    },
};
use std::sync::Arc;

/// Runs the loader wrapper once for `request`.
///
/// Writes the composed command line to `sink`, then every byte the wrapper
/// prints, and blocks until it exits. No retries, no timeout.
pub fn invoke(
    request: &InvocationRequest,
    settings: &LoaderSettings,
    sink: &Arc<dyn LogSink>,
) -> Result<(), ExecutionError> {
    let args = command_builder::build_args(request, settings);
    let display = command_builder::render_command_line(&settings.python_path, &args);
    sink.append_line(&format!(t!("invoker.log.running"), command = display));

    log::debug!(
        "Loading {} target(s) (recursive: {}) in {:?}",
        request.targets().len(),
        request.recursive(),
        settings.working_directory()
    );
    executor::execute_streaming(
        &settings.python_path,
        &args,
        settings.working_directory(),
        sink,
    )
}
