// src/system/executor.rs

use crate::system::sink::{LogSink, OutputStream};
use std::ffi::OsString;
use std::io::{ErrorKind, Read};
use std::path::Path;
use std::process::{Command as StdCommand, Stdio};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use thiserror::Error;

const READ_CHUNK_SIZE: usize = 8 * 1024;

/// Why a wrapper run did not succeed.
#[derive(Error, Debug)]
pub enum ExecutionError {
    /// The interpreter could not be started at all.
    #[error("'{program}' could not be started: {source}")]
    Spawn {
        /// The interpreter as configured.
        program: String,
        #[source]
        source: std::io::Error,
    },
    /// The wrapper ran and returned a non-zero code.
    #[error("Wrapper exited with code {code}")]
    NonZeroExit {
        /// The wrapper's exit code.
        code: i32,
    },
    /// The wrapper was killed before it could exit.
    #[error("Wrapper was terminated by a signal before exiting.")]
    Terminated,
    /// Waiting on the started child failed.
    #[error("Failed while waiting for the wrapper to finish: {0}")]
    Wait(#[source] std::io::Error),
}

impl ExecutionError {
    /// The exit code the wrapper returned, if it ran and failed.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::NonZeroExit { code } => Some(*code),
            _ => None,
        }
    }
}

/// Runs `program` with `args`, streaming its stdout and stderr to `sink` as
/// the bytes arrive, and blocks until it terminates.
///
/// `cwd` of `None` inherits the current directory. There is no timeout and no
/// way to cancel the child once it has started.
///
/// Every byte of output has been handed to the sink by the time this returns.
pub fn execute_streaming(
    program: &str,
    args: &[OsString],
    cwd: Option<&Path>,
    sink: &Arc<dyn LogSink>,
) -> Result<(), ExecutionError> {
    let mut command = StdCommand::new(program);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    if let Some(dir) = cwd {
        command.current_dir(dunce::simplified(dir));
    }

    let mut child = command.spawn().map_err(|source| ExecutionError::Spawn {
        program: program.to_string(),
        source,
    })?;
    log::debug!("Spawned '{}' (PID: {})", program, child.id());

    let mut readers = Vec::with_capacity(2);
    if let Some(stdout) = child.stdout.take() {
        readers.push(spawn_forwarder(stdout, OutputStream::Stdout, sink));
    }
    if let Some(stderr) = child.stderr.take() {
        readers.push(spawn_forwarder(stderr, OutputStream::Stderr, sink));
    }

    let status = child.wait();

    // The pipes close when the child exits, so the readers finish right after.
    for reader in readers {
        if reader.join().is_err() {
            log::warn!("An output reader thread panicked; some output may be missing.");
        }
    }

    let status = status.map_err(ExecutionError::Wait)?;
    log::debug!("'{}' finished with status: {}", program, status);

    match status.code() {
        Some(0) => Ok(()),
        Some(code) => Err(ExecutionError::NonZeroExit { code }),
        None => Err(ExecutionError::Terminated),
    }
}

fn spawn_forwarder<R>(reader: R, stream: OutputStream, sink: &Arc<dyn LogSink>) -> JoinHandle<()>
where
    R: Read + Send + 'static,
{
    let sink = Arc::clone(sink);
    thread::spawn(move || forward_stream(reader, stream, sink.as_ref()))
}

/// Copies `reader` to the sink chunk by chunk, without waiting for line ends.
fn forward_stream<R: Read>(mut reader: R, stream: OutputStream, sink: &dyn LogSink) {
    let mut buf = [0u8; READ_CHUNK_SIZE];
    loop {
        match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => {
                if let Some(chunk) = buf.get(..n) {
                    sink.append(stream, chunk);
                }
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                log::warn!("Stopped reading child {:?}: {}", stream, e);
                break;
            }
        }
    }
}
