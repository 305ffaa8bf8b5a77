// src/system/sink.rs

use std::fmt;
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

/// Which pipe of the child a chunk of output came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStream {
    /// The child's standard output.
    Stdout,
    /// The child's standard error.
    Stderr,
}

/// The log stream the loader writes to: the composed command line first,
/// then the raw output of the wrapper as it arrives.
///
/// Implementations are shared between the reader threads of a child process,
/// so they must synchronize internally.
pub trait LogSink: Send + Sync + fmt::Debug {
    /// Appends a raw chunk of child output, exactly as received.
    fn append(&self, stream: OutputStream, bytes: &[u8]);

    /// Appends a line of text followed by a newline.
    fn append_line(&self, line: &str);
}

/// Writes the whole log to the terminal's standard output.
///
/// Both child streams are merged into the one log, like an editor output panel.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalSink;

impl LogSink for TerminalSink {
    fn append(&self, _stream: OutputStream, bytes: &[u8]) {
        let mut out = io::stdout().lock();
        if let Err(e) = out.write_all(bytes).and_then(|()| out.flush()) {
            log::warn!("Failed to write child output to the terminal: {}", e);
        }
    }

    fn append_line(&self, line: &str) {
        let mut out = io::stdout().lock();
        if let Err(e) = writeln!(out, "{}", line).and_then(|()| out.flush()) {
            log::warn!("Failed to write to the terminal: {}", e);
        }
    }
}

/// Keeps the log in memory. Used by embedders that render the log themselves, and by tests.
#[derive(Debug, Default)]
pub struct BufferSink {
    chunks: Mutex<Vec<(Option<OutputStream>, Vec<u8>)>>,
}

impl BufferSink {
    /// An empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// The complete log, in the order chunks were appended.
    pub fn contents(&self) -> String {
        let chunks = self.chunks.lock().unwrap_or_else(PoisonError::into_inner);
        let bytes: Vec<u8> = chunks.iter().flat_map(|(_, b)| b.iter().copied()).collect();
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Only the bytes received from one child stream, in arrival order.
    pub fn stream_contents(&self, stream: OutputStream) -> String {
        let chunks = self.chunks.lock().unwrap_or_else(PoisonError::into_inner);
        let bytes: Vec<u8> = chunks
            .iter()
            .filter(|(s, _)| *s == Some(stream))
            .flat_map(|(_, b)| b.iter().copied())
            .collect();
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Lines appended through [`LogSink::append_line`].
    pub fn lines(&self) -> Vec<String> {
        let chunks = self.chunks.lock().unwrap_or_else(PoisonError::into_inner);
        chunks
            .iter()
            .filter(|(s, _)| s.is_none())
            .map(|(_, b)| String::from_utf8_lossy(b).trim_end_matches('\n').to_string())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }
}

impl LogSink for BufferSink {
    fn append(&self, stream: OutputStream, bytes: &[u8]) {
        self.chunks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((Some(stream), bytes.to_vec()));
    }

    fn append_line(&self, line: &str) {
        let mut bytes = line.as_bytes().to_vec();
        bytes.push(b'\n');
        self.chunks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((None, bytes));
    }
}
