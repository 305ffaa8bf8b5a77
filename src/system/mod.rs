//! # System Interaction Layer
//!
//! This module is the boundary between the loader logic and everything outside
//! the process: the child interpreter and the host that shows its output.
//!
//! ## Modules
//!
//! - **`executor`**: spawns an external program, streams both of its pipes to a
//!   [`LogSink`] as the bytes arrive, and maps the termination status to a typed error.
//! - **`sink`**: the log stream capability and its terminal and in-memory implementations.
//! - **`notifier`**: transient user messages (progress, success, warning, failure).

pub mod executor;
pub mod notifier;
pub mod sink;

use notifier::{Notifier, TerminalNotifier};
use sink::{LogSink, TerminalSink};
use std::sync::Arc;

/// The capabilities a front-end hands to the command handlers.
///
/// The sink lives as long as the host session; every invocation writes to it.
#[derive(Debug, Clone)]
pub struct HostContext {
    pub sink: Arc<dyn LogSink>,
    pub notifier: Arc<dyn Notifier>,
}

impl HostContext {
    pub fn new(sink: Arc<dyn LogSink>, notifier: Arc<dyn Notifier>) -> Self {
        Self { sink, notifier }
    }

    /// Log and notifications both go to the terminal.
    pub fn terminal() -> Self {
        Self::new(Arc::new(TerminalSink), Arc::new(TerminalNotifier))
    }
}
