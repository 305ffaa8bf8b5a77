// src/system/notifier.rs

use colored::*;
use std::fmt;
use std::sync::{Mutex, PoisonError};

/// Transient, user-visible messages: the progress indicator and the single
/// success, warning or failure message of each invocation.
pub trait Notifier: Send + Sync + fmt::Debug {
    /// Shows that a load is in progress.
    fn progress(&self, title: &str);
    /// A successful outcome.
    fn info(&self, message: &str);
    /// Something the user should know about that is not a failure.
    fn warn(&self, message: &str);
    /// A failed load.
    fn error(&self, message: &str);
}

/// Prints notifications to the terminal. Warnings and failures go to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn progress(&self, title: &str) {
        println!("{}", title.dimmed());
    }

    fn info(&self, message: &str) {
        println!("{} {}", "✔".green(), message.green());
    }

    fn warn(&self, message: &str) {
        eprintln!("{}: {}", t!("notify.label.warning").yellow().bold(), message);
    }

    fn error(&self, message: &str) {
        eprintln!("\n{}: {}", t!("notify.label.error").red().bold(), message);
    }
}

/// A notification captured by [`RecordingNotifier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// [`Notifier::progress`]
    Progress(String),
    /// [`Notifier::info`]
    Info(String),
    /// [`Notifier::warn`]
    Warning(String),
    /// [`Notifier::error`]
    Error(String),
}

/// Records every notification instead of showing it.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notifications: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    /// An empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything recorded so far, in order.
    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The messages of the success notifications.
    pub fn infos(&self) -> Vec<String> {
        self.collect(|n| match n {
            Notification::Info(m) => Some(m.clone()),
            _ => None,
        })
    }

    /// The messages of the warnings.
    pub fn warnings(&self) -> Vec<String> {
        self.collect(|n| match n {
            Notification::Warning(m) => Some(m.clone()),
            _ => None,
        })
    }

    /// The messages of the failure notifications.
    pub fn errors(&self) -> Vec<String> {
        self.collect(|n| match n {
            Notification::Error(m) => Some(m.clone()),
            _ => None,
        })
    }

    fn collect(&self, pick: impl Fn(&Notification) -> Option<String>) -> Vec<String> {
        self.notifications
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter_map(pick)
            .collect()
    }

    fn push(&self, notification: Notification) {
        self.notifications
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }
}

impl Notifier for RecordingNotifier {
    fn progress(&self, title: &str) {
        self.push(Notification::Progress(title.to_string()));
    }

    fn info(&self, message: &str) {
        self.push(Notification::Info(message.to_string()));
    }

    fn warn(&self, message: &str) {
        self.push(Notification::Warning(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.push(Notification::Error(message.to_string()));
    }
}
