//! User-facing feedback from nodes that swallow their own failures.
//!
//! Nodes such as the file input and the export sink never return an error.
//! They degrade to an empty result and hand a [`Feedback`] to whatever
//! [`Notifier`] the caller supplied: a dialog in an editor, the log in the
//! CLI, or a plain `Vec` in tests.

use std::fmt;

/// Severity of a [`Feedback`] message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedbackLevel {
    /// Degraded result, processing continued.
    Warning,
    /// Operation failed, result is empty or incomplete.
    Error,
}

impl fmt::Display for FeedbackLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FeedbackLevel::Warning => "warning",
            FeedbackLevel::Error => "error",
        })
    }
}

/// A message raised by a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    /// Display name of the node that raised it.
    pub node: String,
    /// Severity.
    pub level: FeedbackLevel,
    /// Human-readable text.
    pub message: String,
}

impl Feedback {
    /// Error-level feedback from `node`.
    pub fn error(node: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            node: node.into(),
            level: FeedbackLevel::Error,
            message: message.into(),
        }
    }

    /// Warning-level feedback from `node`.
    pub fn warning(node: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            node: node.into(),
            level: FeedbackLevel::Warning,
            message: message.into(),
        }
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.level, self.node, self.message)
    }
}

/// Receiver of node feedback.
pub trait Notifier {
    /// Delivers one message.
    fn notify(&mut self, feedback: Feedback);
}

/// Forwards feedback to `tracing` at the matching level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, feedback: Feedback) {
        match feedback.level {
            FeedbackLevel::Warning => {
                tracing::warn!(node = %feedback.node, "{}", feedback.message);
            }
            FeedbackLevel::Error => {
                tracing::error!(node = %feedback.node, "{}", feedback.message);
            }
        }
    }
}

/// Collects feedback in order.
impl Notifier for Vec<Feedback> {
    fn notify(&mut self, feedback: Feedback) {
        self.push(feedback);
    }
}
