//! Transient notification models.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Notification severity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Severity {
    /// A mutation completed
    Success,
    /// A request failed; shown longer so the user can read it
    Error,
    Warning,
    Info,
}

impl Severity {
    /// Short label for display and log output.
    pub fn label(self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

/// An ephemeral user-facing message. Lives until its timer elapses or the
/// user dismisses it, whichever comes first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notification {
    /// Unique message ID
    pub id: String,
    /// Display text
    pub text: String,
    /// Severity, drives styling and default duration
    pub severity: Severity,
    /// How long the message stays up
    pub duration: Duration,
}

impl Notification {
    /// Create a new notification with a fresh ID.
    pub fn new(text: String, severity: Severity, duration: Duration) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            text,
            severity,
            duration,
        }
    }
}
