//! Transient notification center with timed expiry.
//!
//! Messages appear in enqueue order and disappear either when their one-shot
//! expiry task fires or when the user dismisses them. Dismissal aborts the
//! pending task; removal itself is idempotent, so a timer that slips through
//! anyway is a no-op rather than a double-remove.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::AbortHandle;
use tracing::trace;

use crate::models::{Notification, Severity};

/// Display durations per severity.
#[derive(Debug, Clone)]
pub struct NotifyConfig {
    /// Duration for success/warning/info messages
    pub default_duration: Duration,
    /// Duration for error messages; longer so failures can be read
    pub error_duration: Duration,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            default_duration: Duration::from_millis(4000),
            error_duration: Duration::from_millis(6000),
        }
    }
}

impl NotifyConfig {
    fn duration_for(&self, severity: Severity) -> Duration {
        match severity {
            Severity::Error => self.error_duration,
            _ => self.default_duration,
        }
    }
}

struct State {
    messages: Vec<Notification>,
    /// Pending expiry tasks keyed by message ID
    timers: HashMap<String, AbortHandle>,
}

struct Shared {
    config: NotifyConfig,
    state: Mutex<State>,
    tx: watch::Sender<Vec<Notification>>,
}

impl Shared {
    fn locked(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, state: &State) {
        self.tx.send_replace(state.messages.clone());
    }

    /// Remove a message and its timer entry. No-op when the ID is absent.
    fn remove(&self, id: &str, abort_timer: bool) {
        let mut state = self.locked();
        if let Some(handle) = state.timers.remove(id) {
            if abort_timer {
                handle.abort();
            }
        }
        let before = state.messages.len();
        state.messages.retain(|m| m.id != id);
        if state.messages.len() < before {
            trace!(id, "removed notification");
            self.publish(&state);
        }
    }
}

/// Handle to the shared message set. Cheap to clone; every clone sees the
/// same messages. Starts empty.
///
/// Requires a running Tokio runtime: `enqueue` spawns the expiry task.
#[derive(Clone)]
pub struct NotificationCenter {
    shared: Arc<Shared>,
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::with_config(NotifyConfig::default())
    }

    pub fn with_config(config: NotifyConfig) -> Self {
        let (tx, _) = watch::channel(Vec::new());
        Self {
            shared: Arc::new(Shared {
                config,
                state: Mutex::new(State {
                    messages: Vec::new(),
                    timers: HashMap::new(),
                }),
                tx,
            }),
        }
    }

    /// Append a message with the default duration for its severity and
    /// schedule its expiry. Fire-and-forget.
    pub fn enqueue(&self, text: impl Into<String>, severity: Severity) {
        let duration = self.shared.config.duration_for(severity);
        self.enqueue_with_duration(text, severity, duration);
    }

    pub fn enqueue_with_duration(
        &self,
        text: impl Into<String>,
        severity: Severity,
        duration: Duration,
    ) {
        let message = Notification::new(text.into(), severity, duration);
        let id = message.id.clone();
        trace!(id = %id, severity = severity.label(), "enqueued notification");

        let mut state = self.shared.locked();
        let shared = Arc::clone(&self.shared);
        let expire_id = id.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            shared.remove(&expire_id, false);
        });
        state.timers.insert(id, task.abort_handle());
        state.messages.push(message);
        self.shared.publish(&state);
    }

    /// Remove a message and cancel its pending expiry. No-op for unknown or
    /// already-removed IDs.
    pub fn dismiss(&self, id: &str) {
        self.shared.remove(id, true);
    }

    pub fn success(&self, text: impl Into<String>) {
        self.enqueue(text, Severity::Success);
    }

    pub fn error(&self, text: impl Into<String>) {
        self.enqueue(text, Severity::Error);
    }

    pub fn warning(&self, text: impl Into<String>) {
        self.enqueue(text, Severity::Warning);
    }

    pub fn info(&self, text: impl Into<String>) {
        self.enqueue(text, Severity::Info);
    }

    /// Current messages in display order.
    pub fn snapshot(&self) -> Vec<Notification> {
        self.shared.locked().messages.clone()
    }

    /// Watch the message set; the receiver observes every add and remove.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Notification>> {
        self.shared.tx.subscribe()
    }
}
