//! Append-only log of decoded sandbox diagnostics.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::{Arc, RwLock};
use tokio::sync::broadcast;

use crate::protocol::{DiagnosticArg, LogKind};
use crate::sandbox::Generation;

/// Rendered in place of a value the sandbox could not transmit
pub const CIRCULAR_PLACEHOLDER: &str = "[Circular]";

const EVENT_CAPACITY: usize = 256;

/// A diagnostic as it is shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub kind: LogKind,
    /// Local receipt time, `HH:MM:SS`
    pub timestamp: String,
    pub args: Vec<String>,
    pub generation: Generation,
}

impl LogEntry {
    pub fn new(
        kind: LogKind,
        args: &[DiagnosticArg],
        received_at: DateTime<Local>,
        generation: Generation,
    ) -> Self {
        Self {
            kind,
            timestamp: received_at.format("%H:%M:%S").to_string(),
            args: args.iter().map(render_arg).collect(),
            generation,
        }
    }

    /// Arguments joined the way a console prints them
    pub fn text(&self) -> String {
        self.args.join(" ")
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.timestamp, self.kind, self.text())
    }
}

/// Render one argument for display.
///
/// Structured values become two-space indented JSON, errors show their
/// stack when there is one and their message otherwise, and values the
/// sandbox could not send show [`CIRCULAR_PLACEHOLDER`]. Errors and markers
/// nested inside structured values are shown the same way.
pub fn render_arg(arg: &DiagnosticArg) -> String {
    match arg {
        DiagnosticArg::Null => "null".to_string(),
        DiagnosticArg::Bool(b) => b.to_string(),
        DiagnosticArg::Number(n) => n.to_string(),
        DiagnosticArg::Text(s) => s.clone(),
        DiagnosticArg::Structured(value) => serde_json::to_string_pretty(&readable(value))
            .unwrap_or_else(|_| CIRCULAR_PLACEHOLDER.to_string()),
        DiagnosticArg::Error(err) => match &err.stack {
            Some(stack) if !stack.is_empty() => stack.clone(),
            _ => err.message.clone(),
        },
        DiagnosticArg::Unserializable => CIRCULAR_PLACEHOLDER.to_string(),
    }
}

/// Replace nested error shapes and markers by their rendered text
fn readable(value: &Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.iter().map(readable).collect()),
        Value::Object(obj) => match DiagnosticArg::from_wire(value) {
            arg @ (DiagnosticArg::Error(_) | DiagnosticArg::Unserializable) => {
                Value::String(render_arg(&arg))
            }
            _ => Value::Object(
                obj.iter()
                    .map(|(key, item)| (key.clone(), readable(item)))
                    .collect(),
            ),
        },
        other => other.clone(),
    }
}

/// Change notification for log subscribers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "entry", rename_all = "lowercase")]
pub enum LogEvent {
    Appended(LogEntry),
    Cleared,
}

/// Time-ordered diagnostic log.
///
/// Unbounded; entries only go away through [`LogStore::clear`]. Cloning gives
/// another handle to the same log.
#[derive(Debug, Clone)]
pub struct LogStore {
    entries: Arc<RwLock<Vec<LogEntry>>>,
    events: broadcast::Sender<LogEvent>,
}

impl LogStore {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            entries: Arc::new(RwLock::new(Vec::new())),
            events,
        }
    }

    /// Append an entry at the end of the log
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned (i.e., a thread panicked while holding the lock)
    pub fn append(&self, entry: LogEntry) {
        let mut entries = self.entries.write().expect("LogStore lock poisoned");
        entries.push(entry.clone());
        // notify under the lock so subscribers see the same order as the log
        let _ = self.events.send(LogEvent::Appended(entry));
    }

    /// Remove every entry
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned (i.e., a thread panicked while holding the lock)
    pub fn clear(&self) {
        let mut entries = self.entries.write().expect("LogStore lock poisoned");
        entries.clear();
        let _ = self.events.send(LogEvent::Cleared);
    }

    /// Copy of every entry in arrival order
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned (i.e., a thread panicked while holding the lock)
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.read().expect("LogStore lock poisoned").clone()
    }

    /// # Panics
    ///
    /// Panics if the internal lock is poisoned (i.e., a thread panicked while holding the lock)
    pub fn len(&self) -> usize {
        self.entries.read().expect("LogStore lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn subscribe(&self) -> broadcast::Receiver<LogEvent> {
        self.events.subscribe()
    }

    /// Copy of the log plus a receiver for every change after it; no entry
    /// is in both
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned (i.e., a thread panicked while holding the lock)
    pub fn subscribe_with_entries(&self) -> (Vec<LogEntry>, broadcast::Receiver<LogEvent>) {
        let entries = self.entries.read().expect("LogStore lock poisoned");
        (entries.clone(), self.events.subscribe())
    }
}

impl Default for LogStore {
    fn default() -> Self {
        Self::new()
    }
}
