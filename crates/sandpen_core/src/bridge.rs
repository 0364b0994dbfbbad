//! Host-side listener for messages coming out of the sandbox.

use chrono::Local;
use log::{debug, trace};
use serde_json::Value;

use crate::log_store::{LogEntry, LogStore};
use crate::protocol::decode;
use crate::sandbox::{Generation, SandboxHost};

/// Validates, decodes and records inbound sandbox messages.
///
/// The channel tag is the only authentication the boundary has. On top of
/// it every message carries the generation of the context that sent it, and
/// anything from a replaced context is dropped. Nothing here ever fails:
/// invalid input is logged and ignored.
#[derive(Clone)]
pub struct MessageBridge {
    host: SandboxHost,
    store: LogStore,
}

impl MessageBridge {
    pub fn new(host: SandboxHost, store: LogStore) -> Self {
        Self { host, store }
    }

    /// Handle one inbound message from the context at `generation`.
    ///
    /// Returns the appended entry, or `None` when the message was ignored.
    pub fn receive(&self, generation: Generation, data: &Value) -> Option<LogEntry> {
        let message = match decode(data) {
            Ok(message) => message,
            Err(rejection) => {
                trace!("Ignoring inbound message: {rejection}");
                return None;
            }
        };

        if !self.host.is_current(generation) {
            debug!(
                "Dropping {} message from stale sandbox generation {generation} (current {})",
                message.kind,
                self.host.generation()
            );
            return None;
        }

        let entry = LogEntry::new(message.kind, &message.args, Local::now(), generation);
        self.store.append(entry.clone());
        Some(entry)
    }

    pub fn store(&self) -> &LogStore {
        &self.store
    }
}
