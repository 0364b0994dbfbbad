//! # sandpen core
//!
//! The live-preview pipeline behind sandpen: three editable fragments (markup,
//! style, script) are debounced, assembled into one self-contained document and
//! loaded into a sandboxed iframe. An instrumentation script inside that
//! document forwards console diagnostics to the host over a single message
//! channel, where they are decoded, gated and kept in an ordered log.
//!
//! ## Overview
//!
//! - [`debounce::Debouncer`]: coalesces rapid edits into settled values
//! - [`assemble::assemble`]: builds the executable document from a snapshot
//! - [`instrumentation::PAYLOAD`]: the console interceptor injected into every document
//! - [`sandbox::SandboxHost`]: owns the current document and its generation
//! - [`bridge::MessageBridge`]: validates and decodes inbound sandbox messages
//! - [`log_store::LogStore`]: append-only diagnostic log with rendering rules
//! - [`session::Session`]: wires all of the above together for one editor
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sandpen_core::{FragmentKind, Fragments, Libraries, Session};
//! use std::time::Duration;
//!
//! # async fn example() {
//! let session = Session::new(
//!     Fragments::default(),
//!     Libraries::default(),
//!     Duration::from_millis(500),
//! );
//!
//! session.on_change(FragmentKind::Script, "console.log('hi')".to_string());
//!
//! // once the edit settles a new document generation is loaded
//! let mut documents = session.host().subscribe();
//! documents.changed().await.ok();
//! # }
//! ```
//!
//! ## Wire format
//!
//! Every message posted by the instrumentation payload has the shape
//!
//! ```json
//! { "source": "iframe-console", "type": "log", "message": [1, "two", {"three": 3}] }
//! ```
//!
//! Error arguments are sent as `{"__isError": true, "message": "...", "stack": "..."}`.

pub mod assemble;
pub mod bridge;
pub mod debounce;
pub mod error;
pub mod fragment;
pub mod generate;
pub mod instrumentation;
pub mod log_store;
pub mod project;
pub mod protocol;
pub mod sandbox;
pub mod session;
pub mod snapshot;
pub mod templates;

#[cfg(test)]
mod tests;

pub use assemble::{AssembledDocument, assemble};
pub use bridge::MessageBridge;
pub use debounce::Debouncer;
pub use error::{GenerateError, ImportError};
pub use fragment::{FragmentKind, Fragments};
pub use generate::CodeGenerator;
pub use log_store::{LogEntry, LogEvent, LogStore};
pub use project::{Appearance, Layout, Project, ProjectPatch, Theme};
pub use protocol::{DiagnosticArg, ErrorShape, LogKind, SOURCE_TAG};
pub use sandbox::{Generation, LoadedDocument, SandboxHost, SandboxState};
pub use session::Session;
pub use snapshot::{Libraries, LibraryKind, SettledSnapshot};

/// Quiet period used when nothing else is configured
pub const DEFAULT_DEBOUNCE: std::time::Duration = std::time::Duration::from_millis(500);
