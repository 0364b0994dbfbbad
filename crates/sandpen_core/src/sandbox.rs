//! Ownership of the sandboxed execution context.
//!
//! The host keeps exactly one loaded document. Loading a new one replaces
//! the previous context wholesale under a new [`Generation`]; there is no
//! incremental patching. Messages are attributed to the generation of the
//! context that sent them, so anything still in flight from a replaced
//! context can be recognised and dropped.

use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;

use crate::assemble::{AssembledDocument, assemble};
use crate::snapshot::SettledSnapshot;

/// `sandbox` attribute applied to the preview iframe: scripts only, no
/// same-origin, navigation, popups or forms
pub const IFRAME_SANDBOX: &str = "allow-scripts";

/// Header applied when the document is opened on its own
pub const CONTENT_SECURITY_POLICY: &str = "sandbox allow-scripts";

/// Monotonic counter identifying one incarnation of the sandbox
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Generation(pub u64);

impl Generation {
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A document currently (or formerly) owned by the sandbox
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    pub generation: Generation,
    pub snapshot: Arc<SettledSnapshot>,
    pub document: AssembledDocument,
}

/// What the host currently runs; `loaded` is `None` after a teardown
#[derive(Debug, Clone, Default)]
pub struct SandboxState {
    pub generation: Generation,
    pub loaded: Option<LoadedDocument>,
}

/// Owner of the single isolated context and its document
#[derive(Clone)]
pub struct SandboxHost {
    state: Arc<watch::Sender<SandboxState>>,
}

impl SandboxHost {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(SandboxState::default());
        Self {
            state: Arc::new(tx),
        }
    }

    /// Assemble `snapshot` and replace the running context with it.
    ///
    /// A document byte-identical to the loaded one keeps the current context
    /// and generation.
    pub fn load(&self, snapshot: SettledSnapshot) -> Generation {
        let document = assemble(&snapshot);
        let snapshot = Arc::new(snapshot);
        let mut generation = Generation::default();

        self.state.send_if_modified(|state| {
            if let Some(current) = &state.loaded
                && current.document == document
            {
                generation = state.generation;
                return false;
            }

            state.generation = state.generation.next();
            generation = state.generation;
            state.loaded = Some(LoadedDocument {
                generation,
                snapshot: snapshot.clone(),
                document: document.clone(),
            });
            true
        });

        debug!("Sandbox at generation {generation} ({} bytes)", document.len());
        generation
    }

    /// Discard the running context; every in-flight message becomes stale
    pub fn teardown(&self) {
        self.state.send_modify(|state| {
            state.generation = state.generation.next();
            state.loaded = None;
        });
        debug!("Sandbox torn down");
    }

    pub fn generation(&self) -> Generation {
        self.state.borrow().generation
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        let state = self.state.borrow();
        state.loaded.is_some() && state.generation == generation
    }

    pub fn current(&self) -> Option<LoadedDocument> {
        self.state.borrow().loaded.clone()
    }

    /// The document as it would open in a separate browsing surface.
    ///
    /// Byte-for-byte the document the sandbox is running.
    pub fn standalone_document(&self) -> Option<AssembledDocument> {
        self.state
            .borrow()
            .loaded
            .as_ref()
            .map(|loaded| loaded.document.clone())
    }

    /// Receiver notified whenever the context is replaced or torn down
    pub fn subscribe(&self) -> watch::Receiver<SandboxState> {
        self.state.subscribe()
    }
}

impl Default for SandboxHost {
    fn default() -> Self {
        Self::new()
    }
}
