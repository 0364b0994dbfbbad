//! Live updates for the editor page: new documents and log changes.

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use log::{debug, trace, warn};
use sandpen_core::{Generation, LogEntry, LogEvent, SandboxState};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::watch;

use crate::server::AppState;

/// Messages pushed to the editor page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub(crate) enum ServerEvent {
    /// The sandbox was replaced; `html` is `None` after a teardown
    Document {
        generation: Generation,
        html: Option<String>,
    },
    Log {
        entry: LogEntry,
    },
    Cleared,
    /// Full log, sent on connect and whenever the socket fell behind
    Logs {
        entries: Vec<LogEntry>,
    },
}

impl ServerEvent {
    pub(crate) fn document(state: &SandboxState) -> Self {
        Self::Document {
            generation: state.generation,
            html: state
                .loaded
                .as_ref()
                .map(|loaded| loaded.document.to_string()),
        }
    }
}

impl From<LogEvent> for ServerEvent {
    fn from(event: LogEvent) -> Self {
        match event {
            LogEvent::Appended(entry) => Self::Log { entry },
            LogEvent::Cleared => Self::Cleared,
        }
    }
}

pub(crate) async fn ws_upgrade(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> Response {
    ws.on_upgrade(|socket| handle_ws(socket, state))
}

async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
    let mut documents = state.session.host().subscribe();

    let initial = latest_document(&mut documents);
    if send(&mut socket, &initial).await.is_err() {
        return;
    }

    let (entries, mut logs) = state.session.logs().subscribe_with_entries();
    if send(&mut socket, &ServerEvent::Logs { entries }).await.is_err() {
        return;
    }

    let mut resync = false;
    loop {
        if resync {
            let (entries, fresh) = state.session.logs().subscribe_with_entries();
            logs = fresh;
            resync = false;
            if send(&mut socket, &ServerEvent::Logs { entries }).await.is_err() {
                break;
            }
        }

        let event = tokio::select! {
            changed = documents.changed() => {
                if changed.is_err() {
                    break;
                }
                latest_document(&mut documents)
            }
            received = logs.recv() => match received {
                Ok(event) => event.into(),
                Err(RecvError::Lagged(n)) => {
                    warn!("Editor socket lagged by {n} log events, resending the log");
                    resync = true;
                    continue;
                }
                Err(RecvError::Closed) => break,
            },
            incoming = socket.recv() => match incoming {
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => continue,
                Some(Err(e)) => {
                    debug!("Editor socket error: {e}");
                    break;
                }
            },
        };

        if send(&mut socket, &event).await.is_err() {
            break;
        }
    }

    trace!("Editor socket closed");
}

fn latest_document(documents: &mut watch::Receiver<SandboxState>) -> ServerEvent {
    ServerEvent::document(&documents.borrow_and_update())
}

async fn send(socket: &mut WebSocket, event: &ServerEvent) -> Result<(), axum::Error> {
    match serde_json::to_string(event) {
        Ok(json) => socket.send(Message::Text(json.into())).await,
        Err(e) => {
            warn!("Failed to serialize editor event: {e}");
            Ok(())
        }
    }
}
