use log::{debug, warn};
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::project_file::ProjectFile;
use crate::server::AppState;

/// Writes the project back to disk whenever a new document loads
pub(crate) struct Autosave {
    task: JoinHandle<()>,
}

impl Autosave {
    pub(crate) fn spawn(state: Arc<AppState>, file: ProjectFile) -> Self {
        let mut documents = state.session.host().subscribe();

        let task = tokio::spawn(async move {
            while documents.changed().await.is_ok() {
                let project = state.session.export_project();
                match file.save_async(&project).await {
                    Ok(()) => debug!("Saved project to {}", file.path()),
                    Err(e) => warn!("Autosave failed: {e:#}"),
                }
            }
        });

        Self { task }
    }
}

impl Drop for Autosave {
    fn drop(&mut self) {
        self.task.abort();
    }
}
