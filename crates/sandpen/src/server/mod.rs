//! HTTP host for the editor page, the preview and the message bridge.

mod autosave;
mod error;
pub(crate) mod routes;
pub(crate) mod ws;

use anyhow::Result;
use log::{info, warn};
use sandpen_core::{CodeGenerator, Session};
use std::sync::Arc;

use crate::project_file::ProjectFile;
use crate::server::autosave::Autosave;
use crate::utils::styles::{fmt_bold, fmt_cyan, fmt_dimmed};

/// Everything a request handler can reach
pub struct AppState {
    pub session: Session,
    /// `None` when no API key is configured
    pub generator: Option<Arc<dyn CodeGenerator>>,
    /// Why generation is unavailable, shown instead of calling a generator
    pub generator_hint: String,
    /// Where the project is persisted; `None` disables saving
    pub project_file: Option<ProjectFile>,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            generator: None,
            generator_hint: "no generator configured".into(),
            project_file: None,
            http: reqwest::Client::new(),
        }
    }

    #[must_use]
    pub fn with_generator(mut self, generator: Arc<dyn CodeGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    #[must_use]
    pub fn with_generator_hint(mut self, hint: impl Into<String>) -> Self {
        self.generator_hint = hint.into();
        self
    }

    #[must_use]
    pub fn with_project_file(mut self, file: ProjectFile) -> Self {
        self.project_file = Some(file);
        self
    }

    /// Save the project now, for changes that do not load a new document
    pub(crate) async fn persist(&self) {
        if let Some(file) = &self.project_file
            && let Err(e) = file.save_async(&self.session.export_project()).await
        {
            warn!("Failed to save project: {e:#}");
        }
    }
}

pub struct SandpenServer {
    state: Arc<AppState>,
    host: String,
    port: u16,
}

impl SandpenServer {
    pub fn new(state: AppState, host: &str, port: u16) -> Self {
        Self {
            state: Arc::new(state),
            host: host.to_string(),
            port,
        }
    }

    /// Serve until ctrl-c
    ///
    /// # Errors
    ///
    /// Fails if the address cannot be bound
    pub async fn serve(self, open_browser: bool) -> Result<()> {
        let _autosave = self
            .state
            .project_file
            .clone()
            .map(|file| Autosave::spawn(self.state.clone(), file));

        let router = routes::router(self.state.clone());
        let tcp_listener =
            tokio::net::TcpListener::bind(format!("{}:{}", self.host, self.port)).await?;

        let url = format!("http://{}:{}", self.host, self.port);
        self.log_banner(&url);

        if open_browser && let Err(e) = open::that(&url) {
            warn!("Failed to open browser: {e}");
            info!("Open {url} in your browser");
        }

        axum::serve(tcp_listener, router)
            .with_graceful_shutdown(async {
                tokio::signal::ctrl_c()
                    .await
                    .expect("failed graceful shutdown");
            })
            .await?;

        Ok(())
    }

    fn log_banner(&self, url: &str) {
        info!("{}", fmt_cyan(&fmt_bold("sandpen")));
        info!("Editor at {}", fmt_bold(url));
        info!("Preview at {}", fmt_bold(&format!("{url}/preview")));
        if let Some(file) = &self.state.project_file {
            info!("Saving to {}", fmt_dimmed(file.path().as_str()));
        }
        if self.state.generator.is_none() {
            info!(
                "{}",
                fmt_dimmed(&format!("Generation disabled: {}", self.state.generator_hint))
            );
        }
        info!("");
    }
}
