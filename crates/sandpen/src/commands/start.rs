use anyhow::Result;
use clap::Parser;
use log::info;
use sandpen_config::Config;
use std::sync::Arc;

use crate::{
    commands::{open_project, open_session},
    generator::GeminiGenerator,
    server::{AppState, SandpenServer},
};

#[derive(Debug, Clone, Parser)]
pub struct StartCmd {
    /// Port to listen on, defaults to the configured port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Host address to bind to (use 0.0.0.0 for external access)
    #[arg(long)]
    pub host: Option<String>,

    /// Open the editor in the default browser
    #[arg(long)]
    pub open: bool,

    /// Do not write changes back to the project file
    #[arg(long)]
    pub no_save: bool,
}

impl StartCmd {
    pub(crate) async fn handle(&self, cfg: Config) -> Result<Config> {
        let (project_file, project) = open_project(&cfg)?;
        let session = open_session(&cfg, &project);

        let mut state = AppState::new(session);
        match GeminiGenerator::from_config(&cfg.generator) {
            Ok(generator) => {
                info!("Generating with {}", generator.model());
                state = state.with_generator(Arc::new(generator));
            }
            Err(e) => state = state.with_generator_hint(e.to_string()),
        }
        if !self.no_save {
            state = state.with_project_file(project_file);
        }

        let host = self.host.clone().unwrap_or_else(|| cfg.server.host.clone());
        let port = self.port.unwrap_or(cfg.server.port);

        SandpenServer::new(state, &host, port)
            .serve(self.open)
            .await?;

        info!("Shutting down...");

        Ok(cfg)
    }
}
