use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use clap::Parser;
use log::info;
use sandpen_config::Config;
use sandpen_core::{SettledSnapshot, assemble};

use crate::{
    commands::open_project,
    utils::styles::{fmt_dimmed, fmt_success},
};

#[derive(Debug, Clone, Parser)]
pub struct RenderCmd {
    /// File to write the document to, prints to stdout when omitted
    #[arg(long, short)]
    pub output: Option<Utf8PathBuf>,
}

impl RenderCmd {
    /// Writes exactly the document the preview would run
    pub(crate) fn handle(&self, cfg: Config) -> Result<Config> {
        let (_, project) = open_project(&cfg)?;
        let document = assemble(&SettledSnapshot::new(
            project.fragments(),
            project.libraries(),
        ));

        match &self.output {
            Some(path) => {
                std::fs::write(path, document.as_str())
                    .with_context(|| format!("Failed to write {path}"))?;
                info!(
                    "{}",
                    fmt_success(&format!("Document written to {}", fmt_dimmed(path.as_str())))
                );
            }
            None => println!("{document}"),
        }

        Ok(cfg)
    }
}
