use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use clap::Parser;
use log::{info, warn};
use sandpen_config::Config;
use sandpen_core::Project;

use crate::{
    commands::open_project,
    utils::styles::{fmt_dimmed, fmt_success},
};

#[derive(Debug, Clone, Parser)]
pub struct ImportCmd {
    /// Project file to import, as written by export or the editor
    pub file: Utf8PathBuf,
}

impl ImportCmd {
    /// Merges the well-formed fields of `file` into the current project
    pub(crate) fn handle(&self, cfg: Config) -> Result<Config> {
        let text = std::fs::read_to_string(&self.file)
            .with_context(|| format!("Failed to read {}", self.file))?;
        let patch = Project::import(&text)?;
        if patch.is_empty() {
            warn!("{} has no recognised project fields", self.file);
        }

        let (project_file, mut project) = open_project(&cfg)?;
        project.apply(patch);
        project_file.save(&project)?;

        info!(
            "{}",
            fmt_success(&format!(
                "Imported {} into {}",
                fmt_dimmed(self.file.as_str()),
                fmt_dimmed(project_file.path().as_str())
            ))
        );

        Ok(cfg)
    }
}
