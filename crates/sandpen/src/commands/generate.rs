use anyhow::Result;
use clap::Parser;
use log::info;
use sandpen_config::Config;
use sandpen_core::{FragmentKind, Fragments};

use crate::{
    commands::{open_project, open_session},
    generator::GeminiGenerator,
    utils::{
        spinner::Spinner,
        styles::{fmt_bold, fmt_cyan, fmt_dimmed, fmt_success},
    },
};

#[derive(Debug, Clone, Parser)]
pub struct GenerateCmd {
    /// Description of the UI to create
    pub prompt: String,
}

impl GenerateCmd {
    /// Replaces all three fragments of the project, libraries are kept
    pub(crate) async fn handle(&self, cfg: Config) -> Result<Config> {
        let generator = GeminiGenerator::from_config(&cfg.generator)?;
        let (project_file, project) = open_project(&cfg)?;
        let session = open_session(&cfg, &project);

        let sp = Spinner::new(format!("Generating with {}", fmt_cyan(generator.model())));
        match session.generate(&generator, &self.prompt).await {
            Ok(fragments) => sp.stop_success(format!(
                "Generated {} lines of code",
                fmt_bold(&line_count(&fragments).to_string())
            )),
            Err(e) => {
                sp.stop_error("Generation failed");
                return Err(e.into());
            }
        }

        project_file.save(&session.export_project())?;
        info!(
            "{}",
            fmt_success(&format!(
                "Project updated: {}",
                fmt_dimmed(project_file.path().as_str())
            ))
        );

        Ok(cfg)
    }
}

fn line_count(fragments: &Fragments) -> usize {
    FragmentKind::ALL
        .iter()
        .map(|kind| fragments.get(*kind).lines().count())
        .sum()
}
