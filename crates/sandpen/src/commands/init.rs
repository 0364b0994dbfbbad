use anyhow::Result;
use camino::Utf8PathBuf;
use clap::Parser;
use log::info;
use sandpen_config::Config;
use sandpen_core::{Appearance, Libraries, Project, templates};

use crate::{
    commands::USER_CANCELLED,
    project_file::ProjectFile,
    utils::styles::{fmt_bold, fmt_dimmed, fmt_success},
};

#[derive(Debug, Clone, Parser)]
pub struct InitCmd {
    /// Use default values and skip the interactive prompts
    #[arg(long, short)]
    pub yes: bool,

    /// Starter template for the project, see `sandpen template list`
    #[arg(long, short)]
    pub template: Option<String>,
}

impl InitCmd {
    pub(crate) fn handle(&self, path: &Utf8PathBuf) -> Result<Config> {
        let template = match &self.template {
            Some(id) => Some(templates::find(id).ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown template \"{id}\", run {} to see the available ones",
                    fmt_bold("sandpen template list")
                )
            })?),
            None => None,
        };

        let mut cfg = if Config::load(path).is_ok() {
            let re_init = if self.yes {
                true
            } else {
                inquire::Confirm::new(&format!(
                    "A sandpen config already exists at {}, overwrite it?",
                    fmt_dimmed(path.as_ref())
                ))
                .with_default(true)
                .prompt()?
            };
            if !re_init {
                anyhow::bail!(USER_CANCELLED)
            }
            Config::default().with_path(path)
        } else {
            Config::default().with_path(path)
        };

        let parent_name = std::env::current_dir()
            .ok()
            .and_then(|p| p.file_name().map(|f| f.to_string_lossy().to_string()))
            .unwrap_or("sandpen".into());

        let template = if self.yes {
            cfg.name = parent_name;
            template.unwrap_or_else(templates::starter)
        } else {
            cfg.name = inquire::Text::new("Project name:")
                .with_validator(inquire::required!("name is required"))
                .with_default(&parent_name)
                .prompt()?;
            cfg.description =
                inquire::Text::new(&format!("Description {}:", fmt_dimmed("(optional)")))
                    .prompt_skippable()?
                    .filter(|d| !d.trim().is_empty());

            match template {
                Some(template) => template,
                None => {
                    let names: Vec<&str> = templates::TEMPLATES.iter().map(|t| t.name).collect();
                    let picked = inquire::Select::new("Start from template:", names).prompt()?;
                    templates::TEMPLATES
                        .iter()
                        .find(|t| t.name == picked)
                        .unwrap_or_else(templates::starter)
                }
            }
        };

        cfg.save()?;

        let project_file = ProjectFile::new(cfg.project_path());
        let write_project = if project_file.exists() && !self.yes {
            inquire::Confirm::new(&format!(
                "A project already exists at {}, replace it with the {} template?",
                fmt_dimmed(project_file.path().as_str()),
                fmt_bold(template.name)
            ))
            .with_default(false)
            .prompt()?
        } else {
            true
        };
        if write_project {
            project_file.save(&Project::new(
                &template.fragments(),
                &Libraries::default(),
                Appearance::default(),
            ))?;
        }

        info!(
            "{}",
            fmt_success(&format!(
                "{name} configuration created: {path}",
                name = fmt_bold("sandpen"),
                path = fmt_dimmed(cfg.path().as_str()),
            ))
        );
        if write_project {
            info!(
                "{}",
                fmt_success(&format!(
                    "Project created from the {} template: {}",
                    fmt_bold(template.name),
                    fmt_dimmed(project_file.path().as_str()),
                ))
            );
        }
        info!("");
        info!("Run {} to open the editor", fmt_bold("sandpen start --open"));

        Ok(cfg)
    }
}
