use anyhow::Result;
use clap::{Parser, Subcommand};
use log::info;
use sandpen_core::templates::TEMPLATES;

use crate::utils::styles::{fmt_bold, fmt_cyan, fmt_dimmed};

#[derive(Debug, Clone, Parser)]
pub struct TemplateCmd {
    #[command(subcommand)]
    pub command: TemplateCommands,
}

#[derive(Debug, Clone, Subcommand)]
pub enum TemplateCommands {
    /// List the built-in starter templates
    List,
}

impl TemplateCmd {
    pub(crate) fn handle(&self) -> Result<()> {
        match self.command {
            TemplateCommands::List => {
                for template in TEMPLATES {
                    info!(
                        "{} {}",
                        fmt_cyan(template.id),
                        fmt_dimmed(&format!("({})", template.name))
                    );
                }
                info!("");
                info!(
                    "Use one with {}",
                    fmt_bold("sandpen init --template <ID>")
                );
            }
        }
        Ok(())
    }
}
