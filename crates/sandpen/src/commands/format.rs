use anyhow::Result;
use clap::Parser;
use log::info;
use sandpen_config::Config;
use sandpen_core::FragmentKind;

use crate::{
    commands::open_project,
    utils::styles::{fmt_bold, fmt_dimmed, fmt_success},
};

#[derive(Debug, Clone, Parser)]
pub struct FormatCmd {
    /// Fragment to format; only `script` is supported
    #[arg(default_value = "script")]
    pub kind: FragmentKind,

    /// Print the formatted fragment instead of saving it
    #[arg(long)]
    pub dry_run: bool,
}

impl FormatCmd {
    pub(crate) fn handle(&self, cfg: Config) -> Result<Config> {
        let (project_file, mut project) = open_project(&cfg)?;
        let mut fragments = project.fragments();

        let formatted = sandpen_format::format_fragment(self.kind, fragments.get(self.kind))?;

        if self.dry_run {
            print!("{formatted}");
            return Ok(cfg);
        }

        if formatted == fragments.get(self.kind) {
            info!("{} fragment already formatted", fmt_bold(self.kind.as_str()));
            return Ok(cfg);
        }

        fragments.set(self.kind, formatted);
        project.html = fragments.markup;
        project.css = fragments.style;
        project.js = fragments.script;
        project_file.save(&project)?;

        info!(
            "{}",
            fmt_success(&format!(
                "Formatted {} fragment in {}",
                fmt_bold(self.kind.as_str()),
                fmt_dimmed(project_file.path().as_str())
            ))
        );

        Ok(cfg)
    }
}
