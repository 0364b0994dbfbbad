use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use clap::Parser;
use log::info;
use sandpen_config::Config;
use sandpen_core::FragmentKind;

use crate::{
    commands::open_project,
    utils::styles::{fmt_bold, fmt_dimmed, fmt_success},
};

#[derive(Debug, Clone, Parser)]
pub struct ExportCmd {
    /// Directory to write `index.html`, `style.css` and `script.js` into
    pub dir: Utf8PathBuf,

    /// Also write the project file (fragments, libraries and appearance) as `project.json`
    #[arg(long)]
    pub project: bool,
}

impl ExportCmd {
    /// Writes the raw fragments, not the assembled document
    pub(crate) fn handle(&self, cfg: Config) -> Result<Config> {
        let (_, project) = open_project(&cfg)?;
        let fragments = project.fragments();

        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create {}", self.dir))?;

        for kind in FragmentKind::ALL {
            let path = self.dir.join(kind.file_name());
            std::fs::write(&path, fragments.get(kind))
                .with_context(|| format!("Failed to write {path}"))?;
        }
        if self.project {
            let path = self.dir.join("project.json");
            std::fs::write(&path, project.to_json()?)
                .with_context(|| format!("Failed to write {path}"))?;
        }

        info!(
            "{}",
            fmt_success(&format!(
                "Exported {} to {}",
                fmt_bold(&cfg.name),
                fmt_dimmed(self.dir.as_str())
            ))
        );

        Ok(cfg)
    }
}
