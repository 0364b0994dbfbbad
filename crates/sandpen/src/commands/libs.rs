use anyhow::Result;
use clap::{Parser, Subcommand};
use log::info;
use sandpen_config::Config;
use sandpen_core::LibraryKind;
use tabled::{Table, settings::Style};

use crate::{
    cdnjs,
    commands::open_project,
    utils::{
        prompts,
        spinner::Spinner,
        styles::{fmt_bold, fmt_cyan, fmt_dimmed, fmt_success},
    },
};

#[derive(Debug, Clone, Parser)]
pub struct LibsCmd {
    #[command(subcommand)]
    pub command: LibsCommands,
}

#[derive(Debug, Clone, Subcommand)]
pub enum LibsCommands {
    /// List the external libraries loaded with the project
    List,

    /// Add a library by URL; `.css` files become stylesheets, `.js` files scripts
    Add {
        /// URL of the library, prompted for when omitted
        url: Option<String>,
    },

    /// Remove a library by URL
    Remove {
        url: String,
    },

    /// Search cdnjs for a library
    Search {
        term: String,
    },
}

impl LibsCmd {
    pub(crate) async fn handle(&self, cfg: Config) -> Result<Config> {
        match &self.command {
            LibsCommands::List => list(&cfg)?,
            LibsCommands::Add { url } => add(&cfg, url.as_deref())?,
            LibsCommands::Remove { url } => remove(&cfg, url)?,
            LibsCommands::Search { term } => search(term).await?,
        }
        Ok(cfg)
    }
}

fn list(cfg: &Config) -> Result<()> {
    let (_, project) = open_project(cfg)?;
    let libraries = project.libraries();

    if libraries.is_empty() {
        info!("No external libraries configured");
        info!("");
        info!(
            "Run {cmd} to add one",
            cmd = fmt_bold("sandpen libs add <URL>")
        );
        return Ok(());
    }

    for (kind, title) in [(LibraryKind::Style, "CSS"), (LibraryKind::Script, "JavaScript")] {
        let urls = libraries.list(kind);
        if urls.is_empty() {
            continue;
        }
        info!("{}", fmt_cyan(title));
        for (i, url) in urls.iter().enumerate() {
            let branch = if i < urls.len() - 1 { "├──" } else { "└──" };
            info!("{branch} {url}");
        }
    }
    Ok(())
}

fn add(cfg: &Config, url: Option<&str>) -> Result<()> {
    let url = match url {
        Some(url) => url.to_string(),
        None => inquire::Text::new("Library URL:")
            .with_validator(inquire::required!())
            .with_validator(prompts::validators::library_url)
            .prompt()?,
    };

    let (project_file, mut project) = open_project(cfg)?;
    let mut libraries = project.libraries();
    let kind = libraries.add(&url)?;
    project.css_libraries = libraries.styles;
    project.js_libraries = libraries.scripts;
    project_file.save(&project)?;

    let kind = match kind {
        LibraryKind::Style => "CSS",
        LibraryKind::Script => "JavaScript",
    };
    info!(
        "{}",
        fmt_success(&format!(
            "{} library {} added to {}",
            kind,
            fmt_bold(url.trim()),
            fmt_dimmed(project_file.path().as_str())
        ))
    );
    Ok(())
}

fn remove(cfg: &Config, url: &str) -> Result<()> {
    let (project_file, mut project) = open_project(cfg)?;
    let mut libraries = project.libraries();
    if !libraries.remove(url) {
        anyhow::bail!("No library with URL {url} in the project");
    }
    project.css_libraries = libraries.styles;
    project.js_libraries = libraries.scripts;
    project_file.save(&project)?;

    info!(
        "{}",
        fmt_success(&format!(
            "{} removed from {}",
            fmt_bold(url),
            fmt_dimmed(project_file.path().as_str())
        ))
    );
    Ok(())
}

async fn search(term: &str) -> Result<()> {
    let sp = Spinner::new(format!("Searching cdnjs for {}", fmt_cyan(term)));
    let results = match cdnjs::search(&reqwest::Client::new(), term).await {
        Ok(results) => results,
        Err(e) => {
            sp.stop_error("Search failed");
            return Err(e);
        }
    };
    sp.stop_success(format!("{} results", results.len()));

    if !results.is_empty() {
        let mut table = Table::new(results.iter().take(20));
        table.with(Style::rounded());
        info!("{table}");
    }
    Ok(())
}
