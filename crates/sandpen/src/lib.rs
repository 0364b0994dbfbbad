pub mod cdnjs;
pub mod commands;
pub mod generator;
pub mod project_file;
pub mod server;
pub mod utils;

#[cfg(test)]
mod tests;

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};

use crate::commands::{
    export::ExportCmd, format::FormatCmd, generate::GenerateCmd, import::ImportCmd,
    init::InitCmd, libs::LibsCmd, render::RenderCmd, run::RunCmd, start::StartCmd,
    template::TemplateCmd,
};
use sandpen_config::Config;

#[derive(Parser)]
#[command(name = "sandpen")]
#[command(version)]
#[command(about = "sandpen - live HTML/CSS/JavaScript playground")]
#[command(
    long_about = "sandpen edits markup, style and script side by side and runs them in a sandboxed \
preview that reloads as you type. Console output from the preview is captured and shown next to it."
)]
#[command(after_help = "EXAMPLES:\n  \
    sandpen init --template login-form\n  \
    sandpen start --open\n  \
    sandpen generate \"a pricing table with three tiers\"\n  \
    sandpen libs add https://cdn.jsdelivr.net/npm/chart.js/dist/chart.umd.js\n  \
    sandpen run\n\
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file path, defaults to ./sandpen.json
    #[arg(long, short = 'c', global = true, default_value_t = Config::default_path())]
    pub config: Utf8PathBuf,

    /// No logging except for errors
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Verbose logging (-v) or trace logging (-vv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

impl Cli {
    #[allow(clippy::missing_errors_doc)]
    pub async fn handle(&self) -> anyhow::Result<()> {
        let cfg = Config::load(&self.config);

        match &self.command {
            Commands::Init(cmd) => {
                cmd.handle(&self.config)?;
            }
            Commands::Start(cmd) => {
                cmd.handle(cfg?).await?;
            }
            Commands::Render(cmd) => {
                cmd.handle(cfg?)?;
            }
            Commands::Run(cmd) => {
                cmd.handle(cfg?).await?;
            }
            Commands::Generate(cmd) => {
                cmd.handle(cfg?).await?;
            }
            Commands::Format(cmd) => {
                cmd.handle(cfg?)?;
            }
            Commands::Libs(cmd) => {
                cmd.handle(cfg?).await?;
            }
            Commands::Export(cmd) => {
                cmd.handle(cfg?)?;
            }
            Commands::Import(cmd) => {
                cmd.handle(cfg?)?;
            }
            Commands::Template(cmd) => cmd.handle()?,
        }

        Ok(())
    }
}

#[derive(Debug, Subcommand)]
#[command(styles=utils::styles::get_styles())]
pub enum Commands {
    /// Initialize configuration and project files
    #[command(long_about = "Create sandpen.json and a project file from a starter template.")]
    Init(InitCmd),

    /// Start the editor
    #[command(
        long_about = "Serve the editor page with the live preview, the captured console and the \
standalone preview at /preview."
    )]
    Start(StartCmd),

    /// Write the assembled document
    #[command(
        long_about = "Write the exact document the preview runs, instrumentation included, to a file or stdout."
    )]
    Render(RenderCmd),

    /// Run the script headless and print its console
    #[command(
        long_about = "Run the Script fragment without a browser and print what it logs. There is no \
DOM and no external libraries, so DOM access fails with an uncaught error."
    )]
    Run(RunCmd),

    /// Generate all fragments from a prompt
    #[command(long_about = "Replace markup, style and script with code generated from a prompt.")]
    Generate(GenerateCmd),

    /// Format a fragment
    Format(FormatCmd),

    /// Manage external libraries
    Libs(LibsCmd),

    /// Export the fragments as separate files
    Export(ExportCmd),

    /// Import a project file
    #[command(
        long_about = "Merge a project file into the current project. Fields with the wrong type are skipped."
    )]
    Import(ImportCmd),

    /// Built-in starter templates
    Template(TemplateCmd),
}
