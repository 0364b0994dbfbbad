use anyhow::Result;
use clap::Parser;
use log::{info, warn};
use sandpen_config::Config;
use sandpen_core::{LogStore, MessageBridge, SandboxHost, SettledSnapshot};
use sandpen_runtime::{RunOptions, run_script};
use std::time::Duration;

use crate::{
    commands::open_project,
    utils::styles::{fmt_bold, fmt_dimmed, fmt_error, fmt_log_kind, fmt_success},
};

#[derive(Debug, Clone, Parser)]
pub struct RunCmd {
    /// Stop the script after this many milliseconds
    #[arg(long, default_value = "5000")]
    pub timeout: u64,
}

impl RunCmd {
    /// Runs the Script fragment headless and prints its console output.
    ///
    /// Messages go through the same bridge as the preview's, attributed to
    /// the generation the project loads as.
    pub(crate) async fn handle(&self, cfg: Config) -> Result<Config> {
        let (_, project) = open_project(&cfg)?;
        let script = project.js.clone();

        let host = SandboxHost::new();
        let logs = LogStore::new();
        let bridge = MessageBridge::new(host.clone(), logs.clone());
        let generation = host.load(SettledSnapshot::new(
            project.fragments(),
            project.libraries(),
        ));

        if !project.libraries().is_empty() {
            warn!("External libraries are not loaded in headless runs");
        }

        let options = RunOptions {
            timeout: Duration::from_millis(self.timeout),
        };
        let run = run_script(&script, &options).await?;
        for message in &run.messages {
            bridge.receive(generation, message);
        }
        host.teardown();

        for entry in logs.entries() {
            info!(
                "{} {} {}",
                fmt_dimmed(&entry.timestamp),
                fmt_log_kind(entry.kind),
                entry.text()
            );
        }

        if run.timed_out {
            info!(
                "{}",
                fmt_error(&format!(
                    "Script did not finish within {}",
                    fmt_bold(&format!("{}ms", self.timeout))
                ))
            );
        } else {
            info!(
                "{}",
                fmt_success(&format!("Script finished with {} log entries", logs.len()))
            );
        }

        Ok(cfg)
    }
}
