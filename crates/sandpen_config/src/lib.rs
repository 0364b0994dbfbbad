//! `sandpen.json`: per-directory settings for the sandpen CLI and server.

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[cfg(test)]
mod tests;

pub const DEFAULT_CONFIG_FILE: &str = "sandpen.json";
pub const DEFAULT_PROJECT_FILE: &str = "sandpen.project.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Project file holding fragments, libraries and appearance, relative to
    /// the config file
    pub project: Utf8PathBuf,

    pub server: ServerConfig,

    /// Quiet period before an edited fragment reloads the preview
    pub debounce_ms: u64,

    pub generator: GeneratorConfig,

    #[serde(skip)]
    path: Option<Utf8PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub model: String,
    /// Environment variable the API key is read from; the key itself is
    /// never written to disk
    pub api_key_env: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".into(),
            api_key_env: "API_KEY".into(),
        }
    }
}

impl GeneratorConfig {
    /// The API key from the configured environment variable, if set and non-empty
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            name: "sandpen".into(),
            description: None,
            project: DEFAULT_PROJECT_FILE.into(),
            server: ServerConfig::default(),
            debounce_ms: 500,
            generator: GeneratorConfig::default(),
            path: None,
        }
    }
}

impl Config {
    pub fn default_path() -> Utf8PathBuf {
        DEFAULT_CONFIG_FILE.into()
    }

    /// Load the config at `path`
    ///
    /// # Errors
    ///
    /// Fails if the file does not exist, cannot be read or is not valid config JSON
    pub fn load(path: &Utf8Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!(
                "No sandpen config found at {path}, create one with `sandpen init`"
            );
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {path}"))?;
        let cfg: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {path}"))?;

        debug!("Loaded config from {path}");
        Ok(cfg.with_path(path))
    }

    /// Write the config back to where it was loaded from
    ///
    /// # Errors
    ///
    /// Fails if the parent directory cannot be created or the file cannot be written
    pub fn save(&self) -> Result<()> {
        let path = self.path();

        if let Some(parent) = path.parent()
            && !parent.as_str().is_empty()
        {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(&path, contents)
            .with_context(|| format!("Failed to write config file {path}"))?;

        Ok(())
    }

    #[must_use]
    pub fn with_path(mut self, path: &Utf8Path) -> Self {
        self.path = Some(path.to_path_buf());
        self
    }

    /// Where this config lives, [`Config::default_path`] if it was never set
    pub fn path(&self) -> Utf8PathBuf {
        self.path.clone().unwrap_or_else(Self::default_path)
    }

    /// The project file, resolved against the config file's directory
    pub fn project_path(&self) -> Utf8PathBuf {
        if self.project.is_absolute() {
            return self.project.clone();
        }
        match self.path().parent() {
            Some(dir) if !dir.as_str().is_empty() => dir.join(&self.project),
            _ => self.project.clone(),
        }
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}
