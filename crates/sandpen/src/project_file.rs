//! The project file on disk.

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use sandpen_core::{Appearance, Libraries, Project, templates};

#[derive(Debug, Clone)]
pub struct ProjectFile {
    path: Utf8PathBuf,
}

impl ProjectFile {
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read the project; a missing file yields the starter template.
    ///
    /// Fields with the wrong type are skipped like any other import.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or is not a JSON object
    pub fn load(&self) -> Result<Project> {
        if !self.exists() {
            debug!("No project at {}, using the starter template", self.path);
            return Ok(starter_project());
        }

        let text = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read project file {}", self.path))?;
        let patch = Project::import(&text)?;

        let mut project = Project::default();
        project.apply(patch);
        Ok(project)
    }

    /// # Errors
    ///
    /// Fails if the file cannot be written
    pub fn save(&self, project: &Project) -> Result<()> {
        let json = project.to_json().context("Failed to serialize project")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write project file {}", self.path))
    }

    /// Same as [`ProjectFile::save`] without blocking the runtime
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be written
    pub async fn save_async(&self, project: &Project) -> Result<()> {
        let json = project.to_json().context("Failed to serialize project")?;
        tokio::fs::write(&self.path, json)
            .await
            .with_context(|| format!("Failed to write project file {}", self.path))
    }
}

pub fn starter_project() -> Project {
    Project::new(
        &templates::starter().fragments(),
        &Libraries::default(),
        Appearance::default(),
    )
}
