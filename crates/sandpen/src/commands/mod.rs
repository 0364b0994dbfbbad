pub mod export;
pub mod format;
pub mod generate;
pub mod import;
pub mod init;
pub mod libs;
pub mod render;
pub mod run;
pub mod start;
pub mod template;

use anyhow::Result;
use sandpen_config::Config;
use sandpen_core::{Project, Session};

use crate::project_file::ProjectFile;

pub(crate) static USER_CANCELLED: &str = "Operation cancelled by user";

/// The configured project file and its current contents
pub(crate) fn open_project(cfg: &Config) -> Result<(ProjectFile, Project)> {
    let file = ProjectFile::new(cfg.project_path());
    let project = file.load()?;
    Ok((file, project))
}

/// A session seeded with everything `project` holds
pub(crate) fn open_session(cfg: &Config, project: &Project) -> Session {
    let session = Session::new(project.fragments(), project.libraries(), cfg.debounce());
    session.set_appearance(project.appearance());
    session
}
