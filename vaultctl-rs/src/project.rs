//! Project initialization.

use crate::classify::validate_project_root;
use crate::config::Config;
use crate::error::Result;
use crate::mount::{Mount, mount_global_into_project};
use crate::registry::discover_globals;
use crate::scaffold::{ensure_gitignore, write_desktop_launcher};
use crate::vault::{ProjectVault, ensure_project_vault};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Everything `init_project` did or found.
#[derive(Debug, Clone, Serialize)]
pub struct InitReport {
    pub project: ProjectVault,
    pub mounts: Vec<Mount>,
    /// `auto_mount` names with no matching global vault.
    pub skipped: Vec<String>,
    pub gitignore_added: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub launcher: Option<PathBuf>,
}

/// Initialize the project vault at `project_root`.
///
/// Creates the vault, mounts every configured `auto_mount` vault that
/// currently exists, updates `.gitignore` for git projects, and writes the
/// desktop launcher when enabled. Running it again leaves the tree unchanged.
pub fn init_project(config: &Config, project_root: &Path) -> Result<InitReport> {
    validate_project_root(config, project_root)?;

    let project = ensure_project_vault(config, project_root)?;

    let globals = discover_globals(config)?;
    let mut mounts = Vec::new();
    let mut skipped = Vec::new();
    for name in &config.auto_mount {
        if globals.contains(name) {
            mounts.push(mount_global_into_project(config, project_root, name)?);
        } else {
            skipped.push(name.clone());
        }
    }

    let gitignore_added = ensure_gitignore(config, project_root)?;

    let launcher = if config.create_desktop_launcher {
        write_desktop_launcher(config, &project.vault)?
    } else {
        None
    };

    Ok(InitReport {
        project,
        mounts,
        skipped,
        gitignore_added,
        launcher,
    })
}
