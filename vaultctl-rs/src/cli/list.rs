//! List command implementation.

use crate::classify::resolve_path;
use crate::cli::args::ListArgs;
use crate::cli::output::Output;
use crate::config::{Config, expand_tilde};
use crate::error::Result;
use crate::mount::{MountEntry, MountStatus, list_mounts};
use crate::registry::{GlobalVaults, discover_globals};
use crate::vault::project_paths;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub vault_root: PathBuf,
    pub globals: GlobalVaults,
    pub total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<ProjectMounts>,
}

#[derive(Debug, Serialize)]
pub struct ProjectMounts {
    pub vault: PathBuf,
    pub mounts: Vec<MountEntry>,
}

pub fn run(config: &Config, args: &ListArgs, output: &Output) -> Result<()> {
    let globals = discover_globals(config)?;
    let total = globals.len();

    let project_root = resolve_path(&expand_tilde(&args.path)?);
    let project = match list_mounts(config, &project_root)? {
        Some(mounts) => {
            for entry in &mounts {
                match entry.status {
                    MountStatus::Broken => {
                        output.warn(&format!("mount '{}' is a broken symlink", entry.name))
                    }
                    MountStatus::NotASymlink => {
                        output.warn(&format!("mount '{}' is not a symlink", entry.name))
                    }
                    MountStatus::Linked => {}
                }
            }
            Some(ProjectMounts {
                vault: project_paths(config, &project_root).vault,
                mounts,
            })
        }
        None => None,
    };

    let response = ListResponse {
        vault_root: config.vault_root.clone(),
        globals,
        total,
        project,
    };
    output.print(&response)
}
