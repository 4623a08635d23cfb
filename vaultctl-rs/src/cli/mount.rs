//! Mount and unmount command implementations.

use crate::classify::resolve_path;
use crate::cli::args::MountArgs;
use crate::cli::output::Output;
use crate::config::{Config, expand_tilde};
use crate::error::Result;
use crate::mount::{MountOutcome, mount_global_into_project, unmount_global_from_project};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Serialize)]
pub struct UnmountResponse {
    pub name: String,
    pub link: PathBuf,
    pub message: String,
}

pub fn mount(config: &Config, args: &MountArgs, output: &Output) -> Result<()> {
    let project_root = resolve_path(&expand_tilde(&args.path)?);
    let mount = mount_global_into_project(config, &project_root, &args.name)?;

    match mount.outcome {
        MountOutcome::Created => {
            log::info!("mounted {} -> {}", mount.link.display(), mount.target.display())
        }
        MountOutcome::AlreadyMounted => {
            output.info(&format!("'{}' is already mounted", mount.name))
        }
    }

    output.print(&mount)
}

pub fn unmount(config: &Config, args: &MountArgs, output: &Output) -> Result<()> {
    let project_root = resolve_path(&expand_tilde(&args.path)?);
    let link = unmount_global_from_project(config, &project_root, &args.name)?;
    log::info!("removed mount {}", link.display());

    let response = UnmountResponse {
        name: args.name.clone(),
        link,
        message: "Mount removed".to_string(),
    };
    output.print(&response)
}
