//! Init command implementation.

use crate::classify::resolve_path;
use crate::cli::args::InitArgs;
use crate::cli::output::Output;
use crate::config::{Config, expand_tilde};
use crate::error::Result;
use crate::project::init_project;
use crate::vault::ensure_global_vault;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Serialize)]
pub struct CreateGlobalResponse {
    pub name: String,
    pub path: PathBuf,
    pub message: String,
}

pub fn run(config: &Config, args: &InitArgs, output: &Output) -> Result<()> {
    if let Some(ref name) = args.global_name {
        let path = ensure_global_vault(config, name)?;
        log::info!("global vault ready: {}", path.display());
        let response = CreateGlobalResponse {
            name: name.clone(),
            path,
            message: "Global vault ready".to_string(),
        };
        return output.print(&response);
    }

    let project_root = resolve_path(&expand_tilde(&args.path)?);
    let report = init_project(config, &project_root)?;

    for mount in &report.mounts {
        log::info!("mounted {} -> {}", mount.link.display(), mount.target.display());
    }
    for name in &report.skipped {
        output.info(&format!(
            "auto_mount: global vault '{}' not found under {}, skipped",
            name,
            config.vault_root.display()
        ));
    }
    log::info!("project vault ready: {}", report.project.vault.display());

    output.print(&report)
}
