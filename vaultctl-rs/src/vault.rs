//! On-disk creation of project vaults and global vaults.

use crate::classify::{GlobalClass, InvalidReason, classify_global, is_ignored_root_entry};
use crate::config::Config;
use crate::error::{Result, VaultError};
use serde::Serialize;
use std::path::{Component, Path, PathBuf};

/// File name of the index document in every vault.
pub const INDEX_FILE: &str = "index.md";

const PROJECT_INDEX_CONTENT: &str = "# Project Notes\n\n";

/// Paths that make up a project vault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectVault {
    /// The project root the vault belongs to.
    pub root: PathBuf,
    /// `root/project_vault_dir`.
    pub vault: PathBuf,
    /// `vault/mount_dir`, where mount links live.
    pub mount: PathBuf,
}

impl ProjectVault {
    /// Path of the project index document.
    pub fn index_path(&self) -> PathBuf {
        self.vault.join(INDEX_FILE)
    }

    /// Path a mount of global vault `name` would occupy.
    pub fn link_path(&self, name: &str) -> PathBuf {
        self.mount.join(name)
    }

    /// Whether both the vault and its mount directory exist.
    pub fn exists(&self) -> bool {
        self.vault.is_dir() && self.mount.is_dir()
    }
}

/// Compute the project vault paths for `project_root` without touching disk.
pub fn project_paths(config: &Config, project_root: &Path) -> ProjectVault {
    let vault = project_root.join(&config.project_vault_dir);
    let mount = vault.join(&config.mount_dir);
    ProjectVault {
        root: project_root.to_path_buf(),
        vault,
        mount,
    }
}

/// Create the project vault and its mount directory if missing.
///
/// Idempotent. The index document is only written when absent, so existing
/// notes are never overwritten.
pub fn ensure_project_vault(config: &Config, project_root: &Path) -> Result<ProjectVault> {
    let paths = project_paths(config, project_root);
    std::fs::create_dir_all(&paths.vault)?;
    std::fs::create_dir_all(&paths.mount)?;
    write_if_absent(&paths.index_path(), PROJECT_INDEX_CONTENT)?;
    Ok(paths)
}

/// Create (or reuse) the global vault `name` under `vault_root`.
///
/// Fails with `InvalidName` for reserved or path-like names, with
/// `InvalidLocation` when the entry is a symlink or not a directory, and with
/// `StructuralViolation` when the vault already contains a mount directory.
/// In every failure case nothing is written.
pub fn ensure_global_vault(config: &Config, name: &str) -> Result<PathBuf> {
    validate_vault_name(name)?;

    let target = config.vault_root.join(name);
    if std::fs::symlink_metadata(&target).is_err() {
        std::fs::create_dir_all(&target)?;
    }

    match classify_global(config, &target) {
        GlobalClass::Valid(_) => {}
        GlobalClass::Invalid(InvalidReason::ContainsMountDir) => {
            let mount_dir = target.join(&config.mount_dir);
            return Err(VaultError::StructuralViolation {
                vault: target,
                mount_dir,
            });
        }
        GlobalClass::Invalid(reason) => {
            return Err(VaultError::invalid_location(target, reason.to_string()));
        }
    }

    write_if_absent(&target.join(INDEX_FILE), &format!("# {}\n\n", name))?;
    Ok(target)
}

/// Check that `name` can identify a discoverable global vault.
pub fn validate_vault_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(VaultError::invalid_name(name, "name cannot be empty"));
    }
    if is_ignored_root_entry(name) {
        return Err(VaultError::invalid_name(
            name,
            "global vault name cannot start with '_' or '.'",
        ));
    }
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) if !name.contains(['/', '\\']) => Ok(()),
        _ => Err(VaultError::invalid_name(
            name,
            "name must be a single directory name",
        )),
    }
}

fn write_if_absent(path: &Path, content: &str) -> Result<()> {
    if std::fs::symlink_metadata(path).is_ok() {
        return Ok(());
    }
    std::fs::write(path, content)?;
    Ok(())
}
