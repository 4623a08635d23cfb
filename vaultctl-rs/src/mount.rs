//! Mounting global vaults into project vaults.
//!
//! A mount is a directory symlink at `<project>/<project_vault_dir>/<mount_dir>/<name>`
//! pointing at the absolute path of global vault `name`. Mounts are weak
//! references: removing one never touches the global vault's contents.
//!
//! No locking is performed. Two processes racing to mount the same link can
//! leave the loser with `AlreadyExists`.

use crate::classify::validate_project_root;
use crate::config::Config;
use crate::error::{Result, VaultError};
use crate::registry::discover_globals;
use crate::vault::{ensure_project_vault, project_paths, validate_vault_name};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// What a successful mount call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MountOutcome {
    Created,
    /// An identical link was already in place.
    AlreadyMounted,
}

/// A mount link and the global vault it points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mount {
    pub name: String,
    pub link: PathBuf,
    pub target: PathBuf,
    pub outcome: MountOutcome,
}

/// State of an entry found in a project's mount directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MountStatus {
    Linked,
    /// Symlink whose target no longer exists.
    Broken,
    NotASymlink,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MountEntry {
    pub name: String,
    pub status: MountStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<PathBuf>,
}

/// Link global vault `name` into the project vault of `project_root`.
///
/// Every precondition is checked before the link is written. An existing
/// entry at the link path is only accepted when it is a symlink resolving to
/// the same global vault; anything else is reported as `AlreadyExists` and
/// left in place.
pub fn mount_global_into_project(config: &Config, project_root: &Path, name: &str) -> Result<Mount> {
    validate_project_root(config, project_root)?;

    let globals = discover_globals(config)?;
    let global = globals.get(name).ok_or_else(|| VaultError::NotFound {
        name: name.to_string(),
        vault_root: config.vault_root.clone(),
    })?;
    let target = std::fs::canonicalize(&global.path)?;

    let project = ensure_project_vault(config, project_root)?;
    let link = project.link_path(name);

    if let Ok(meta) = std::fs::symlink_metadata(&link) {
        let same_target = meta.file_type().is_symlink()
            && std::fs::canonicalize(&link).is_ok_and(|resolved| resolved == target);
        if same_target {
            return Ok(Mount {
                name: name.to_string(),
                link,
                target,
                outcome: MountOutcome::AlreadyMounted,
            });
        }
        return Err(VaultError::AlreadyExists(link));
    }

    symlink_dir(&target, &link)?;
    Ok(Mount {
        name: name.to_string(),
        link,
        target,
        outcome: MountOutcome::Created,
    })
}

/// Remove the mount of `name` from the project vault of `project_root`.
///
/// Only symlinks are removed. Returns the path of the removed link.
pub fn unmount_global_from_project(config: &Config, project_root: &Path, name: &str) -> Result<PathBuf> {
    validate_vault_name(name)?;
    validate_project_root(config, project_root)?;

    let link = project_paths(config, project_root).link_path(name);
    let meta = match std::fs::symlink_metadata(&link) {
        Ok(meta) => meta,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(VaultError::NotMounted {
                name: name.to_string(),
                link,
            });
        }
        Err(e) => return Err(e.into()),
    };
    if !meta.file_type().is_symlink() {
        return Err(VaultError::NotAMount(link));
    }

    remove_symlink_dir(&link)?;
    Ok(link)
}

/// List the entries of the project's mount directory.
///
/// Returns `None` when `project_root` has no project vault.
pub fn list_mounts(config: &Config, project_root: &Path) -> Result<Option<Vec<MountEntry>>> {
    let project = project_paths(config, project_root);
    if !project.exists() {
        return Ok(None);
    }

    let mut entries = Vec::new();
    for entry in std::fs::read_dir(&project.mount)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        let path = entry.path();

        let is_symlink = std::fs::symlink_metadata(&path)?.file_type().is_symlink();
        let (status, target) = if !is_symlink {
            (MountStatus::NotASymlink, None)
        } else {
            match std::fs::canonicalize(&path) {
                Ok(resolved) => (MountStatus::Linked, Some(resolved)),
                Err(_) => (MountStatus::Broken, std::fs::read_link(&path).ok()),
            }
        };
        entries.push(MountEntry { name, status, target });
    }

    entries.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name))
    });
    Ok(Some(entries))
}

#[cfg(unix)]
fn symlink_dir(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn symlink_dir(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::windows::fs::symlink_dir(target, link)
}

#[cfg(unix)]
fn remove_symlink_dir(link: &Path) -> std::io::Result<()> {
    std::fs::remove_file(link)
}

#[cfg(windows)]
fn remove_symlink_dir(link: &Path) -> std::io::Result<()> {
    std::fs::remove_dir(link)
}
