//! Path classification rules for global and project vaults.
//!
//! Validity is decided purely by filesystem shape: where a directory lives
//! and whether it contains a mount directory. Nothing in this module mutates
//! the filesystem.

use crate::config::Config;
use crate::error::{Result, VaultError};
use serde::Serialize;
use std::path::{Component, Path, PathBuf};

/// Why a path does not qualify as a mountable global vault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum InvalidReason {
    /// Nothing exists at the path (or it is a dangling symlink).
    Missing,
    NotADirectory,
    /// Name starts with `.` or `_`.
    Ignored,
    Symlink,
    /// Not an immediate child of `vault_root`.
    NotDirectChild,
    /// Contains the configured mount directory.
    ContainsMountDir,
}

impl std::fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidReason::Missing => write!(f, "does not exist"),
            InvalidReason::NotADirectory => write!(f, "is not a directory"),
            InvalidReason::Ignored => write!(f, "name starts with '.' or '_'"),
            InvalidReason::Symlink => write!(f, "is a symbolic link"),
            InvalidReason::NotDirectChild => write!(f, "is not a direct child of vault_root"),
            InvalidReason::ContainsMountDir => write!(f, "contains a mount directory"),
        }
    }
}

/// Result of classifying a candidate global vault path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlobalClass {
    Valid(PathBuf),
    Invalid(InvalidReason),
}

impl GlobalClass {
    pub fn is_valid(&self) -> bool {
        matches!(self, GlobalClass::Valid(_))
    }
}

/// Hidden and underscore-prefixed names never count as global vaults.
pub fn is_ignored_root_entry(name: &str) -> bool {
    name.starts_with('.') || name.starts_with('_')
}

/// Classify `path` as a global vault candidate in a single pass.
///
/// Checks run in a fixed order and stop at the first failure:
/// existence as a directory, ignored name, symlink, direct child of
/// `vault_root` (parent equality, not prefix containment), and absence of
/// the mount directory.
pub fn classify_global(config: &Config, path: &Path) -> GlobalClass {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => return GlobalClass::Invalid(InvalidReason::NotADirectory),
        Err(_) => return GlobalClass::Invalid(InvalidReason::Missing),
    }

    let name = path.file_name().map(|n| n.to_string_lossy());
    match name {
        Some(ref n) if !is_ignored_root_entry(n) => {}
        _ => return GlobalClass::Invalid(InvalidReason::Ignored),
    }

    match std::fs::symlink_metadata(path) {
        Ok(meta) if !meta.file_type().is_symlink() => {}
        _ => return GlobalClass::Invalid(InvalidReason::Symlink),
    }

    if path.parent() != Some(config.vault_root.as_path()) {
        return GlobalClass::Invalid(InvalidReason::NotDirectChild);
    }

    if std::fs::symlink_metadata(path.join(&config.mount_dir)).is_ok() {
        return GlobalClass::Invalid(InvalidReason::ContainsMountDir);
    }

    GlobalClass::Valid(path.to_path_buf())
}

/// True iff `path` is a valid, mountable global vault.
pub fn is_mountable_global(config: &Config, path: &Path) -> bool {
    classify_global(config, path).is_valid()
}

/// True if `path` lies inside (or is) a mountable global vault.
///
/// Only the first component below `vault_root` is inspected: a path is inside
/// a global vault exactly when its top-level ancestor under `vault_root` is
/// itself a valid global vault.
pub fn is_inside_global_vault(config: &Config, path: &Path) -> bool {
    if !config.vault_root.exists() {
        return false;
    }
    let path = resolve_path(path);
    let root = resolve_path(&config.vault_root);

    let rel = match path.strip_prefix(&root) {
        Ok(rel) => rel,
        Err(_) => return false,
    };
    match rel.components().next() {
        Some(Component::Normal(first)) => {
            is_mountable_global(config, &config.vault_root.join(first))
        }
        _ => false,
    }
}

/// Check that `project_root` may host a project vault.
///
/// Returns the resolved project root. Fails with `InvalidLocation` when the
/// root is `vault_root` itself, lies inside a global vault, or lies under a
/// non-ignored top-level entry of `vault_root`. Such an entry is a global
/// vault already, or becomes one once the project vault is created in it.
pub fn validate_project_root(config: &Config, project_root: &Path) -> Result<PathBuf> {
    let resolved = resolve_path(project_root);
    let root = resolve_path(&config.vault_root);

    if resolved == root {
        return Err(VaultError::invalid_location(
            resolved,
            "this is vault_root; use `init --global NAME` to create a global vault",
        ));
    }
    if is_inside_global_vault(config, &resolved) {
        return Err(VaultError::invalid_location(
            resolved,
            "inside a global vault; project vaults and mounts are not allowed here",
        ));
    }

    let first = resolved
        .strip_prefix(&root)
        .ok()
        .and_then(|rel| rel.components().next());
    if let Some(Component::Normal(first)) = first {
        if !is_ignored_root_entry(&first.to_string_lossy()) {
            return Err(VaultError::invalid_location(
                resolved,
                "under a top-level entry of vault_root, which is or would become a global vault",
            ));
        }
    }
    Ok(resolved)
}

/// Resolve `path` to an absolute, canonical form.
///
/// Unlike [`std::fs::canonicalize`], missing trailing components are allowed:
/// the deepest existing ancestor is canonicalized and the rest is appended.
pub fn resolve_path(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        normalize(path)
    } else {
        match std::env::current_dir() {
            Ok(cwd) => normalize(&cwd.join(path)),
            Err(_) => normalize(path),
        }
    };

    let mut existing = absolute.as_path();
    let mut tail: Vec<&std::ffi::OsStr> = Vec::new();
    loop {
        if let Ok(canonical) = std::fs::canonicalize(existing) {
            let mut out = canonical;
            for part in tail.iter().rev() {
                out.push(part);
            }
            return out;
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                tail.push(name);
                existing = parent;
            }
            _ => return absolute,
        }
    }
}

/// Lexically drop `.` components and fold `..` against preceding names.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Config) {
        let dir = TempDir::new().unwrap();
        let root = fs::canonicalize(dir.path()).unwrap().join("vaults");
        fs::create_dir_all(&root).unwrap();
        (dir, Config::new(root))
    }

    #[test]
    fn test_ignored_root_entries() {
        assert!(is_ignored_root_entry(".obsidian"));
        assert!(is_ignored_root_entry("_scratch"));
        assert!(!is_ignored_root_entry("global"));
        assert!(!is_ignored_root_entry("my_notes"));
    }

    #[test]
    fn test_valid_global() {
        let (_dir, config) = setup();
        let global = config.vault_root.join("global");
        fs::create_dir(&global).unwrap();

        assert_eq!(classify_global(&config, &global), GlobalClass::Valid(global.clone()));
        assert!(is_mountable_global(&config, &global));
    }

    #[test]
    fn test_classification_reasons() {
        let (_dir, config) = setup();
        let root = &config.vault_root;

        assert_eq!(
            classify_global(&config, &root.join("absent")),
            GlobalClass::Invalid(InvalidReason::Missing)
        );

        fs::write(root.join("file.md"), "x").unwrap();
        assert_eq!(
            classify_global(&config, &root.join("file.md")),
            GlobalClass::Invalid(InvalidReason::NotADirectory)
        );

        fs::create_dir(root.join("_scratch")).unwrap();
        assert_eq!(
            classify_global(&config, &root.join("_scratch")),
            GlobalClass::Invalid(InvalidReason::Ignored)
        );

        fs::create_dir_all(root.join("global").join("sub")).unwrap();
        assert_eq!(
            classify_global(&config, &root.join("global").join("sub")),
            GlobalClass::Invalid(InvalidReason::NotDirectChild)
        );

        fs::create_dir_all(root.join("broken").join("_m")).unwrap();
        assert_eq!(
            classify_global(&config, &root.join("broken")),
            GlobalClass::Invalid(InvalidReason::ContainsMountDir)
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_directory_is_not_global() {
        let (dir, config) = setup();
        let outside = dir.path().join("outside");
        fs::create_dir(&outside).unwrap();
        let link = config.vault_root.join("linked");
        std::os::unix::fs::symlink(&outside, &link).unwrap();

        assert_eq!(
            classify_global(&config, &link),
            GlobalClass::Invalid(InvalidReason::Symlink)
        );
    }

    #[test]
    fn test_outside_vault_root_is_never_inside() {
        let (dir, config) = setup();
        let project = dir.path().join("project");
        fs::create_dir(&project).unwrap();

        assert!(!is_inside_global_vault(&config, &project));
        assert!(!is_inside_global_vault(&config, Path::new("/")));
        assert!(!is_inside_global_vault(&config, &dir.path().join("does/not/exist")));
    }

    #[test]
    fn test_inside_global_vault() {
        let (_dir, config) = setup();
        let global = config.vault_root.join("global");
        fs::create_dir_all(global.join("deep").join("er")).unwrap();

        assert!(is_inside_global_vault(&config, &global));
        assert!(is_inside_global_vault(&config, &global.join("deep").join("er")));
        assert!(is_inside_global_vault(&config, &global.join("not-yet-created")));
        assert!(!is_inside_global_vault(&config, &config.vault_root));
    }

    #[test]
    fn test_inside_ignored_entry_is_not_inside_global() {
        let (_dir, config) = setup();
        let scratch = config.vault_root.join("_scratch").join("proj");
        fs::create_dir_all(&scratch).unwrap();

        assert!(!is_inside_global_vault(&config, &scratch));
    }

    #[test]
    fn test_missing_vault_root_fails_closed() {
        let dir = TempDir::new().unwrap();
        let config = Config::new(dir.path().join("nope"));
        assert!(!is_inside_global_vault(&config, &dir.path().join("nope").join("global")));
    }

    #[test]
    fn test_validate_project_root() {
        let (dir, config) = setup();
        let global = config.vault_root.join("global");
        fs::create_dir(&global).unwrap();

        let err = validate_project_root(&config, &global).unwrap_err();
        assert!(matches!(err, VaultError::InvalidLocation { .. }));

        let err = validate_project_root(&config, &config.vault_root).unwrap_err();
        assert!(matches!(err, VaultError::InvalidLocation { .. }));

        let project = dir.path().join("project");
        fs::create_dir(&project).unwrap();
        let resolved = validate_project_root(&config, &project).unwrap();
        assert_eq!(resolved, fs::canonicalize(&project).unwrap());
    }

    #[test]
    fn test_validate_rejects_future_global_slot() {
        let (_dir, config) = setup();

        let fresh = config.vault_root.join("newproj");
        let err = validate_project_root(&config, &fresh).unwrap_err();
        assert!(matches!(err, VaultError::InvalidLocation { .. }));
        assert!(!fresh.exists());

        let nested = config.vault_root.join("notes.d").join("proj");
        let err = validate_project_root(&config, &nested).unwrap_err();
        assert!(matches!(err, VaultError::InvalidLocation { .. }));

        let scratch = config.vault_root.join("_scratch").join("proj");
        assert!(validate_project_root(&config, &scratch).is_ok());
    }

    #[test]
    fn test_resolve_path_keeps_missing_tail() {
        let dir = TempDir::new().unwrap();
        let base = fs::canonicalize(dir.path()).unwrap();
        let resolved = resolve_path(&dir.path().join("a").join("..").join("b").join("c"));
        assert_eq!(resolved, base.join("b").join("c"));
    }
}
