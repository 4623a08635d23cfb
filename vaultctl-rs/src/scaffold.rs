//! Project scaffolding around a vault: `.gitignore` entries and the desktop
//! launcher descriptor.

use crate::classify::resolve_path;
use crate::config::Config;
use crate::error::Result;
use std::path::{Path, PathBuf};

/// Editor for which a launcher descriptor is generated.
const LAUNCHER_EDITOR: &str = "obsidian";

/// `.gitignore` lines that keep mounts and editor state out of git.
pub fn gitignore_entries(config: &Config) -> Vec<String> {
    vec![
        format!("{}/{}/", config.project_vault_dir, config.mount_dir),
        format!("{}/.{}/", config.project_vault_dir, config.editor),
    ]
}

/// Append missing vault entries to the project's `.gitignore`.
///
/// Does nothing unless `project_root` is a git checkout. Existing lines are
/// preserved; returns the entries that were added.
pub fn ensure_gitignore(config: &Config, project_root: &Path) -> Result<Vec<String>> {
    if std::fs::symlink_metadata(project_root.join(".git")).is_err() {
        return Ok(Vec::new());
    }

    let path = project_root.join(".gitignore");
    let existing = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(e.into()),
    };

    let missing: Vec<String> = gitignore_entries(config)
        .into_iter()
        .filter(|entry| !existing.lines().any(|line| line.trim() == entry))
        .collect();
    if missing.is_empty() {
        return Ok(missing);
    }

    let mut content = existing;
    if !content.is_empty() && !content.ends_with('\n') {
        content.push('\n');
    }
    for entry in &missing {
        content.push_str(entry);
        content.push('\n');
    }
    std::fs::write(&path, content)?;
    Ok(missing)
}

/// Render the freedesktop launcher that opens `vault` in the editor.
pub fn launcher_content(vault: &Path) -> String {
    format!(
        "[Desktop Entry]\n\
         Type=Application\n\
         Name=Open Project Vault\n\
         Exec={editor} \"{path}\"\n\
         Terminal=false\n\
         Icon={editor}\n",
        editor = LAUNCHER_EDITOR,
        path = vault.display(),
    )
}

/// Write the desktop launcher into `vault`.
///
/// Only Obsidian launchers are generated; other editors yield `None`. The
/// `Exec` line uses the resolved absolute vault path. An up-to-date launcher
/// is left untouched.
pub fn write_desktop_launcher(config: &Config, vault: &Path) -> Result<Option<PathBuf>> {
    if config.editor != LAUNCHER_EDITOR {
        return Ok(None);
    }

    let launcher = vault.join(&config.desktop_launcher_name);
    let content = launcher_content(&resolve_path(vault));
    let current = std::fs::read_to_string(&launcher).ok();
    if current.as_deref() != Some(content.as_str()) {
        std::fs::write(&launcher, content)?;
    }
    make_executable(&launcher)?;
    Ok(Some(launcher))
}

#[cfg(unix)]
fn make_executable(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    const MODE: u32 = 0o755;
    if std::fs::metadata(path)?.permissions().mode() & 0o777 == MODE {
        return Ok(());
    }
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(MODE))
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Config, PathBuf) {
        let dir = TempDir::new().unwrap();
        let base = fs::canonicalize(dir.path()).unwrap();
        let config = Config::new(base.join("vaults"));
        let project = base.join("proj");
        fs::create_dir_all(&project).unwrap();
        (dir, config, project)
    }

    #[test]
    fn test_gitignore_skipped_outside_git() {
        let (_dir, config, project) = setup();
        let added = ensure_gitignore(&config, &project).unwrap();
        assert!(added.is_empty());
        assert!(!project.join(".gitignore").exists());
    }

    #[test]
    fn test_gitignore_appends_missing_entries() {
        let (_dir, config, project) = setup();
        fs::create_dir(project.join(".git")).unwrap();
        fs::write(project.join(".gitignore"), "target/\n.vault/_m/").unwrap();

        let added = ensure_gitignore(&config, &project).unwrap();
        assert_eq!(added, vec![".vault/.obsidian/".to_string()]);
        assert_eq!(
            fs::read_to_string(project.join(".gitignore")).unwrap(),
            "target/\n.vault/_m/\n.vault/.obsidian/\n"
        );

        let again = ensure_gitignore(&config, &project).unwrap();
        assert!(again.is_empty());
    }

    #[test]
    fn test_gitignore_created_in_git_repo() {
        let (_dir, config, project) = setup();
        fs::create_dir(project.join(".git")).unwrap();

        ensure_gitignore(&config, &project).unwrap();
        assert_eq!(
            fs::read_to_string(project.join(".gitignore")).unwrap(),
            ".vault/_m/\n.vault/.obsidian/\n"
        );
    }

    #[test]
    fn test_launcher_written_for_obsidian() {
        let (_dir, config, project) = setup();
        let vault = project.join(".vault");
        fs::create_dir(&vault).unwrap();

        let launcher = write_desktop_launcher(&config, &vault).unwrap().unwrap();
        assert_eq!(launcher, vault.join("Open Project Vault.desktop"));

        let content = fs::read_to_string(&launcher).unwrap();
        assert!(content.starts_with("[Desktop Entry]\n"));
        assert!(content.contains(&format!("Exec=obsidian \"{}\"\n", vault.display())));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&launcher).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o755);
        }
    }

    #[test]
    fn test_launcher_rewritten_only_when_stale() {
        let (_dir, config, project) = setup();
        let vault = project.join(".vault");
        fs::create_dir(&vault).unwrap();
        let launcher = write_desktop_launcher(&config, &vault).unwrap().unwrap();

        let old = std::time::SystemTime::UNIX_EPOCH + std::time::Duration::from_secs(1_000_000);
        fs::File::options()
            .write(true)
            .open(&launcher)
            .unwrap()
            .set_modified(old)
            .unwrap();

        write_desktop_launcher(&config, &vault).unwrap();
        assert_eq!(fs::metadata(&launcher).unwrap().modified().unwrap(), old);

        fs::write(&launcher, "[Desktop Entry]\nExec=stale\n").unwrap();
        write_desktop_launcher(&config, &vault).unwrap();
        assert_eq!(
            fs::read_to_string(&launcher).unwrap(),
            launcher_content(&vault)
        );
    }

    #[test]
    fn test_launcher_skipped_for_other_editors() {
        let (_dir, mut config, project) = setup();
        config.editor = "vim".to_string();
        let vault = project.join(".vault");
        fs::create_dir(&vault).unwrap();

        assert_eq!(write_desktop_launcher(&config, &vault).unwrap(), None);
        assert!(!vault.join("Open Project Vault.desktop").exists());
    }
}
