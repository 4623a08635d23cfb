//! Configuration loading for vaultctl.
//!
//! The configuration lives in a TOML file, located at `$VAULTCTL_CONFIG` or
//! `~/.config/vaultctl/config.toml`. Every key is optional; missing keys fall
//! back to the defaults below. Once loaded, a [`Config`] is never mutated and
//! is passed by reference into every vault operation.
//!
//! ```toml
//! config_version = 1
//! vault_root = "~/vaults"
//! project_vault_dir = ".vault"
//! mount_dir = "_m"
//! auto_mount = ["global"]
//! create_desktop_launcher = true
//! desktop_launcher_name = "Open Project Vault.desktop"
//! editor = "obsidian"
//! ```

use crate::error::{Result, VaultError};
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV: &str = "VAULTCTL_CONFIG";

/// Only schema version understood by this build.
pub const CONFIG_VERSION: u32 = 1;

const DEFAULT_PROJECT_VAULT_DIR: &str = ".vault";
const DEFAULT_MOUNT_DIR: &str = "_m";
const DEFAULT_LAUNCHER_NAME: &str = "Open Project Vault.desktop";
const DEFAULT_EDITOR: &str = "obsidian";

/// Resolved, immutable vaultctl configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    pub config_version: u32,
    /// Parent directory of all global vaults. Always absolute.
    pub vault_root: PathBuf,
    /// Name of the vault directory inside a project root.
    pub project_vault_dir: String,
    /// Name of the directory holding mount links inside a project vault.
    pub mount_dir: String,
    /// Global vaults mounted automatically by `init`, in order.
    pub auto_mount: Vec<String>,
    pub create_desktop_launcher: bool,
    pub desktop_launcher_name: String,
    pub editor: String,
}

/// On-disk shape of the config file. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    config_version: Option<u32>,
    vault_root: Option<String>,
    project_vault_dir: Option<String>,
    mount_dir: Option<String>,
    auto_mount: Option<Vec<String>>,
    create_desktop_launcher: Option<bool>,
    desktop_launcher_name: Option<String>,
    editor: Option<String>,
}

impl Config {
    /// Create a config with default settings rooted at `vault_root`.
    ///
    /// A relative `vault_root` is taken against the current directory; `~` is
    /// not expanded here.
    pub fn new(vault_root: impl Into<PathBuf>) -> Self {
        Self {
            config_version: CONFIG_VERSION,
            vault_root: absolutize(&vault_root.into()),
            project_vault_dir: DEFAULT_PROJECT_VAULT_DIR.to_string(),
            mount_dir: DEFAULT_MOUNT_DIR.to_string(),
            auto_mount: vec!["global".to_string()],
            create_desktop_launcher: true,
            desktop_launcher_name: DEFAULT_LAUNCHER_NAME.to_string(),
            editor: DEFAULT_EDITOR.to_string(),
        }
    }

    /// Load the config from `override_path`, `$VAULTCTL_CONFIG`, or the default location.
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        let path = match override_path {
            Some(p) => expand_tilde(p)?,
            None => default_config_path()?,
        };
        Self::load_from(&path)
    }

    /// Load the config from an explicit file path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(VaultError::ConfigNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        log::debug!("loading config from {}", path.display());
        Self::from_toml_str(&content)
    }

    /// Parse config text, applying defaults for missing keys.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let raw: RawConfig = toml::from_str(content)?;

        let vault_root = match raw.vault_root {
            Some(root) => expand_tilde(Path::new(&root))?,
            None => default_vault_root()?,
        };

        let mut config = Self::new(vault_root);
        if let Some(version) = raw.config_version {
            config.config_version = version;
        }
        if let Some(dir) = raw.project_vault_dir {
            config.project_vault_dir = dir;
        }
        if let Some(dir) = raw.mount_dir {
            config.mount_dir = dir;
        }
        if let Some(names) = raw.auto_mount {
            config.auto_mount = dedup_preserving_order(names);
        }
        if let Some(flag) = raw.create_desktop_launcher {
            config.create_desktop_launcher = flag;
        }
        if let Some(name) = raw.desktop_launcher_name {
            config.desktop_launcher_name = name;
        }
        if let Some(editor) = raw.editor {
            config.editor = editor;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check the invariants the vault operations rely on.
    pub fn validate(&self) -> Result<()> {
        if self.config_version != CONFIG_VERSION {
            return Err(VaultError::Config(format!(
                "unsupported config_version {} (expected {})",
                self.config_version, CONFIG_VERSION
            )));
        }
        require_single_component("project_vault_dir", &self.project_vault_dir)?;
        require_single_component("mount_dir", &self.mount_dir)?;
        require_single_component("desktop_launcher_name", &self.desktop_launcher_name)?;
        Ok(())
    }
}

/// Location of the config file when no override is given.
pub fn default_config_path() -> Result<PathBuf> {
    if let Ok(env) = std::env::var(CONFIG_ENV) {
        if !env.is_empty() {
            return expand_tilde(Path::new(&env));
        }
    }
    Ok(home_dir()?.join(".config").join("vaultctl").join("config.toml"))
}

fn default_vault_root() -> Result<PathBuf> {
    Ok(home_dir()?.join("vaults"))
}

fn home_dir() -> Result<PathBuf> {
    require_home(dirs::home_dir())
}

fn require_home(home: Option<PathBuf>) -> Result<PathBuf> {
    home.ok_or_else(|| {
        VaultError::Config(
            "cannot determine the home directory; set vault_root and pass --config explicitly"
                .to_string(),
        )
    })
}

/// Expand a leading `~` to the user's home directory.
///
/// Fails only when the path starts with `~` and no home directory is known.
pub fn expand_tilde(path: &Path) -> Result<PathBuf> {
    match path.strip_prefix("~") {
        Ok(rest) => Ok(home_dir()?.join(rest)),
        Err(_) => Ok(path.to_path_buf()),
    }
}

fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path.to_path_buf(),
    }
}

fn require_single_component(key: &str, value: &str) -> Result<()> {
    let mut components = Path::new(value).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(VaultError::Config(format!(
            "{} must be a single directory name, got '{}'",
            key, value
        ))),
    }
}

fn dedup_preserving_order(names: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        if !out.contains(&name) {
            out.push(name);
        }
    }
    out
}
