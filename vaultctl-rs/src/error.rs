//! Error types and exit codes for vaultctl.

use std::path::PathBuf;
use thiserror::Error;

/// Process exit codes, one per failure family.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const NOT_FOUND: i32 = 2;
    pub const ALREADY_EXISTS: i32 = 3;
    pub const INVALID_LOCATION: i32 = 4;
    pub const INVALID_NAME: i32 = 5;
    pub const STRUCTURAL_VIOLATION: i32 = 6;
    pub const CONFIG_ERROR: i32 = 7;
}

/// Main error type for vault operations.
#[derive(Error, Debug)]
pub enum VaultError {
    #[error("Global vault '{name}' not found under {} (or it is ignored/invalid)", .vault_root.display())]
    NotFound { name: String, vault_root: PathBuf },

    #[error("Mountpoint already exists: {0}")]
    AlreadyExists(PathBuf),

    #[error("Invalid location {}: {reason}", .path.display())]
    InvalidLocation { path: PathBuf, reason: String },

    #[error("Invalid global vault name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    #[error("Refusing to use global vault at {}: found forbidden mount dir {}", .vault.display(), .mount_dir.display())]
    StructuralViolation { vault: PathBuf, mount_dir: PathBuf },

    #[error("Global vault '{name}' is not mounted at {}", .link.display())]
    NotMounted { name: String, link: PathBuf },

    #[error("Not a mount (expected a symlink): {0}")]
    NotAMount(PathBuf),

    #[error("No config file found at: {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Logging error: {0}")]
    Logging(#[from] flexi_logger::FlexiLoggerError),
}

impl VaultError {
    /// Returns the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            VaultError::NotFound { .. } | VaultError::NotMounted { .. } => exit_code::NOT_FOUND,
            VaultError::AlreadyExists(_) | VaultError::NotAMount(_) => exit_code::ALREADY_EXISTS,
            VaultError::InvalidLocation { .. } => exit_code::INVALID_LOCATION,
            VaultError::InvalidName { .. } => exit_code::INVALID_NAME,
            VaultError::StructuralViolation { .. } => exit_code::STRUCTURAL_VIOLATION,
            VaultError::ConfigNotFound(_) | VaultError::Config(_) | VaultError::TomlParse(_) => {
                exit_code::CONFIG_ERROR
            }
            _ => exit_code::GENERAL_ERROR,
        }
    }

    pub(crate) fn invalid_location(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        VaultError::InvalidLocation {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_name(name: &str, reason: impl Into<String>) -> Self {
        VaultError::InvalidName {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for vault operations.
pub type Result<T> = std::result::Result<T, VaultError>;
