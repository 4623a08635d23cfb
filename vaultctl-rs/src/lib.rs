//! vaultctl - global note vaults and per-project vaults that mount them.
//!
//! # Overview
//!
//! Global vaults are plain directories directly under a configured
//! `vault_root`. A project vault lives inside a project (by default in
//! `.vault/`) and links global vaults into its mount directory (by default
//! `_m/`) as directory symlinks. The library enforces the structural rules
//! that keep this hierarchy sound:
//! - a global vault never contains a mount directory,
//! - a project vault is never created at `vault_root` or below one of its global vault entries,
//! - mount links always point at an existing global vault by absolute path,
//! - mounting the same vault twice is a no-op, and existing entries are never overwritten.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use vaultctl::{Config, discover_globals, mount_global_into_project};
//!
//! let config = Config::load(None).unwrap();
//!
//! for global in &discover_globals(&config).unwrap() {
//!     println!("{}\t{}", global.name, global.path.display());
//! }
//!
//! let mount = mount_global_into_project(&config, Path::new("/home/u/proj"), "global").unwrap();
//! println!("{} -> {}", mount.link.display(), mount.target.display());
//! ```

pub mod classify;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod mount;
pub mod project;
pub mod registry;
pub mod scaffold;
pub mod vault;

// Re-export main types at crate root
pub use classify::{
    GlobalClass, InvalidReason, classify_global, is_ignored_root_entry, is_inside_global_vault,
    is_mountable_global, validate_project_root,
};
pub use config::Config;
pub use error::{Result, VaultError};
pub use mount::{
    Mount, MountEntry, MountOutcome, MountStatus, list_mounts, mount_global_into_project,
    unmount_global_from_project,
};
pub use project::{InitReport, init_project};
pub use registry::{GlobalVault, GlobalVaults, discover_globals};
pub use vault::{ProjectVault, ensure_global_vault, ensure_project_vault, project_paths};
