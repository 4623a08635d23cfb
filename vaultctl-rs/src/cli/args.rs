//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "vaultctl")]
#[command(author, version, about = "Manage global note vaults and mount them into project vaults", long_about = None)]
pub struct Cli {
    /// Path to the config file (overrides $VAULTCTL_CONFIG)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output as JSON (default)
    #[arg(long, global = true, conflicts_with_all = ["yaml", "toml"])]
    pub json: bool,

    /// Output as YAML
    #[arg(long, global = true, conflicts_with_all = ["json", "toml"])]
    pub yaml: bool,

    /// Output as TOML
    #[arg(long, global = true, conflicts_with_all = ["json", "yaml"])]
    pub toml: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (can be repeated)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn output_format(&self) -> OutputFormat {
        if self.yaml {
            OutputFormat::Yaml
        } else if self.toml {
            OutputFormat::Toml
        } else {
            OutputFormat::Json
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
    Toml,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a project vault, or create a global vault under vault_root
    Init(InitArgs),

    /// Mount a global vault into the project vault
    Mount(MountArgs),

    /// Remove a mounted global vault from the project vault
    Unmount(MountArgs),

    /// List global vaults and, inside a project, its current mounts
    List(ListArgs),
}

// === Init ===

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Project root
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Create a global vault with this NAME instead of a project vault
    #[arg(short, long = "global", value_name = "NAME")]
    pub global_name: Option<String>,
}

// === Mount / Unmount ===

#[derive(Parser, Debug)]
pub struct MountArgs {
    /// Name of the global vault folder under vault_root
    pub name: String,

    /// Project root
    #[arg(long, default_value = ".")]
    pub path: PathBuf,
}

// === List ===

#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Project root
    #[arg(long, default_value = ".")]
    pub path: PathBuf,
}
