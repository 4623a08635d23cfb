//! Discovery of global vaults under `vault_root`.

use crate::classify::is_mountable_global;
use crate::config::Config;
use crate::error::Result;
use serde::Serialize;
use std::path::PathBuf;

/// A discovered global vault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GlobalVault {
    pub name: String,
    pub path: PathBuf,
}

/// Valid global vaults, ordered by case-insensitive name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GlobalVaults {
    entries: Vec<GlobalVault>,
}

impl GlobalVaults {
    /// Look up a vault by its exact name.
    pub fn get(&self, name: &str) -> Option<&GlobalVault> {
        self.entries.iter().find(|v| v.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GlobalVault> {
        self.entries.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|v| v.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a GlobalVaults {
    type Item = &'a GlobalVault;
    type IntoIter = std::slice::Iter<'a, GlobalVault>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Enumerate the valid global vaults under `vault_root`.
///
/// Creates `vault_root` when it does not exist yet; an empty root is a valid
/// state. Entries whose names are not valid UTF-8 are skipped.
pub fn discover_globals(config: &Config) -> Result<GlobalVaults> {
    let root = &config.vault_root;
    std::fs::create_dir_all(root)?;

    let mut entries = Vec::new();
    for entry in std::fs::read_dir(root)? {
        let entry = entry?;
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        let path = root.join(&name);
        if is_mountable_global(config, &path) {
            entries.push(GlobalVault { name, path });
        }
    }

    entries.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name))
    });

    Ok(GlobalVaults { entries })
}
