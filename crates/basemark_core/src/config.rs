use anyhow::{Context, Result, anyhow};
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::constants::{DEFAULT_EXTENSIONS, DEFAULT_HIGHLIGHT_COLOR};

/// User-facing configuration. Only `file_extensions` and `respect_gitignore`
/// influence classification; the rest is for whoever renders decorations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub enabled: bool,
    pub highlight_color: String,
    pub use_symbol: bool,
    pub symbol_color: String,
    pub file_extensions: Vec<String>,
    pub respect_gitignore: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enabled: true,
            highlight_color: DEFAULT_HIGHLIGHT_COLOR.to_string(),
            use_symbol: false,
            symbol_color: DEFAULT_HIGHLIGHT_COLOR.to_string(),
            file_extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            respect_gitignore: true,
        }
    }
}

/// Loads settings from a JSON file. A missing file yields the defaults.
pub fn load_settings(path: &Path) -> Result<Settings> {
    if !path.exists() {
        debug!("No settings file at {}, using defaults", path.display());
        return Ok(Settings::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings from {}", path.display()))?;
    let settings: Settings = serde_json::from_str(&content)
        .with_context(|| format!("Invalid settings in {}", path.display()))?;
    debug!("Loaded settings from {}: {:?}", path.display(), settings);
    Ok(settings)
}

pub fn find_git_root() -> Result<PathBuf> {
    find_git_root_from(&env::current_dir()?)
}

pub fn find_git_root_from(start: &Path) -> Result<PathBuf> {
    debug!("Searching for git root");
    let mut current_dir = start.to_path_buf();
    trace!("Starting search from: {:?}", current_dir);

    loop {
        let git_dir = current_dir.join(".git");
        trace!("Checking for .git at: {:?}", git_dir);
        if git_dir.exists() {
            debug!("Found git root at: {:?}", current_dir);
            return Ok(current_dir);
        }

        match current_dir.parent() {
            Some(parent) => current_dir = parent.to_path_buf(),
            None => {
                debug!("Could not find .git directory in any parent folder");
                return Err(anyhow!("Could not find .git directory in any parent folder"));
            }
        }
    }
}
