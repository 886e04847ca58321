use anyhow::Result;
use clap::{Args, Parser};
use log::{debug, info, warn};
use std::{path::PathBuf, time::Duration};

use basemark_core::{SETTINGS_FILE_NAME, Settings, load_settings};

use crate::policy::RefreshPolicy;

#[derive(Debug, Clone, Parser)]
#[command(name = "basemark-index")]
#[command(about = "Find source files that import only external packages")]
pub struct Config {
    /// Root directories to scan (defaults to git root)
    #[arg(long = "root")]
    pub roots: Vec<PathBuf>,

    /// Settings file (defaults to .basemark.json in the first root)
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// File extensions to scan, overriding the settings file (e.g. --ext .py,.ts)
    #[arg(long = "ext", value_delimiter = ',')]
    pub extensions: Vec<String>,
}

/// Flags that only matter to the watch loop
#[derive(Debug, Clone, Args)]
pub struct WatchOptions {
    /// Quiet period after a change before rescanning
    #[arg(long, default_value = "300")]
    pub debounce_ms: u64,

    /// Delay before the first scan
    #[arg(long, default_value = "1000")]
    pub startup_delay_ms: u64,
}

impl WatchOptions {
    pub fn policy(&self) -> RefreshPolicy {
        RefreshPolicy {
            startup_delay: Duration::from_millis(self.startup_delay_ms),
            debounce: Duration::from_millis(self.debounce_ms),
        }
    }
}

impl Config {
    /// Resolves roots and the settings path.
    ///
    /// Without explicit roots the git root is used; when there is none the root list
    /// stays empty and every scan yields an empty set.
    pub fn initialize(&mut self) -> Result<()> {
        if self.roots.is_empty() {
            debug!("No root provided, searching for git root");
            match basemark_core::find_git_root() {
                Ok(root) => self.roots.push(root),
                Err(e) => warn!("No root to scan: {}", e),
            }
        }

        self.roots = std::mem::take(&mut self.roots)
            .into_iter()
            .map(|r| r.canonicalize().unwrap_or(r))
            .collect();
        for root in &self.roots {
            info!("Using root directory: {}", root.display());
        }

        self.settings = match self.settings.take() {
            // Watcher events carry canonical paths
            Some(path) => Some(path.canonicalize().unwrap_or(path)),
            None => self.roots.first().map(|root| root.join(SETTINGS_FILE_NAME)),
        };
        debug!("Settings file: {:?}", self.settings);
        Ok(())
    }

    /// Reads the settings file and applies command-line overrides
    pub fn load_settings(&self) -> Result<Settings> {
        let mut settings = match &self.settings {
            Some(path) => load_settings(path)?,
            None => Settings::default(),
        };
        if !self.extensions.is_empty() {
            debug!("Overriding file extensions with {:?}", self.extensions);
            settings.file_extensions = self.extensions.clone();
        }
        Ok(settings)
    }
}
