use ignore::{DirEntry, WalkBuilder};
use log::{debug, trace, warn};
use std::path::PathBuf;

use crate::constants::EXCLUDED_DIRS;

pub struct CollectorConfig<'a> {
    pub roots: &'a [PathBuf],
    /// Extensions to keep, with or without the leading dot
    pub extensions: &'a [String],
    pub respect_gitignore: bool,
}

/// Enumerates candidate files under every root, sorted and deduplicated.
///
/// Missing roots and unreadable directory entries are skipped, never fatal.
pub fn collect_files(cfg: &CollectorConfig) -> Vec<PathBuf> {
    debug!("Collecting files with extensions {:?}", cfg.extensions);
    let extensions: Vec<&str> =
        cfg.extensions.iter().map(|e| e.strip_prefix('.').unwrap_or(e)).collect();
    let mut files: Vec<PathBuf> = Vec::new();

    for root in cfg.roots {
        if !root.is_dir() {
            warn!("Skipping root {}: not a directory", root.display());
            continue;
        }
        debug!("Walking directory tree from root: {}", root.display());

        let walker = WalkBuilder::new(root)
            .hidden(false)
            .ignore(cfg.respect_gitignore)
            .git_ignore(cfg.respect_gitignore)
            .require_git(false)
            .filter_entry(|dent| !is_excluded_dir(dent))
            .build();

        for res in walker {
            let dent = match res {
                Ok(dent) => dent,
                Err(e) => {
                    debug!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };
            let p = dent.path();
            if !dent.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }

            if let Some(ext) = p.extension().and_then(|e| e.to_str())
                && extensions.contains(&ext)
            {
                trace!("Found candidate file: {}", p.display());
                files.push(p.to_path_buf());
            }
        }
    }

    files.sort();
    files.dedup();
    debug!("Collected {} files", files.len());
    files
}

fn is_excluded_dir(dent: &DirEntry) -> bool {
    dent.file_type().is_some_and(|ft| ft.is_dir())
        && dent.file_name().to_str().is_some_and(|name| EXCLUDED_DIRS.contains(&name))
}
