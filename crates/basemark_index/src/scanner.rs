use log::{debug, info};
use rayon::prelude::*;
use std::{
    collections::HashSet,
    path::PathBuf,
    time::{Instant, SystemTime},
};

use basemark_core::{CollectorConfig, ProbeCache, Settings, analyze_file, collect_files};

use crate::types::Snapshot;

/// Full scan of every root. `generation` is stamped by the caller.
pub(crate) fn scan(roots: &[PathBuf], settings: &Settings) -> Snapshot {
    let start = Instant::now();
    let files = collect_files(&CollectorConfig {
        roots,
        extensions: &settings.file_extensions,
        respect_gitignore: settings.respect_gitignore,
    });

    // Probe results are only trusted for the duration of one scan
    let probe_cache = ProbeCache::new();

    debug!("Analyzing {} files in parallel", files.len());
    let base_files: HashSet<PathBuf> = files
        .par_iter()
        .filter(|file| analyze_file(file, &probe_cache))
        .cloned()
        .collect();

    info!(
        "Scanned {} files, {} base files ({}ms, {} probes)",
        files.len(),
        base_files.len(),
        start.elapsed().as_millis(),
        probe_cache.len()
    );

    Snapshot {
        base_files,
        files_analyzed: files.len(),
        generation: 0,
        refreshed_at: Some(SystemTime::now()),
    }
}
