use std::{collections::HashSet, path::PathBuf, time::SystemTime};

/// Result of one complete refresh. Replaced as a whole, never patched.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub base_files: HashSet<PathBuf>,
    pub files_analyzed: usize,
    /// 0 until the first refresh completes
    pub generation: u64,
    pub refreshed_at: Option<SystemTime>,
}

/// Why a refresh was requested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Startup,
    FileSystem,
    /// Settings changed; reload them before rescanning
    Configuration,
}
