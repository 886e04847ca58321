use anyhow::{Context, Result};
use log::{debug, info, trace, warn};
use notify::{Config as NotifyConfig, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::{
    ops::ControlFlow,
    path::{Path, PathBuf},
    sync::mpsc::{self, RecvTimeoutError},
    thread,
    time::{Duration, Instant},
};

use crate::{
    config::Config,
    index::BaseFileIndex,
    policy::{Debouncer, RefreshPolicy},
    types::{Snapshot, Trigger},
};

struct FsWatcher {
    // Keep watcher alive
    _watcher: RecommendedWatcher,
    rx: mpsc::Receiver<notify::Result<Event>>,
}

enum Next {
    Event(Event),
    Idle,
    Closed,
}

impl FsWatcher {
    fn new(roots: &[PathBuf], settings: Option<&Path>) -> notify::Result<Self> {
        let (tx, rx) = mpsc::channel();
        let mut watcher = RecommendedWatcher::new(
            move |res| {
                let _ = tx.send(res);
            },
            NotifyConfig::default(),
        )?;

        for root in roots.iter().filter(|r| r.is_dir()) {
            watcher.watch(root, RecursiveMode::Recursive)?;
        }

        // A settings file outside every root needs its own watch on the parent
        if let Some(parent) = settings.and_then(Path::parent)
            && parent.is_dir()
            && !roots.iter().any(|root| parent.starts_with(root))
        {
            watcher.watch(parent, RecursiveMode::NonRecursive)?;
        }

        Ok(Self { _watcher: watcher, rx })
    }

    /// Waits up to `timeout` for an event, or indefinitely when `None`
    fn next(&self, timeout: Option<Duration>) -> Next {
        let res = match timeout {
            Some(timeout) => match self.rx.recv_timeout(timeout) {
                Ok(res) => res,
                Err(RecvTimeoutError::Timeout) => return Next::Idle,
                Err(RecvTimeoutError::Disconnected) => return Next::Closed,
            },
            None => match self.rx.recv() {
                Ok(res) => res,
                Err(_) => return Next::Closed,
            },
        };

        match res {
            Ok(event) => Next::Event(event),
            Err(e) => {
                warn!("File watcher error: {}", e);
                Next::Idle
            }
        }
    }

    fn drain(&self) -> usize {
        self.rx.try_iter().count()
    }
}

/// Maps a raw notification to a refresh trigger.
///
/// Reads are ignored. A change to the settings file is a configuration trigger;
/// any other change under a root is a file-system trigger.
pub fn trigger_for_event(
    event: &Event,
    roots: &[PathBuf],
    settings: Option<&Path>,
) -> Option<Trigger> {
    if matches!(event.kind, EventKind::Access(_)) {
        return None;
    }

    if let Some(settings) = settings
        && event.paths.iter().any(|p| p == settings)
    {
        return Some(Trigger::Configuration);
    }

    event
        .paths
        .iter()
        .any(|p| roots.iter().any(|root| p.starts_with(root)))
        .then_some(Trigger::FileSystem)
}

/// Runs the refresh loop until `on_refresh` breaks or the watcher shuts down.
///
/// The first refresh happens after the startup delay. Later ones are debounced, and
/// every one of them rescans the whole tree.
pub fn watch<F>(
    index: &BaseFileIndex,
    cfg: &Config,
    policy: RefreshPolicy,
    mut on_refresh: F,
) -> Result<()>
where
    F: FnMut(Trigger, &Snapshot) -> ControlFlow<()>,
{
    let settings_path = cfg.settings.as_deref();
    let watcher = FsWatcher::new(index.roots(), settings_path)
        .context("Failed to start file system watcher")?;
    info!("Watching {} roots (debounce {:?})", index.roots().len(), policy.debounce);

    debug!("Waiting {:?} before the first scan", policy.startup_delay);
    thread::sleep(policy.startup_delay);
    let dropped = watcher.drain();
    trace!("Dropped {} events received during startup", dropped);
    if on_refresh(Trigger::Startup, &index.refresh()).is_break() {
        return Ok(());
    }

    let mut debouncer = Debouncer::new(policy.debounce);
    loop {
        match watcher.next(debouncer.time_until_due(Instant::now())) {
            Next::Event(event) => {
                trace!("Watcher event: {:?}", event);
                if let Some(trigger) = trigger_for_event(&event, index.roots(), settings_path) {
                    debouncer.record(trigger, Instant::now());
                }
            }
            Next::Idle => {}
            Next::Closed => {
                debug!("Watcher channel closed");
                break;
            }
        }

        let Some(trigger) = debouncer.take_due(Instant::now()) else {
            continue;
        };

        if trigger == Trigger::Configuration {
            reload_settings(index, cfg);
        }

        info!("Refreshing after {:?} change", trigger);
        if on_refresh(trigger, &index.refresh()).is_break() {
            break;
        }
    }

    Ok(())
}

/// Returns false and keeps the current settings when the file cannot be loaded
fn reload_settings(index: &BaseFileIndex, cfg: &Config) -> bool {
    match cfg.load_settings() {
        Ok(settings) => {
            index.update_settings(settings);
            true
        }
        Err(e) => {
            warn!("Keeping previous settings: {:#}", e);
            false
        }
    }
}
