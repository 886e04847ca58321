use std::time::{Duration, Instant};

use crate::types::Trigger;

/// Delay before the first scan, letting the host settle
pub const DEFAULT_STARTUP_DELAY: Duration = Duration::from_millis(1000);

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// When the watch loop rescans. Every refresh is a full rescan; this only decides
/// how often one happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshPolicy {
    pub startup_delay: Duration,
    /// Quiet period required after the last trigger before rescanning
    pub debounce: Duration,
}

impl Default for RefreshPolicy {
    fn default() -> Self {
        Self { startup_delay: DEFAULT_STARTUP_DELAY, debounce: DEFAULT_DEBOUNCE }
    }
}

/// Coalesces bursts of triggers into a single refresh.
#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    last_trigger: Option<Instant>,
    config_changed: bool,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self { window, last_trigger: None, config_changed: false }
    }

    pub fn record(&mut self, trigger: Trigger, now: Instant) {
        if trigger == Trigger::Configuration {
            self.config_changed = true;
        }
        self.last_trigger = Some(now);
    }

    /// How long to wait for more events before the pending batch is due
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.last_trigger.map(|last| (last + self.window).saturating_duration_since(now))
    }

    /// Takes the pending batch once it has been quiet for the whole window.
    ///
    /// A batch containing a configuration change is reported as
    /// [`Trigger::Configuration`].
    pub fn take_due(&mut self, now: Instant) -> Option<Trigger> {
        let last = self.last_trigger?;
        if now.saturating_duration_since(last) < self.window {
            return None;
        }

        self.last_trigger = None;
        let trigger = if self.config_changed { Trigger::Configuration } else { Trigger::FileSystem };
        self.config_changed = false;
        Some(trigger)
    }
}
