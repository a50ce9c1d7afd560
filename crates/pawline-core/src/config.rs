//! Synchronization configuration.

use std::time::Duration;

/// Default interval between inquiry-list refreshes while a session exists.
pub const INQUIRY_POLL_INTERVAL: Duration = Duration::from_secs(15);

/// Default interval between message refreshes while a thread is open.
pub const THREAD_POLL_INTERVAL: Duration = Duration::from_secs(8);

/// Polling configuration for the registry and thread synchronizers.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// How often the inquiry list is refreshed.
    pub inquiry_poll_interval: Duration,
    /// How often an open thread is refreshed.
    pub thread_poll_interval: Duration,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            inquiry_poll_interval: INQUIRY_POLL_INTERVAL,
            thread_poll_interval: THREAD_POLL_INTERVAL,
        }
    }
}

impl SyncConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the inquiry-list poll interval.
    #[must_use]
    pub const fn inquiry_poll_interval(mut self, interval: Duration) -> Self {
        self.inquiry_poll_interval = interval;
        self
    }

    /// Sets the open-thread poll interval.
    #[must_use]
    pub const fn thread_poll_interval(mut self, interval: Duration) -> Self {
        self.thread_poll_interval = interval;
        self
    }
}
