//! Single-flight guard for polled operations.
//!
//! Overlapping timers can trigger the same fetch again while one is still
//! outstanding. The guard makes the duplicate trigger a no-op: it is
//! dropped, not queued.

use std::sync::atomic::{AtomicBool, Ordering};

/// Ensures at most one instance of an async operation runs at a time.
///
/// ```ignore
/// let Some(_guard) = self.refresh_gate.try_begin() else {
///     return; // a refresh is already in flight
/// };
/// self.do_refresh().await;
/// // guard dropped here, next trigger may run
/// ```
#[derive(Debug, Default)]
pub struct SingleFlight {
    busy: AtomicBool,
}

impl SingleFlight {
    /// Create a new, idle guard.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            busy: AtomicBool::new(false),
        }
    }

    /// Try to claim the flight. Returns `None` if one is already running.
    ///
    /// The claim is released when the returned guard is dropped.
    #[must_use]
    pub fn try_begin(&self) -> Option<FlightGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| FlightGuard { busy: &self.busy })
    }

    /// Whether a flight is currently running.
    #[must_use]
    pub fn in_flight(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Releases the claimed flight on drop.
#[derive(Debug)]
pub struct FlightGuard<'a> {
    busy: &'a AtomicBool,
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}
