//! Handles for background polling tasks.

use tokio::task::JoinHandle;

/// Owner handle for a background polling loop.
///
/// Dropping the handle aborts the loop, so polling stops when its owning
/// scope is torn down — a closed thread view or an ended account session.
#[derive(Debug)]
pub struct PollerHandle {
    task: JoinHandle<()>,
}

impl PollerHandle {
    pub(crate) const fn new(task: JoinHandle<()>) -> Self {
        Self { task }
    }

    /// Stop the polling loop explicitly.
    pub fn stop(&self) {
        self.task.abort();
    }

    /// Whether the loop has stopped.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
