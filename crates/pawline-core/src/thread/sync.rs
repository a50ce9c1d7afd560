//! Per-thread message synchronization.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tokio::sync::watch;
use tracing::warn;

use super::model::{Message, merge_thread};
use crate::account::{AccountId, AccountRole, Session};
use crate::gateway::MessageGateway;
use crate::inquiry::{Inquiry, InquiryRegistry};
use crate::poll::PollerHandle;
use crate::{Error, Result};

/// Live view of one inquiry's chat thread.
///
/// Owns the merged, deduplicated, chronologically ordered message list for
/// a single open conversation: polls the message store, folds in the
/// synthetic opening message, and appends outbound sends. Created through
/// [`InquiryRegistry::open_inquiry`].
pub struct ThreadSynchronizer {
    inquiry: Inquiry,
    gateway: Arc<dyn MessageGateway>,
    registry: Arc<InquiryRegistry>,
    session: Session,
    state: RwLock<Vec<Message>>,
    snapshot_tx: watch::Sender<Vec<Message>>,
    snapshot_rx: watch::Receiver<Vec<Message>>,
}

impl ThreadSynchronizer {
    pub(crate) fn open(
        inquiry: Inquiry,
        gateway: Arc<dyn MessageGateway>,
        registry: Arc<InquiryRegistry>,
    ) -> Arc<Self> {
        let session = registry.session().clone();
        let (snapshot_tx, snapshot_rx) = watch::channel(Vec::new());
        Arc::new(Self {
            inquiry,
            gateway,
            registry,
            session,
            state: RwLock::new(Vec::new()),
            snapshot_tx,
            snapshot_rx,
        })
    }

    /// The inquiry this thread belongs to, as cached when it was opened.
    #[must_use]
    pub const fn inquiry(&self) -> &Inquiry {
        &self.inquiry
    }

    /// The current merged message list, timestamp ascending.
    #[must_use]
    pub fn messages(&self) -> Vec<Message> {
        self.read_state().clone()
    }

    /// Subscribe to message-list updates.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<Message>> {
        self.snapshot_rx.clone()
    }

    /// Fetch the thread from the remote store and rebuild the merged list.
    ///
    /// The synthetic opening message is reconstructed on every load and
    /// suppressed when a persisted duplicate exists. If the fetch brings
    /// back an unread message someone else wrote, the inquiry is
    /// acknowledged as a side effect — the user is looking at it right now.
    ///
    /// # Errors
    ///
    /// Returns an error if the fetch fails; the previously merged list is
    /// left in place.
    pub async fn load(&self) -> Result<Vec<Message>> {
        let persisted = self.gateway.fetch_messages(&self.inquiry.id).await?;
        let has_foreign_unread = persisted
            .iter()
            .any(|m| !m.read && m.sender_id != self.session.account_id);

        let opening = Message::synthetic(&self.inquiry, self.applicant_hint());
        let merged = merge_thread(Some(opening), persisted);
        *self.write_state() = merged.clone();
        self.publish();

        if has_foreign_unread {
            self.acknowledge().await;
        }

        Ok(merged)
    }

    /// Send an outbound message and append the stored record to the list.
    ///
    /// There is no optimistic insert: on gateway failure the list is
    /// unchanged and the caller handles user-facing error reporting.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyMessage`] for empty or whitespace-only text,
    /// or the gateway failure if persisting fails.
    pub async fn send(&self, text: &str) -> Result<Message> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(Error::EmptyMessage);
        }

        let message = self
            .gateway
            .send_message(&self.inquiry.id, &self.session.account_id, trimmed)
            .await?;
        {
            let mut state = self.write_state();
            state.push(message.clone());
            state.sort_by_key(|m| m.created_at);
        }
        self.publish();

        self.acknowledge().await;

        Ok(message)
    }

    /// Start the background refresh loop for this open thread.
    ///
    /// The first tick fires immediately (the initial load), then every
    /// [`crate::SyncConfig::thread_poll_interval`]. The timer only ever
    /// triggers reads; an overlapping fetch is harmless because fetches are
    /// idempotent. Polling stops when the handle is dropped.
    #[must_use]
    pub fn spawn_poller(self: &Arc<Self>) -> PollerHandle {
        let thread = Arc::clone(self);
        let every = self.registry.sync_config().thread_poll_interval;
        PollerHandle::new(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            loop {
                ticker.tick().await;
                if let Err(e) = thread.load().await {
                    warn!(inquiry = %thread.inquiry.id, error = %e, "thread refresh failed");
                }
            }
        }))
    }

    /// Write-through to the registry; viewing a thread is an acknowledgement.
    async fn acknowledge(&self) {
        if let Err(e) = self.registry.acknowledge(&self.inquiry.id).await {
            warn!(inquiry = %self.inquiry.id, error = %e, "acknowledgement write-through failed");
        }
    }

    /// Applicants viewing their own thread know the applicant ID even when
    /// the inquiry predates their account.
    fn applicant_hint(&self) -> Option<&AccountId> {
        (self.session.role == AccountRole::Applicant).then_some(&self.session.account_id)
    }

    fn publish(&self) {
        self.snapshot_tx.send_replace(self.read_state().clone());
    }

    fn read_state(&self) -> RwLockReadGuard<'_, Vec<Message>> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, Vec<Message>> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for ThreadSynchronizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThreadSynchronizer")
            .field("inquiry", &self.inquiry.id)
            .field("messages", &self.read_state().len())
            .finish_non_exhaustive()
    }
}
