//! Locally cached inquiry list for the current account.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tokio::sync::watch;
use tracing::{debug, warn};

use super::model::{Inquiry, InquiryId, InquiryStatus, PetAvailability};
use crate::account::{AccountRole, Session};
use crate::config::SyncConfig;
use crate::flight::SingleFlight;
use crate::gateway::{InquiryGateway, MessageGateway};
use crate::ledger::AcknowledgementLedger;
use crate::notify::Notifier;
use crate::poll::PollerHandle;
use crate::thread::ThreadSynchronizer;
use crate::{Error, Result};

/// Read-only view of the registry published to subscribers.
#[derive(Debug, Clone, Default)]
pub struct InquirySnapshot {
    /// Every inquiry visible to the current account, as last fetched.
    pub inquiries: Vec<Inquiry>,
    /// How many of them currently need the user's attention.
    pub unread_count: usize,
}

/// Owns the set of inquiries visible to the current account.
///
/// Polls the remote store to keep the cached list fresh, derives the unread
/// count from the list + role + acknowledgement ledger, and executes status
/// transitions. Mutations follow a last-write-wins contract: this is
/// single-user client state, not a multi-writer server store.
pub struct InquiryRegistry {
    gateway: Arc<dyn InquiryGateway>,
    messages: Arc<dyn MessageGateway>,
    ledger: AcknowledgementLedger,
    session: Session,
    notifier: Notifier,
    config: SyncConfig,
    state: RwLock<Vec<Inquiry>>,
    refresh_gate: SingleFlight,
    snapshot_tx: watch::Sender<InquirySnapshot>,
    snapshot_rx: watch::Receiver<InquirySnapshot>,
}

impl InquiryRegistry {
    /// Create a registry for one account session.
    ///
    /// The list starts empty; call [`refresh`](Self::refresh) or start a
    /// poller to populate it.
    #[must_use]
    pub fn new(
        session: Session,
        gateway: Arc<dyn InquiryGateway>,
        messages: Arc<dyn MessageGateway>,
        ledger: AcknowledgementLedger,
        notifier: Notifier,
        config: SyncConfig,
    ) -> Arc<Self> {
        let (snapshot_tx, snapshot_rx) = watch::channel(InquirySnapshot::default());
        Arc::new(Self {
            gateway,
            messages,
            ledger,
            session,
            notifier,
            config,
            state: RwLock::new(Vec::new()),
            refresh_gate: SingleFlight::new(),
            snapshot_tx,
            snapshot_rx,
        })
    }

    /// The session this registry is scoped to.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Subscribe to list + unread-count updates.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<InquirySnapshot> {
        self.snapshot_rx.clone()
    }

    /// The cached inquiry list, as last fetched.
    #[must_use]
    pub fn inquiries(&self) -> Vec<Inquiry> {
        self.read_state().clone()
    }

    /// How many inquiries currently need the user's attention.
    #[must_use]
    pub fn unread_count(&self) -> usize {
        self.count_unread(&self.read_state())
    }

    /// Re-fetch the inquiry list from the remote store.
    ///
    /// Single-flighted: a call while another refresh is outstanding is
    /// dropped, not queued. Fetch failures are logged and swallowed; the
    /// previously cached list stays in place and the next poll retries.
    pub async fn refresh(&self) {
        let Some(_guard) = self.refresh_gate.try_begin() else {
            debug!("inquiry refresh already in flight, dropping trigger");
            return;
        };
        match self.gateway.fetch_inquiries(&self.session.account_id).await {
            Ok(inquiries) => {
                *self.write_state() = inquiries;
                self.publish();
            }
            Err(e) => warn!(error = %e, "inquiry refresh failed, keeping cached list"),
        }
    }

    /// Record that the user opened this inquiry.
    ///
    /// Clears the local unread flag right away so the UI settles, records
    /// the ID in the durable ledger, then syncs best-effort state: the
    /// remote read markers, and — when a shelter opens a `New` inquiry —
    /// the automatic move to `Contacted`. The best-effort steps log their
    /// failures and never surface them.
    ///
    /// # Errors
    ///
    /// Returns an error if the inquiry is not in the cached list or the
    /// ledger write fails.
    pub async fn acknowledge(&self, inquiry_id: &InquiryId) -> Result<()> {
        let inquiry = {
            let mut state = self.write_state();
            let Some(found) = state.iter_mut().find(|i| &i.id == inquiry_id) else {
                return Err(Error::InquiryNotFound(inquiry_id.clone()));
            };
            found.has_unread_messages = false;
            found.clone()
        };
        self.publish();

        self.ledger.add(inquiry_id).await?;
        // Ledger membership feeds the unread count.
        self.publish();

        if let Err(e) = self
            .messages
            .mark_messages_read(inquiry_id, &self.session.account_id)
            .await
        {
            warn!(inquiry = %inquiry_id, error = %e, "mark-read sync failed");
        }

        if self.session.role == AccountRole::Shelter && inquiry.status == InquiryStatus::New {
            match self
                .gateway
                .set_inquiry_status(inquiry_id, InquiryStatus::Contacted)
                .await
            {
                Ok(()) => {
                    self.apply_status(inquiry_id, InquiryStatus::Contacted);
                    self.publish();
                }
                Err(e) => {
                    warn!(inquiry = %inquiry_id, error = %e, "auto-contact transition failed");
                }
            }
        }

        Ok(())
    }

    /// Write a status change for one inquiry.
    ///
    /// Approving also marks the pet as adopted. That side effect is not
    /// transactional: if the pet write fails the approval stands, but the
    /// call reports [`Error::PetUpdateFailed`] so the caller knows the pet
    /// record is out of step.
    ///
    /// # Errors
    ///
    /// Returns an error if the inquiry is unknown, the state machine forbids
    /// the transition, or a gateway write fails. Gateway failures also emit
    /// an error notification.
    pub async fn set_status(&self, inquiry_id: &InquiryId, status: InquiryStatus) -> Result<()> {
        let inquiry = self.get(inquiry_id)?;
        if !inquiry.status.can_transition_to(status) {
            return Err(Error::InvalidTransition {
                from: inquiry.status,
                to: status,
            });
        }

        if let Err(e) = self.gateway.set_inquiry_status(inquiry_id, status).await {
            self.notifier
                .error(format!("Could not update the inquiry: {e}"));
            return Err(e.into());
        }
        self.apply_status(inquiry_id, status);
        self.publish();

        if status == InquiryStatus::Approved {
            if let Err(e) = self
                .gateway
                .set_pet_availability(&inquiry.pet_id, PetAvailability::Adopted)
                .await
            {
                self.notifier.error(format!(
                    "Inquiry approved, but marking {} as adopted failed: {e}",
                    inquiry.pet_name
                ));
                return Err(Error::PetUpdateFailed { source: e });
            }
            self.notifier
                .success(format!("{} is off to a new home!", inquiry.pet_name));
        }

        Ok(())
    }

    /// Persist a newly submitted inquiry, then re-fetch the whole list.
    ///
    /// No optimistic insert: the refresh brings back the stored record with
    /// any server-computed fields in one consistent sweep.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway rejects the inquiry. That failure
    /// also emits an error notification.
    pub async fn create(&self, inquiry: &Inquiry) -> Result<()> {
        if let Err(e) = self.gateway.create_inquiry(inquiry).await {
            self.notifier
                .error(format!("Could not submit the application: {e}"));
            return Err(e.into());
        }
        self.refresh().await;
        Ok(())
    }

    /// Open one inquiry's chat thread.
    ///
    /// # Errors
    ///
    /// Returns an error if the inquiry is not in the cached list.
    pub fn open_inquiry(self: &Arc<Self>, inquiry_id: &InquiryId) -> Result<Arc<ThreadSynchronizer>> {
        let inquiry = self.get(inquiry_id)?;
        Ok(ThreadSynchronizer::open(
            inquiry,
            Arc::clone(&self.messages),
            Arc::clone(self),
        ))
    }

    /// Start the background refresh loop.
    ///
    /// The first tick fires immediately (the login-time refresh), then every
    /// [`SyncConfig::inquiry_poll_interval`]. Polling stops when the handle
    /// is dropped.
    #[must_use]
    pub fn spawn_poller(self: &Arc<Self>) -> PollerHandle {
        let registry = Arc::clone(self);
        let every = self.config.inquiry_poll_interval;
        PollerHandle::new(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            loop {
                ticker.tick().await;
                registry.refresh().await;
            }
        }))
    }

    pub(crate) const fn sync_config(&self) -> &SyncConfig {
        &self.config
    }

    fn get(&self, inquiry_id: &InquiryId) -> Result<Inquiry> {
        self.read_state()
            .iter()
            .find(|i| &i.id == inquiry_id)
            .cloned()
            .ok_or_else(|| Error::InquiryNotFound(inquiry_id.clone()))
    }

    fn apply_status(&self, inquiry_id: &InquiryId, status: InquiryStatus) {
        let mut state = self.write_state();
        if let Some(inquiry) = state.iter_mut().find(|i| &i.id == inquiry_id) {
            inquiry.status = status;
        }
    }

    fn count_unread(&self, inquiries: &[Inquiry]) -> usize {
        inquiries
            .iter()
            .filter(|i| i.needs_attention(self.session.role, self.ledger.contains(&i.id)))
            .count()
    }

    fn publish(&self) {
        let inquiries = self.read_state().clone();
        let unread_count = self.count_unread(&inquiries);
        self.snapshot_tx.send_replace(InquirySnapshot {
            inquiries,
            unread_count,
        });
    }

    fn read_state(&self) -> RwLockReadGuard<'_, Vec<Inquiry>> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, Vec<Inquiry>> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for InquiryRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InquiryRegistry")
            .field("session", &self.session)
            .field("inquiries", &self.read_state().len())
            .finish_non_exhaustive()
    }
}
