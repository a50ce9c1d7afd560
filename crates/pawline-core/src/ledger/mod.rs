//! Acknowledgement ledger - which inquiries the current user has seen.
//!
//! Status changes that are not new chat messages should notify once, not on
//! every poll. The ledger records the IDs of inquiries the local user has
//! already opened, durably (`SQLite`) so the record survives restarts, and
//! independently of the remote store.
//!
//! Membership is monotonic: an ID is never removed except by an explicit
//! account logout/reset.
//!
//! # Example
//!
//! ```ignore
//! use pawline_core::{AcknowledgementLedger, LedgerRepository};
//!
//! let repo = LedgerRepository::new("/path/to/pawline.db").await?;
//! let ledger = AcknowledgementLedger::load(repo, account_id).await?;
//!
//! if !ledger.contains(&inquiry_id) {
//!     // first time the user sees this one
//!     ledger.add(&inquiry_id).await?;
//! }
//! ```

mod repository;

pub use repository::LedgerRepository;

use std::collections::HashSet;
use std::sync::{PoisonError, RwLock};

use crate::Result;
use crate::account::AccountId;
use crate::inquiry::InquiryId;

/// Durable set of inquiry IDs the current account has acknowledged.
///
/// Keeps an in-memory copy for synchronous lookups (the unread computation
/// runs on every list change) and writes through to the repository on every
/// addition.
#[derive(Debug)]
pub struct AcknowledgementLedger {
    repo: LedgerRepository,
    account_id: AccountId,
    seen: RwLock<HashSet<InquiryId>>,
}

impl AcknowledgementLedger {
    /// Load the ledger for one account from durable storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn load(repo: LedgerRepository, account_id: AccountId) -> Result<Self> {
        let ids = repo.load_ids(&account_id).await?;
        Ok(Self {
            repo,
            account_id,
            seen: RwLock::new(ids.into_iter().collect()),
        })
    }

    /// Whether the account has acknowledged this inquiry.
    #[must_use]
    pub fn contains(&self, inquiry_id: &InquiryId) -> bool {
        self.seen
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(inquiry_id)
    }

    /// Record an acknowledgement. Idempotent.
    ///
    /// Persists before updating the in-memory copy, so `contains` never
    /// reports an acknowledgement that did not reach disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the database write fails.
    pub async fn add(&self, inquiry_id: &InquiryId) -> Result<()> {
        if self.contains(inquiry_id) {
            return Ok(());
        }
        self.repo.add(&self.account_id, inquiry_id).await?;
        self.seen
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(inquiry_id.clone());
        Ok(())
    }

    /// Number of acknowledged inquiries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.seen
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether nothing has been acknowledged yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forget every acknowledgement for this account.
    ///
    /// The one non-monotonic operation, reserved for logout/account reset.
    ///
    /// # Errors
    ///
    /// Returns an error if the database write fails.
    pub async fn reset(&self) -> Result<()> {
        self.repo.clear(&self.account_id).await?;
        self.seen
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    async fn ledger() -> AcknowledgementLedger {
        let repo = LedgerRepository::in_memory().await.unwrap();
        AcknowledgementLedger::load(repo, AccountId::new("acct-1"))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_add_is_idempotent() {
        let ledger = ledger().await;
        let id = InquiryId::new("inq-1");

        assert!(!ledger.contains(&id));
        ledger.add(&id).await.unwrap();
        ledger.add(&id).await.unwrap();

        assert!(ledger.contains(&id));
        assert_eq!(ledger.len(), 1);
    }

    #[tokio::test]
    async fn test_survives_reload() {
        let repo = LedgerRepository::in_memory().await.unwrap();
        let account = AccountId::new("acct-1");

        let first = AcknowledgementLedger::load(repo.clone(), account.clone())
            .await
            .unwrap();
        first.add(&InquiryId::new("inq-1")).await.unwrap();
        drop(first);

        let second = AcknowledgementLedger::load(repo, account).await.unwrap();
        assert!(second.contains(&InquiryId::new("inq-1")));
    }

    #[tokio::test]
    async fn test_ledgers_are_scoped_per_account() {
        let repo = LedgerRepository::in_memory().await.unwrap();
        let mine = AcknowledgementLedger::load(repo.clone(), AccountId::new("acct-1"))
            .await
            .unwrap();
        mine.add(&InquiryId::new("inq-1")).await.unwrap();

        let theirs = AcknowledgementLedger::load(repo, AccountId::new("acct-2"))
            .await
            .unwrap();
        assert!(!theirs.contains(&InquiryId::new("inq-1")));
    }

    #[tokio::test]
    async fn test_reset_clears_everything() {
        let ledger = ledger().await;
        ledger.add(&InquiryId::new("inq-1")).await.unwrap();
        ledger.add(&InquiryId::new("inq-2")).await.unwrap();

        ledger.reset().await.unwrap();

        assert!(ledger.is_empty());
        assert!(!ledger.contains(&InquiryId::new("inq-1")));
    }
}
