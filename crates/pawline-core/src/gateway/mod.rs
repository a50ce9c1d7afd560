//! Remote store boundary.
//!
//! The core never talks to the network directly; it consumes these traits,
//! implemented elsewhere against the actual backend. All calls are plain
//! async request/response operations with no push channel — freshness comes
//! from polling.

#[cfg(test)]
pub(crate) mod mock;

use async_trait::async_trait;

use crate::account::AccountId;
use crate::inquiry::{Inquiry, InquiryId, InquiryStatus, PetAvailability, PetId};
use crate::thread::Message;

/// Errors that can occur at the remote store boundary.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Request did not reach the store or the store did not respond.
    #[error("Network error: {0}")]
    Network(String),

    /// The store refused the operation for this account.
    #[error("Permission denied: {0}")]
    Denied(String),

    /// The store rejected the request payload.
    #[error("Request rejected: {0}")]
    Rejected(String),
}

/// Result type alias for gateway operations.
pub type GatewayResult<T> = std::result::Result<T, GatewayError>;

/// Access to inquiries and pet records in the remote store.
#[async_trait]
pub trait InquiryGateway: Send + Sync {
    /// Fetch all inquiries visible to the given account.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    async fn fetch_inquiries(&self, account_id: &AccountId) -> GatewayResult<Vec<Inquiry>>;

    /// Persist a newly submitted inquiry.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    async fn create_inquiry(&self, inquiry: &Inquiry) -> GatewayResult<()>;

    /// Write a status change for one inquiry.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the store denies the write.
    async fn set_inquiry_status(
        &self,
        inquiry_id: &InquiryId,
        status: InquiryStatus,
    ) -> GatewayResult<()>;

    /// Write an availability change for one pet record.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the store denies the write.
    async fn set_pet_availability(
        &self,
        pet_id: &PetId,
        availability: PetAvailability,
    ) -> GatewayResult<()>;
}

/// Access to the chat messages of inquiry threads in the remote store.
#[async_trait]
pub trait MessageGateway: Send + Sync {
    /// Fetch all persisted messages for one inquiry thread.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    async fn fetch_messages(&self, inquiry_id: &InquiryId) -> GatewayResult<Vec<Message>>;

    /// Persist a new outbound message and return the stored record.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails; nothing is appended locally
    /// in that case.
    async fn send_message(
        &self,
        inquiry_id: &InquiryId,
        sender_id: &AccountId,
        content: &str,
    ) -> GatewayResult<Message>;

    /// Mark every message in the thread as read for the given account.
    ///
    /// Callers treat this as fire-and-forget: failures are logged, never
    /// surfaced.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    async fn mark_messages_read(
        &self,
        inquiry_id: &InquiryId,
        account_id: &AccountId,
    ) -> GatewayResult<()>;
}
