//! Error types for the core library.

use thiserror::Error;

use crate::gateway::GatewayError;
use crate::inquiry::{InquiryId, InquiryStatus};

/// Errors that can occur in core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Remote store operation failed.
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Outbound message was empty or whitespace-only.
    #[error("Message text is empty")]
    EmptyMessage,

    /// Requested status change is not permitted by the state machine.
    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition {
        /// Current status of the inquiry.
        from: InquiryStatus,
        /// Requested target status.
        to: InquiryStatus,
    },

    /// Inquiry is not present in the locally cached list.
    #[error("Inquiry not found: {0}")]
    InquiryNotFound(InquiryId),

    /// The inquiry was approved, but marking the pet as adopted failed.
    ///
    /// The status change stands; the pet record may be out of step with it
    /// until the next manual correction.
    #[error("Pet availability update failed after approval: {source}")]
    PetUpdateFailed {
        /// Gateway failure from the pet availability write.
        #[source]
        source: GatewayError,
    },
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
