//! # pawline-core
//!
//! Core client logic for the Pawline pet-adoption messenger.
//!
//! This crate provides:
//! - Adoption inquiry lifecycle (status state machine, approvals)
//! - Polling-based chat thread synchronization with opening-message dedup
//! - Unread tracking backed by a durable acknowledgement ledger (`SQLite`)
//! - Gateway traits for the remote data store
//! - Notification events for UI consumers
//!
//! The remote store is the source of truth; this crate keeps a locally
//! cached view of it consistent through periodic polling and exposes the
//! result as read-only subscriptions.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod account;
pub mod config;
mod error;
pub mod flight;
pub mod gateway;
pub mod inquiry;
pub mod ledger;
pub mod notify;
pub mod poll;
pub mod thread;

pub use account::{AccountId, AccountRole, Session};
pub use config::SyncConfig;
pub use error::{Error, Result};
pub use flight::SingleFlight;
pub use gateway::{GatewayError, GatewayResult, InquiryGateway, MessageGateway};
pub use inquiry::{
    ApplicantDetails, Inquiry, InquiryId, InquiryRegistry, InquirySnapshot, InquiryStatus,
    PetAvailability, PetId,
};
pub use ledger::{AcknowledgementLedger, LedgerRepository};
pub use notify::{Notification, NotificationKind, Notifier};
pub use poll::PollerHandle;
pub use thread::{
    DEDUP_WINDOW_MS, Message, MessageId, SYNTHETIC_MESSAGE_ID, ThreadSynchronizer, merge_thread,
    should_suppress_synthetic,
};
