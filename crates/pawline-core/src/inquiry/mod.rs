//! Adoption inquiries: model, status state machine, and the registry.
//!
//! An inquiry is an applicant's request to adopt a specific pet from a
//! specific shelter. Its status moves through a small monotonic state
//! machine; its chat thread lives in the [`crate::thread`] module.
//!
//! The [`InquiryRegistry`] owns the locally cached inquiry list for the
//! current account, keeps it fresh by polling the remote store, and derives
//! the unread count from the list, the account role, and the
//! acknowledgement ledger.

mod model;
mod registry;

pub use model::{
    ApplicantDetails, Inquiry, InquiryId, InquiryStatus, PetAvailability, PetId,
};
pub use registry::{InquiryRegistry, InquirySnapshot};
