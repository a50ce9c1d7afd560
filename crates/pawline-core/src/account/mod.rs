//! Local account context.
//!
//! Pawline serves two kinds of users: shelters reviewing applications and
//! applicants who submitted them. Most derived state (unread counts, the
//! auto-contact transition) depends on which role the current session holds.

mod model;

pub use model::{AccountId, AccountRole, Session};
