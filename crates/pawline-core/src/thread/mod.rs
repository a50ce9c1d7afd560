//! Chat threads: message model, opening-message dedup, and the synchronizer.
//!
//! Every inquiry carries the applicant's original free-text message, written
//! before any chat existed. The thread view shows it as the first chat entry
//! by synthesizing a non-persisted [`Message`] from it on every load — unless
//! a real stored message already duplicates it (see
//! [`should_suppress_synthetic`]).

mod model;
mod sync;

pub use model::{
    DEDUP_WINDOW_MS, Message, MessageId, SYNTHETIC_MESSAGE_ID, merge_thread,
    should_suppress_synthetic,
};
pub use sync::ThreadSynchronizer;
