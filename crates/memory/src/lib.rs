//! Session memory for Munglog.
//!
//! Holds the most recent question/answer turns of one conversation, in
//! chronological order, bounded at a fixed capacity. Nothing here is
//! persisted; the memory lives exactly as long as its owner.

pub mod session;
pub mod turn;

pub use session::SessionMemory;
pub use turn::Turn;
