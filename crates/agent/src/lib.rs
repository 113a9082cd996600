//! The dialogue controller, the heart of Munglog.
//!
//! Every question goes through one short, fixed pipeline:
//!
//! 1. **Filter**: the [`DomainFilter`] decides whether the question is about pet care
//! 2. **Refuse** (out of domain): answer with the canned refusal, record the turn
//! 3. **Assemble** (in domain): system persona + replayed memory + the new question
//! 4. **Complete**: one call to the injected provider, bounded by a timeout
//! 5. **Record**: append the question/answer turn to session memory
//!
//! A failed or timed-out remote call is returned to the caller and records
//! nothing.

pub mod controller;
pub mod filter;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use controller::{Answer, DialogueController};
pub use filter::DomainFilter;
