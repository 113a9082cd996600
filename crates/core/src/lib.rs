//! # Munglog Core
//!
//! Domain types, traits, and error definitions for the Munglog pet-care
//! assistant: the model that the provider, memory, agent and front-end
//! crates build on.
//!
//! ## Layout
//!
//! - [`message`]: role-tagged chat messages sent to the completion service
//! - [`provider`]: the `Provider` trait (the completion client boundary)
//! - [`error`]: the error kinds surfaced to front ends
//! - [`event`]: domain events published per dialogue turn

pub mod error;
pub mod event;
pub mod message;
pub mod provider;

// Re-export key types at crate root for ergonomics
pub use error::{Error, ProviderError, Result};
pub use event::{DomainEvent, EventBus};
pub use message::{Message, Role};
pub use provider::{Provider, ProviderRequest, ProviderResponse, Usage};
