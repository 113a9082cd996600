//! Completion client implementations for Munglog.
//!
//! All providers implement the `munglog_core::Provider` trait. The builder
//! picks the endpoint and credentials from configuration once at startup;
//! the resulting client is injected into the dialogue controller.

pub mod builder;
pub mod openai_compat;

pub use builder::{build_from_config, requires_api_key};
pub use openai_compat::OpenAiCompatProvider;
