//! Error types for the Munglog domain.
//!
//! Uses `thiserror` for ergonomic error definitions. Only the completion
//! boundary can fail at call time; the domain filter and session memory are
//! total operations and have no error type.

use thiserror::Error;

/// The top-level error type returned by the dialogue controller.
#[derive(Debug, Error)]
pub enum Error {
    /// The caller passed an empty or whitespace-only question.
    #[error("Question is empty")]
    EmptyInput,

    /// The completion client call failed.
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// The remote call did not finish within the configured deadline.
    #[error("Completion request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },
}

impl Error {
    /// Whether this error came from the remote completion call (including
    /// deadline expiry). Front ends show a generic failure notice for these,
    /// never the refusal text.
    pub fn is_remote_failure(&self) -> bool {
        matches!(self, Error::Provider(_) | Error::Timeout { .. })
    }
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Completion boundary errors ---

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Provider returned no candidates")]
    EmptyResponse,

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),
}
