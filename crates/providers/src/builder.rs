//! Provider construction from configuration.
//!
//! Credentials are resolved here, once, before the first request. The
//! controller never reads the environment itself.

use crate::openai_compat::OpenAiCompatProvider;
use munglog_config::{AppConfig, ConfigError};
use munglog_core::provider::Provider;
use std::sync::Arc;
use std::time::Duration;

/// Build the completion client described by `config`.
///
/// Local providers (`ollama`, `vllm`, `llamacpp`) do not need a key; every
/// other provider without one yields [`ConfigError::MissingApiKey`].
pub fn build_from_config(config: &AppConfig) -> Result<Arc<dyn Provider>, ConfigError> {
    let name = config.provider.as_str();

    let api_key = match (&config.api_key, requires_api_key(name)) {
        (Some(key), _) => key.clone(),
        (None, false) => name.to_string(),
        (None, true) => {
            return Err(ConfigError::MissingApiKey {
                provider: name.to_string(),
            });
        }
    };

    let base_url = match &config.api_url {
        Some(url) => url.clone(),
        None => default_base_url(name).ok_or_else(|| {
            ConfigError::ValidationError(format!(
                "provider '{name}' has no known endpoint; set api_url"
            ))
        })?,
    };

    tracing::debug!(provider = %name, base_url = %base_url, "Building completion client");

    // The transport deadline sits a little past the controller's own so the
    // controller reports the distinct timeout error first.
    let timeout = transport_timeout(config.request_timeout_secs);

    Ok(Arc::new(
        OpenAiCompatProvider::new(name, base_url, api_key).with_timeout(timeout),
    ))
}

fn transport_timeout(request_timeout_secs: u64) -> Duration {
    Duration::from_secs(request_timeout_secs.saturating_add(5))
}

/// Whether `provider_name` needs an API key to be usable.
pub fn requires_api_key(provider_name: &str) -> bool {
    !matches!(provider_name, "ollama" | "vllm" | "llamacpp" | "llama.cpp")
}

/// Get the default base URL for well-known providers.
fn default_base_url(provider_name: &str) -> Option<String> {
    let url = match provider_name {
        "openai" => "https://api.openai.com/v1",
        "openrouter" => "https://openrouter.ai/api/v1",
        "ollama" => "http://localhost:11434/v1",
        "groq" => "https://api.groq.com/openai/v1",
        "together" => "https://api.together.xyz/v1",
        "vllm" => "http://localhost:8000/v1",
        "llamacpp" | "llama.cpp" => "http://localhost:8080/v1",
        _ => return None,
    };
    Some(url.to_string())
}
