//! Configuration loading, validation, and management for Munglog.
//!
//! Loads configuration from `~/.munglog/config.toml` with environment
//! variable overrides. Validates all settings at startup; a missing
//! credential is reported when the completion client is built, which is
//! fatal at process start.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Pet-care keywords used by the keyword filter strategy.
pub const DEFAULT_KEYWORDS: &[&str] = &[
    "강아지",
    "고양이",
    "애완견",
    "반려견",
    "반려묘",
    "반려동물",
    "산책",
    "사료",
    "반려동물 사료",
    "반려동물 질병",
    "동물병원",
    "구토",
    "토",
    "설사",
    "식욕",
    "응급",
    "예방접종",
    "음식",
    "식단",
    "영양",
    "영양제",
    "간식",
    "사료 추천",
    "신장",
    "콩팥",
];

/// Persona instruction sent as the first message of every remote call.
pub const DEFAULT_SYSTEM_PROMPT: &str = "당신은 반려동물 전문가 AI입니다. \
반려견, 반려동물, 강아지, 고양이, 산책, 반려동물 사료, 반려동물 질병과 관련된 질문에만 답변하고, \
그 외 주제에는 '죄송하지만, 저는 반려동물 관련 질문에만 답변할 수 있습니다.'라고 응답하세요.";

/// Fixed answer for out-of-domain questions.
pub const DEFAULT_REFUSAL: &str = "죄송하지만, 저는 반려동물 관련 질문에만 답변할 수 있어요.";

/// The root configuration structure.
///
/// Maps directly to `~/.munglog/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// API key for the completion service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Base URL override for the completion service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// Completion provider name
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// Generation temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Max tokens per reply
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Deadline for a single completion call
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub filter: FilterConfig,

    #[serde(default)]
    pub persona: PersonaConfig,

    #[serde(default)]
    pub gateway: GatewayConfig,
}

fn default_provider() -> String {
    "openai".into()
}
fn default_model() -> String {
    "gpt-3.5-turbo".into()
}
fn default_temperature() -> f32 {
    0.3
}
fn default_max_tokens() -> u32 {
    512
}
fn default_request_timeout_secs() -> u64 {
    60
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &redact(&self.api_key))
            .field("api_url", &self.api_url)
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("session", &self.session)
            .field("filter", &self.filter)
            .field("persona", &self.persona)
            .field("gateway", &self.gateway)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Number of most recent question/answer turns replayed to the model
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

fn default_capacity() -> usize {
    8
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
        }
    }
}

/// Which domain filter gates questions before the remote call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterStrategy {
    /// Accept only questions containing a configured keyword
    #[default]
    Keyword,
    /// Forward every question to the model
    AlwaysAccept,
}

impl std::str::FromStr for FilterStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "keyword" => Ok(Self::Keyword),
            "always_accept" | "always-accept" => Ok(Self::AlwaysAccept),
            other => Err(ConfigError::ValidationError(format!(
                "unknown filter strategy '{other}' (expected 'keyword' or 'always_accept')"
            ))),
        }
    }
}

impl std::fmt::Display for FilterStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Keyword => f.write_str("keyword"),
            Self::AlwaysAccept => f.write_str("always_accept"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    #[serde(default)]
    pub strategy: FilterStrategy,

    /// Case-sensitive substrings; only read by the keyword strategy
    #[serde(default = "default_keywords")]
    pub keywords: Vec<String>,
}

fn default_keywords() -> Vec<String> {
    DEFAULT_KEYWORDS.iter().map(|k| (*k).to_string()).collect()
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            strategy: FilterStrategy::default(),
            keywords: default_keywords(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonaConfig {
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,

    #[serde(default = "default_refusal")]
    pub refusal: String,
}

fn default_system_prompt() -> String {
    DEFAULT_SYSTEM_PROMPT.into()
}
fn default_refusal() -> String {
    DEFAULT_REFUSAL.into()
}

impl Default for PersonaConfig {
    fn default() -> Self {
        Self {
            system_prompt: default_system_prompt(),
            refusal: default_refusal(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,
}

fn default_port() -> u16 {
    8787
}
fn default_host() -> String {
    "127.0.0.1".into()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.munglog/config.toml).
    ///
    /// Environment overrides:
    /// - `MUNGLOG_API_KEY`, then `OPENAI_API_KEY` (only when the file has none)
    /// - `MUNGLOG_PROVIDER`
    /// - `MUNGLOG_MODEL`
    /// - `MUNGLOG_FILTER` (`keyword` or `always_accept`)
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();
        let mut config = Self::load_from(&config_path)?;
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from an environment lookup.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.api_key.is_none() {
            self.api_key = lookup("MUNGLOG_API_KEY")
                .or_else(|| lookup("OPENAI_API_KEY"))
                .filter(|k| !k.trim().is_empty());
        }

        if let Some(provider) = lookup("MUNGLOG_PROVIDER") {
            self.provider = provider;
        }

        if let Some(model) = lookup("MUNGLOG_MODEL") {
            self.model = model;
        }

        if let Some(strategy) = lookup("MUNGLOG_FILTER") {
            self.filter.strategy = strategy.parse()?;
        }

        Ok(())
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".munglog")
    }

    /// Path of the default config file.
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::ValidationError(
                "temperature must be between 0.0 and 2.0".into(),
            ));
        }

        if self.session.capacity == 0 {
            return Err(ConfigError::ValidationError(
                "session.capacity must be at least 1".into(),
            ));
        }

        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "request_timeout_secs must be > 0".into(),
            ));
        }

        if self.filter.strategy == FilterStrategy::Keyword
            && self.filter.keywords.iter().all(|k| k.is_empty())
        {
            tracing::warn!("Keyword filter has no usable keywords; every question will be refused");
        }

        Ok(())
    }

    /// Check if an API key is available (from config or environment).
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Generate a default config TOML string (for `onboard` command).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: None,
            provider: default_provider(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            request_timeout_secs: default_request_timeout_secs(),
            session: SessionConfig::default(),
            filter: FilterConfig::default(),
            persona: PersonaConfig::default(),
            gateway: GatewayConfig::default(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),

    #[error("No API key for provider '{provider}': set MUNGLOG_API_KEY or OPENAI_API_KEY")]
    MissingApiKey { provider: String },
}
