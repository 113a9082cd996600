pub mod ask;
pub mod chat;
pub mod config_cmd;
pub mod doctor;
pub mod onboard;
pub mod samples;
pub mod serve;

use munglog_agent::DialogueController;
use munglog_config::{AppConfig, ConfigError};
use munglog_core::error::Error;

/// Shown for any remote failure; never the refusal text.
pub const FAILURE_NOTICE: &str = "답변을 가져오지 못했어요. 잠시 후 다시 시도해 주세요.";

/// Load config and build the session controller every front end shares.
pub fn load_controller() -> Result<(AppConfig, DialogueController), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    let provider = match munglog_providers::build_from_config(&config) {
        Ok(provider) => provider,
        Err(ConfigError::MissingApiKey { provider }) => {
            print_api_key_help(&provider);
            return Err("No API key found. See above for setup instructions.".into());
        }
        Err(e) => return Err(e.into()),
    };

    let controller = DialogueController::from_config(provider, &config);
    Ok((config, controller))
}

fn print_api_key_help(provider: &str) {
    eprintln!();
    eprintln!("  ERROR: No API key configured for provider '{provider}'!");
    eprintln!();
    eprintln!("  Set one of these environment variables:");
    eprintln!("    MUNGLOG_API_KEY=sk-...   (generic)");
    eprintln!("    OPENAI_API_KEY=sk-...    (for OpenAI direct)");
    eprintln!();
    eprintln!("  Or add it to your config file:");
    eprintln!("    {}", AppConfig::config_path().display());
    eprintln!();
}

/// Text to print for a failed turn.
pub fn describe_failure(err: &Error) -> &'static str {
    match err {
        Error::EmptyInput => "질문을 입력해 주세요.",
        _ => FAILURE_NOTICE,
    }
}
