//! `munglog config`: configuration management commands.

use munglog_config::{AppConfig, FilterStrategy};

/// Warnings worth showing for a config that parsed and validated.
fn config_warnings(config: &AppConfig) -> Vec<&'static str> {
    let mut warnings = Vec::new();

    if config.api_key.is_none() && munglog_providers::requires_api_key(&config.provider) {
        warnings.push("No API key set (set MUNGLOG_API_KEY or OPENAI_API_KEY env var)");
    }

    if config.filter.strategy == FilterStrategy::Keyword
        && config.filter.keywords.iter().all(|k| k.is_empty())
    {
        warnings.push("Keyword filter has no keywords; every question will be refused");
    }

    if config.filter.strategy == FilterStrategy::AlwaysAccept {
        warnings.push("Filter strategy is always_accept; off-topic questions reach the model");
    }

    if config.gateway.host == "0.0.0.0" {
        warnings.push(
            "Gateway bound to 0.0.0.0; the session is shared with anyone who can reach it",
        );
    }

    warnings
}

pub async fn validate() -> Result<(), Box<dyn std::error::Error>> {
    println!("🔍 Validating configuration...");

    match AppConfig::load() {
        Ok(config) => {
            println!("   ✅ Config parsed successfully");

            let warnings = config_warnings(&config);
            if warnings.is_empty() {
                println!("   ✅ All checks passed");
            } else {
                println!();
                for w in &warnings {
                    println!("   ⚠️  {w}");
                }
            }

            println!();
            println!("   Provider:  {}", config.provider);
            println!("   Model:     {}", config.model);
            println!("   Filter:    {}", config.filter.strategy);
            println!("   Memory:    {} turns", config.session.capacity);
            println!("   Timeout:   {}s", config.request_timeout_secs);
            println!(
                "   Gateway:   {}:{}",
                config.gateway.host, config.gateway.port
            );
        }
        Err(e) => {
            println!("   ❌ Config error: {e}");
            return Err(e.into());
        }
    }

    Ok(())
}

pub async fn show() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    if config.api_key.is_some() {
        config.api_key = Some("***".into());
    }
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

pub async fn path() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", AppConfig::config_path().display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_path_is_valid() {
        let path = AppConfig::config_path();
        assert!(path.to_str().unwrap().contains("config.toml"));
    }

    #[test]
    fn missing_key_warns_for_hosted_provider_only() {
        let config = AppConfig::default();
        assert!(config_warnings(&config).iter().any(|w| w.contains("API key")));

        let local = AppConfig {
            provider: "ollama".into(),
            ..AppConfig::default()
        };
        assert!(!config_warnings(&local).iter().any(|w| w.contains("API key")));
    }

    #[test]
    fn always_accept_is_flagged() {
        let mut config = AppConfig::default();
        config.api_key = Some("sk-test".into());
        assert!(config_warnings(&config).is_empty());

        config.filter.strategy = FilterStrategy::AlwaysAccept;
        assert_eq!(config_warnings(&config).len(), 1);
    }
}
