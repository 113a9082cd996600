//! `munglog onboard`: first-time setup.

use munglog_config::AppConfig;
use std::path::Path;

/// Write the default config to `path` unless a file is already there.
///
/// Returns `true` if a file was written.
fn write_default_config(path: &Path) -> std::io::Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::write(path, AppConfig::default_toml())?;
    Ok(true)
}

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = AppConfig::config_path();

    println!("🐶 Munglog: First-Time Setup");
    println!("============================\n");

    if write_default_config(&config_path)? {
        println!("✅ Created config.toml at: {}", config_path.display());
        println!("\n📝 Next steps:");
        println!("   1. Set MUNGLOG_API_KEY (or add api_key to {})", config_path.display());
        println!("   2. Run: munglog chat");
        println!("   3. Ask about your pet!\n");
    } else {
        println!("⚠️  Config already exists at: {}", config_path.display());
        println!("   Edit it manually or delete and re-run onboard.\n");
    }

    println!("🎉 Setup complete! Run `munglog chat` to start.\n");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_loadable_default_config_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        assert!(write_default_config(&path).unwrap());
        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.session.capacity, 8);
        assert_eq!(config.model, "gpt-3.5-turbo");

        std::fs::write(&path, "model = \"custom\"\n").unwrap();
        assert!(!write_default_config(&path).unwrap());
        assert_eq!(AppConfig::load_from(&path).unwrap().model, "custom");
    }
}
