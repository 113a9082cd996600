//! Munglog CLI, the main entry point.
//!
//! Commands:
//! - `onboard`  Write a default config file
//! - `chat`     Interactive pet-care chat
//! - `ask`      Ask a single question
//! - `samples`  Run questions from a dataset file through one session
//! - `serve`    Start the HTTP gateway
//! - `config`   Show, validate or locate the config
//! - `doctor`   Diagnose setup problems

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(
    name = "munglog",
    about = "Munglog: pet-care question answering assistant",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration file
    Onboard,

    /// Chat interactively (`/reset` clears the session, `exit` quits)
    Chat,

    /// Ask a single question and print the answer
    Ask {
        /// The question to ask
        #[arg(short, long)]
        message: String,
    },

    /// Ask the questions found in a JSON or JSON Lines dataset file
    Samples {
        /// Dataset file (JSON array or one JSON object per line)
        #[arg(short, long)]
        file: PathBuf,

        /// Number of rows to look at
        #[arg(short, long, default_value_t = 3)]
        limit: usize,
    },

    /// Start the HTTP gateway server
    Serve {
        /// Override the port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Diagnose configuration and connectivity
    Doctor,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the resolved configuration (API key redacted)
    Show,
    /// Parse and validate the configuration
    Validate,
    /// Print the config file path
    Path,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Onboard => commands::onboard::run().await?,
        Commands::Chat => commands::chat::run().await?,
        Commands::Ask { message } => commands::ask::run(message).await?,
        Commands::Samples { file, limit } => commands::samples::run(file, limit).await?,
        Commands::Serve { port } => commands::serve::run(port).await?,
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config_cmd::show().await?,
            ConfigAction::Validate => commands::config_cmd::validate().await?,
            ConfigAction::Path => commands::config_cmd::path().await?,
        },
        Commands::Doctor => commands::doctor::run().await?,
    }

    Ok(())
}
