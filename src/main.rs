use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use pillar_tracker::telegram::{Notifier, TelegramClient};
use pillar_tracker::{run, Config};

#[derive(Parser)]
#[command(name = "pillar-tracker", about = "Pillar change notifier for Telegram")]
struct Args {
    /// Path to the TOML configuration file
    #[arg(long, default_value = "config/pillar-tracker.toml")]
    config: PathBuf,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let config = match Config::load(&args.config) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!("Starting");
    match run(&config) {
        Ok(summary) => {
            tracing::info!(
                "Completed: {} pillars at momentum height {}, {} event(s) sent",
                summary.pillar_count,
                summary.momentum_height,
                summary.events_sent
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e}");
            report_to_dev_chat(&config, &e.to_string());
            ExitCode::FAILURE
        }
    }
}

/// Forward a fatal error to the developer chat when one is configured. A
/// failure here is only logged; the run is already failing.
fn report_to_dev_chat(config: &Config, message: &str) {
    let Some(dev_chat) = config.dev_chat() else {
        return;
    };
    match TelegramClient::new(&config.telegram_bot_api_key) {
        Ok(telegram) => {
            if let Err(e) = telegram.send_message(dev_chat, message) {
                tracing::warn!("Could not report error to dev chat: {e}");
            }
        }
        Err(e) => tracing::warn!("Could not report error to dev chat: {e}"),
    }
}
