//! Shared launch scaffolding for the bot binaries: CLI args, env loading, tracing
//! init, transport startup.

use anyhow::Result;
use chat_core::{init_tracing, SessionHandler};
use chat_telegram::{build_bot, run_sessions, TelegramConfig};
use clap::Parser;
use std::sync::Arc;
use tracing::info;

/// Common CLI surface of all bots (token can override BOT_TOKEN).
#[derive(Parser)]
#[command(version)]
pub struct BotArgs {
    #[arg(short, long)]
    pub token: Option<String>,
}

/// Loads config, initializes tracing, and runs the handler until stopped.
pub async fn run_bot<H: SessionHandler>(name: &str, args: BotArgs, handler: Arc<H>) -> Result<()> {
    let mut config = TelegramConfig::from_env()?;
    if let Some(token) = args.token {
        config.bot_token = token;
    }

    let log_file = config
        .log_file
        .clone()
        .unwrap_or_else(|| format!("logs/{}.log", name));
    init_tracing(&log_file)?;
    info!(bot = name, log_file = %log_file, "starting bot");

    let bot = build_bot(&config);
    run_sessions(bot, handler, config.download_dir.clone()).await
}
