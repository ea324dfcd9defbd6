//! Historian demo bot: per-session pipeline with a historian persona, streamed
//! answers. Config from env (.env supported); token can override BOT_TOKEN.

use anyhow::Result;
use chat_bots::{run_bot, BotArgs, HistorianHandler};
use clap::Parser;
use llm_client::{EnvLlmConfig, LlmConfig, OpenAiLlmClient};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = BotArgs::parse();

    let llm = EnvLlmConfig::from_env()?;
    let client = Arc::new(
        OpenAiLlmClient::with_base_url(llm.api_key().to_string(), llm.base_url().to_string())
            .with_model(llm.model()),
    );
    let handler = Arc::new(HistorianHandler::new(client, llm.thinking_message()));

    run_bot("historian-bot", args, handler).await
}
