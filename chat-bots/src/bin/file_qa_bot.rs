//! File QA demo bot: waits for a PDF/Word/Excel upload at session start, then
//! answers questions based on the extracted text (batch replies).

use anyhow::Result;
use chat_bots::{run_bot, BotArgs, DocQaHandler};
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
    let handler = Arc::new(DocQaHandler::office(client));

    run_bot("file-qa-bot", args, handler).await
}
