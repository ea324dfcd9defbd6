//! # chat-telegram
//!
//! Telegram transport layer: [`chat_core::ChatUi`] implementation, adapters from
//! teloxide types, per-chat session runner, minimal config. Handles only Telegram
//! connectivity and session dispatch; no extraction or AI logic.

mod adapters;
mod config;
mod runner;
mod ui;

pub use adapters::{session_from_message, user_from_telegram};
pub use config::TelegramConfig;
pub use runner::run_sessions;
pub use ui::TelegramChatUi;

/// Builds a teloxide Bot from config, applying the optional API URL override.
pub fn build_bot(config: &TelegramConfig) -> teloxide::Bot {
    let bot = teloxide::Bot::new(config.bot_token.clone());
    if let Some(ref url_str) = config.telegram_api_url {
        match reqwest::Url::parse(url_str) {
            Ok(url) => bot.set_api_url(url),
            Err(e) => {
                tracing::error!(error = %e, url = %url_str, "Invalid TELEGRAM_API_URL, using default");
                bot
            }
        }
    } else {
        bot
    }
}
