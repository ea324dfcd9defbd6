//! Minimal transport config: token, API URL, log path, download directory.
//! External: env vars BOT_TOKEN, TELEGRAM_API_URL (or TELOXIDE_API_URL), LOG_FILE,
//! DOWNLOAD_DIR.

use anyhow::Result;
use std::env;
use std::path::PathBuf;

/// Telegram transport config (connectivity, logging, and download paths only).
pub struct TelegramConfig {
    pub bot_token: String,
    pub telegram_api_url: Option<String>,
    pub log_file: Option<String>,
    /// Where uploaded documents are downloaded before extraction.
    pub download_dir: PathBuf,
}

impl TelegramConfig {
    /// Loads from environment: BOT_TOKEN required, the rest optional.
    pub fn from_env() -> Result<Self> {
        let bot_token = env::var("BOT_TOKEN").map_err(|_| anyhow::anyhow!("BOT_TOKEN not set"))?;
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();
        let log_file = env::var("LOG_FILE").ok();
        let download_dir = env::var("DOWNLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("downloads"));
        Ok(Self {
            bot_token,
            telegram_api_url,
            log_file,
            download_dir,
        })
    }

    /// Config with the given token; everything else defaulted.
    pub fn with_token(bot_token: String) -> Self {
        Self {
            bot_token,
            telegram_api_url: None,
            log_file: None,
            download_dir: PathBuf::from("downloads"),
        }
    }
}
