//! [`ChatUi`] implementation over the Telegram Bot API.
//!
//! Streamed replies are rendered by sending a placeholder and editing it in place.
//! `ask_file` parks a per-chat waiter that the session runner feeds when the user
//! sends a document; the wait has no timeout unless the request sets one.

use async_trait::async_trait;
use chat_core::{ChatError, ChatUi, FileRequest, Result, Session, UploadedFile};
use dashmap::DashMap;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::{ChatId, MessageId};
use tokio::sync::mpsc;
use tracing::info;

/// Sender side of a pending `ask_file` wait, plus the request's size cap so the
/// runner can reject oversized uploads without waking the waiter.
#[derive(Clone)]
pub(crate) struct FileWaiter {
    pub tx: mpsc::UnboundedSender<UploadedFile>,
    pub max_size_mb: u64,
}

/// Telegram-backed [`ChatUi`]. Clones share the bot and the waiter map.
#[derive(Clone)]
pub struct TelegramChatUi {
    bot: teloxide::Bot,
    /// One waiter per chat currently blocked in `ask_file`.
    file_waiters: Arc<DashMap<i64, FileWaiter>>,
}

/// Parses a message id string into an i32. Used by edit_message.
pub(crate) fn parse_message_id(s: &str) -> Result<i32> {
    s.parse()
        .map_err(|_| ChatError::Ui(format!("Invalid message_id for edit: {}", s)))
}

impl TelegramChatUi {
    pub fn new(bot: teloxide::Bot) -> Self {
        Self {
            bot,
            file_waiters: Arc::new(DashMap::new()),
        }
    }

    /// Registers a waiter for the chat and returns the receiver the next accepted
    /// upload is delivered to.
    fn register_file_waiter(
        &self,
        chat_id: i64,
        max_size_mb: u64,
    ) -> mpsc::UnboundedReceiver<UploadedFile> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.file_waiters.insert(chat_id, FileWaiter { tx, max_size_mb });
        rx
    }

    /// The waiter for a chat, if `ask_file` is currently blocked there.
    pub(crate) fn file_waiter(&self, chat_id: i64) -> Option<FileWaiter> {
        self.file_waiters.get(&chat_id).map(|w| w.value().clone())
    }
}

#[async_trait]
impl ChatUi for TelegramChatUi {
    async fn send_message(&self, session: &Session, text: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(session.chat_id), text)
            .await
            .map_err(|e| ChatError::Ui(e.to_string()))?;
        Ok(())
    }

    async fn send_message_and_return_id(&self, session: &Session, text: &str) -> Result<String> {
        let sent = self
            .bot
            .send_message(ChatId(session.chat_id), text)
            .await
            .map_err(|e| ChatError::Ui(e.to_string()))?;
        Ok(sent.id.to_string())
    }

    async fn edit_message(&self, session: &Session, message_id: &str, text: &str) -> Result<()> {
        let id = parse_message_id(message_id)?;
        self.bot
            .edit_message_text(ChatId(session.chat_id), MessageId(id), text)
            .await
            .map_err(|e| ChatError::Ui(e.to_string()))?;
        Ok(())
    }

    async fn ask_file(&self, session: &Session, request: &FileRequest) -> Result<UploadedFile> {
        self.send_message(session, &request.prompt).await?;
        let mut rx = self.register_file_waiter(session.chat_id, request.max_size_mb);
        info!(chat_id = session.chat_id, "waiting for file upload");

        let received = match request.timeout {
            // All current bots suppress the timeout and wait indefinitely.
            None => rx.recv().await,
            Some(timeout) => match tokio::time::timeout(timeout, rx.recv()).await {
                Ok(received) => received,
                Err(_) => {
                    self.file_waiters.remove(&session.chat_id);
                    return Err(ChatError::Session("file upload timed out".to_string()));
                }
            },
        };
        self.file_waiters.remove(&session.chat_id);

        received.ok_or_else(|| ChatError::Session("file waiter channel closed".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_message_id_valid() {
        assert_eq!(parse_message_id("123").unwrap(), 123);
        assert_eq!(parse_message_id("0").unwrap(), 0);
    }

    #[test]
    fn test_parse_message_id_invalid() {
        assert!(parse_message_id("").is_err());
        assert!(parse_message_id("abc").is_err());
        assert!(parse_message_id("12.3").is_err());
    }
}
