//! Transport abstraction for sending, editing, and asking for files.
//!
//! [`ChatUi`] is transport-agnostic; chat-telegram implements it via teloxide, tests
//! implement it with recording mocks.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{FileRequest, Session, UploadedFile};

/// Abstraction over the chat transport. Implementations map to a concrete UI (e.g. Telegram).
#[async_trait]
pub trait ChatUi: Send + Sync {
    /// Sends a complete text message to the session's chat.
    async fn send_message(&self, session: &Session, text: &str) -> Result<()>;

    /// Sends a message and returns its id so a streamed reply can edit it in place.
    /// May return an empty string if the transport cannot edit.
    async fn send_message_and_return_id(&self, session: &Session, text: &str) -> Result<String>;

    /// Replaces the text of an already-sent message (streamed replies: send then edit).
    /// `message_id` is transport-specific (e.g. a Telegram numeric id as string).
    async fn edit_message(&self, session: &Session, message_id: &str, text: &str) -> Result<()>;

    /// Shows `request.prompt` and waits for the user to upload a file. Waits
    /// indefinitely when `request.timeout` is `None`; oversized uploads are rejected
    /// transport-side and the wait continues.
    async fn ask_file(&self, session: &Session, request: &FileRequest) -> Result<UploadedFile>;
}
