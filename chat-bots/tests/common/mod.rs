//! Test doubles for the bot handler tests.
//!
//! [`MockUi`] implements [`chat_core::ChatUi`] by recording calls over a channel
//! and returning a programmed file from `ask_file`; [`MockLlm`] records requests
//! and replies with a fixed text, streamed in small chunks. No Telegram or OpenAI
//! calls are made.

#![allow(dead_code)] // each test binary uses a subset of these helpers

use async_trait::async_trait;
use chat_core::{ChatError, ChatUi, FileRequest, Result as ChatResult, Session, UploadedFile};
use llm_client::{LlmClient, StreamChunk, StreamChunkCallback};
use prompt::ChatMessage;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// LLM stub: fixed reply, records every message list it was asked to complete.
pub struct MockLlm {
    reply: String,
    requests: Arc<Mutex<Vec<Vec<ChatMessage>>>>,
}

impl MockLlm {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn requests(&self) -> Vec<Vec<ChatMessage>> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn complete(&self, messages: Vec<ChatMessage>) -> anyhow::Result<String> {
        self.requests.lock().unwrap().push(messages);
        Ok(self.reply.clone())
    }

    async fn complete_stream(
        &self,
        messages: Vec<ChatMessage>,
        callback: &mut StreamChunkCallback,
    ) -> anyhow::Result<String> {
        self.requests.lock().unwrap().push(messages);
        let chars: Vec<char> = self.reply.chars().collect();
        for (i, piece) in chars.chunks(4).enumerate() {
            let content: String = piece.iter().collect();
            let done = (i + 1) * 4 >= chars.len();
            callback(StreamChunk { content, done }).await?;
        }
        Ok(self.reply.clone())
    }
}

/// One recorded transport call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Sent(String),
    SentWithId { id: String, text: String },
    Edited { message_id: String, text: String },
}

/// Recording [`ChatUi`] with a programmable `ask_file` result.
pub struct MockUi {
    placeholder_id: String,
    events: mpsc::UnboundedSender<UiEvent>,
    file: Mutex<Option<UploadedFile>>,
}

impl MockUi {
    pub fn with_receiver() -> (Arc<Self>, mpsc::UnboundedReceiver<UiEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        (
            Arc::new(Self {
                placeholder_id: "1".to_string(),
                events,
                file: Mutex::new(None),
            }),
            rx,
        )
    }

    /// Sets the file the next `ask_file` call returns.
    pub fn program_file(&self, file: UploadedFile) {
        *self.file.lock().unwrap() = Some(file);
    }
}

#[async_trait]
impl ChatUi for MockUi {
    async fn send_message(&self, _session: &Session, text: &str) -> ChatResult<()> {
        let _ = self.events.send(UiEvent::Sent(text.to_string()));
        Ok(())
    }

    async fn send_message_and_return_id(
        &self,
        _session: &Session,
        text: &str,
    ) -> ChatResult<String> {
        let _ = self.events.send(UiEvent::SentWithId {
            id: self.placeholder_id.clone(),
            text: text.to_string(),
        });
        Ok(self.placeholder_id.clone())
    }

    async fn edit_message(
        &self,
        _session: &Session,
        message_id: &str,
        text: &str,
    ) -> ChatResult<()> {
        let _ = self.events.send(UiEvent::Edited {
            message_id: message_id.to_string(),
            text: text.to_string(),
        });
        Ok(())
    }

    async fn ask_file(&self, session: &Session, request: &FileRequest) -> ChatResult<UploadedFile> {
        self.send_message(session, &request.prompt).await?;
        self.file
            .lock()
            .unwrap()
            .take()
            .ok_or_else(|| ChatError::Session("no file programmed".to_string()))
    }
}

/// Drains all events currently in the receiver.
pub fn drain_events(rx: &mut mpsc::UnboundedReceiver<UiEvent>) -> Vec<UiEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

pub fn test_session() -> Session {
    Session::new(456, None)
}
