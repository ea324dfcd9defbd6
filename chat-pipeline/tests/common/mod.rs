//! Test doubles shared by the chat-pipeline integration tests.
//!
//! [`MockLlm`] records every request and replies with a fixed text (streamed in
//! small chunks); [`MockUi`] records every transport call over a channel so tests
//! can assert on edit order and final text without a real transport.

#![allow(dead_code)] // each test binary uses a subset of these helpers

use async_trait::async_trait;
use chat_core::{ChatError, ChatUi, FileRequest, Result as ChatResult, Session, UploadedFile};
use llm_client::{LlmClient, StreamChunk, StreamChunkCallback};
use prompt::ChatMessage;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// LLM stub: fixed reply, records the message lists it was asked to complete.
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

    /// All recorded requests, oldest first.
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

/// Recording [`ChatUi`]: every call is pushed to an unbounded channel held by the
/// test. `send_message_and_return_id` returns a fixed placeholder id.
pub struct MockUi {
    placeholder_id: String,
    events: mpsc::UnboundedSender<UiEvent>,
    /// Next `ask_file` result; `None` makes `ask_file` fail.
    pub file: Mutex<Option<UploadedFile>>,
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
