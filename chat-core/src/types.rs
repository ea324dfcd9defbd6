//! Core types: user, session, file upload, and the session lifecycle trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::error::Result;
use crate::ui::ChatUi;

/// User identity (id, username, names).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// One user's continuous interaction lifetime with the chat transport.
/// Created on first contact with a chat; all state scoped to it is private to that chat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Transport-assigned chat id; one session per chat.
    pub chat_id: i64,
    /// The user who opened the session, when the transport reports one.
    pub user: Option<User>,
    pub started_at: DateTime<Utc>,
}

impl Session {
    pub fn new(chat_id: i64, user: Option<User>) -> Self {
        Self {
            chat_id,
            user,
            started_at: Utc::now(),
        }
    }
}

/// Request shown to the user when a handler asks for a file upload.
#[derive(Debug, Clone)]
pub struct FileRequest {
    /// Prompt text shown to the user (e.g. "Please upload a PDF file to begin!").
    pub prompt: String,
    /// Advisory MIME accept list; shown to the user, not enforced by the transport.
    pub accepted_mime_types: Vec<String>,
    /// Uploads larger than this are rejected with a message and the wait continues.
    pub max_size_mb: u64,
    /// `None` waits indefinitely. All current bots suppress the timeout.
    pub timeout: Option<Duration>,
}

impl FileRequest {
    /// Request with the given prompt, a 20 MB cap, no accept list, and no timeout.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            accepted_mime_types: Vec::new(),
            max_size_mb: 20,
            timeout: None,
        }
    }

    pub fn with_accepted_mime_types(mut self, mime_types: Vec<String>) -> Self {
        self.accepted_mime_types = mime_types;
        self
    }

    pub fn with_max_size_mb(mut self, max_size_mb: u64) -> Self {
        self.max_size_mb = max_size_mb;
        self
    }
}

/// A file the user uploaded, downloaded to local disk by the transport.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Original file name as sent by the user; extension dispatch reads this.
    pub name: String,
    /// Local path the transport downloaded the file to.
    pub path: PathBuf,
    pub mime_type: Option<String>,
    pub size_bytes: u64,
}

/// The two lifecycle hooks of a chat session.
///
/// `on_start` runs exactly once when the session is created, before any message is
/// processed; `on_message` runs once per inbound text, serially, in arrival order.
/// `State` is the per-session state struct owned by the session runner and passed
/// by reference into both hooks; nothing in it is shared across sessions.
#[async_trait]
pub trait SessionHandler: Send + Sync + 'static {
    type State: Default + Send + 'static;

    /// Runs once per new session. Builds whatever the session needs (pipeline,
    /// document context) and stores it in `state`.
    async fn on_start(
        &self,
        session: &Session,
        state: &mut Self::State,
        ui: Arc<dyn ChatUi>,
    ) -> Result<()>;

    /// Runs once per inbound user message.
    async fn on_message(
        &self,
        session: &Session,
        state: &mut Self::State,
        ui: Arc<dyn ChatUi>,
        text: &str,
    ) -> Result<()>;
}
