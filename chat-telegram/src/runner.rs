//! Session runner: keys sessions by chat, runs `on_start` once per chat, then feeds
//! inbound texts to `on_message` serially; routes document uploads to the pending
//! `ask_file` waiter.
//!
//! **Data flow:** teloxide repl → [`dispatch`] → per-chat mpsc queue → session task
//! (`on_start` → loop `on_message`). Documents: repl → size check → download →
//! file waiter registered by `TelegramChatUi::ask_file`.

use chat_core::{ChatUi, Session, SessionHandler, UploadedFile};
use dashmap::DashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use teloxide::net::Download;
use teloxide::prelude::*;
use teloxide::types::Document;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::adapters::session_from_message;
use crate::ui::TelegramChatUi;

/// Command that opens a session without carrying a question.
const START_COMMAND: &str = "/start";

type SessionSender = mpsc::UnboundedSender<String>;

/// Runs the bot until the process is stopped. One task per chat: `on_start` runs
/// first, then texts are handled in arrival order, one at a time.
pub async fn run_sessions<H: SessionHandler>(
    bot: teloxide::Bot,
    handler: Arc<H>,
    download_dir: PathBuf,
) -> anyhow::Result<()> {
    tokio::fs::create_dir_all(&download_dir).await?;
    let ui = Arc::new(TelegramChatUi::new(bot.clone()));
    let sessions: Arc<DashMap<i64, SessionSender>> = Arc::new(DashMap::new());

    teloxide::repl(bot, move |bot: Bot, msg: teloxide::types::Message| {
        let handler = handler.clone();
        let ui = ui.clone();
        let sessions = sessions.clone();
        let download_dir = download_dir.clone();
        async move {
            dispatch(bot, msg, handler, ui, sessions, download_dir).await;
            Ok(())
        }
    })
    .await;

    Ok(())
}

/// Routes one inbound Telegram message: documents feed a pending `ask_file`,
/// texts go to the chat's session queue (creating the session on first contact).
async fn dispatch<H: SessionHandler>(
    bot: Bot,
    msg: teloxide::types::Message,
    handler: Arc<H>,
    ui: Arc<TelegramChatUi>,
    sessions: Arc<DashMap<i64, SessionSender>>,
    download_dir: PathBuf,
) {
    let chat_id = msg.chat.id.0;

    if let Some(doc) = msg.document() {
        handle_document(&bot, &msg, doc, &ui, &download_dir).await;
        return;
    }

    let Some(text) = msg.text() else {
        debug!(chat_id, "ignoring non-text, non-document message");
        return;
    };

    let sender = sessions
        .entry(chat_id)
        .or_insert_with(|| {
            info!(chat_id, "step: new session");
            spawn_session(handler, ui, session_from_message(&msg))
        })
        .clone();

    // /start only opens the session; it is not a question.
    if text.trim() == START_COMMAND {
        return;
    }

    if sender.send(text.to_string()).is_err() {
        // The session task ended (e.g. its initializer failed). Drop the entry
        // so the next message opens a fresh session.
        sessions.remove(&chat_id);
        error!(chat_id, "session task gone, dropping session entry");
    }
}

/// Spawns the session task: `on_start` once, then serial `on_message` calls.
/// Handler errors are logged here, the default error surface.
fn spawn_session<H: SessionHandler>(
    handler: Arc<H>,
    ui: Arc<TelegramChatUi>,
    session: Session,
) -> SessionSender {
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    tokio::spawn(async move {
        let ui: Arc<dyn ChatUi> = ui;
        let mut state = H::State::default();

        info!(chat_id = session.chat_id, "step: session initializer");
        if let Err(e) = handler.on_start(&session, &mut state, ui.clone()).await {
            error!(error = %e, chat_id = session.chat_id, "session initializer failed");
            return;
        }

        while let Some(text) = rx.recv().await {
            info!(chat_id = session.chat_id, "step: processing message");
            if let Err(e) = handler.on_message(&session, &mut state, ui.clone(), &text).await {
                error!(error = %e, chat_id = session.chat_id, "message handler failed");
            }
        }
        info!(chat_id = session.chat_id, "step: session ended");
    });
    tx
}

/// Delivers a document to the chat's pending `ask_file`, enforcing the size cap.
/// Without a pending waiter the document is ignored.
async fn handle_document(
    bot: &Bot,
    msg: &teloxide::types::Message,
    doc: &Document,
    ui: &Arc<TelegramChatUi>,
    download_dir: &Path,
) {
    let chat_id = msg.chat.id.0;
    let Some(waiter) = ui.file_waiter(chat_id) else {
        debug!(chat_id, "document received but no upload is pending");
        return;
    };

    let size_bytes = doc.file.size as u64;
    if size_bytes > waiter.max_size_mb * 1024 * 1024 {
        info!(chat_id, size_bytes, "rejecting oversized upload");
        let text = format!(
            "File is larger than {} MB, please upload a smaller one.",
            waiter.max_size_mb
        );
        if let Err(e) = bot.send_message(msg.chat.id, text).await {
            error!(error = %e, chat_id, "failed to send size rejection");
        }
        // The waiter stays registered; the wait continues.
        return;
    }

    match download_document(bot, doc, chat_id, download_dir).await {
        Ok(file) => {
            info!(chat_id, file = %file.name, size_bytes, "document downloaded");
            let _ = waiter.tx.send(file);
        }
        Err(e) => {
            error!(error = %e, chat_id, "failed to download document");
        }
    }
}

/// Downloads the document to `download_dir` and returns its local description.
async fn download_document(
    bot: &Bot,
    doc: &Document,
    chat_id: i64,
    download_dir: &Path,
) -> anyhow::Result<UploadedFile> {
    let name = doc
        .file_name
        .clone()
        .unwrap_or_else(|| "upload.bin".to_string());
    let file = bot.get_file(doc.file.id.clone()).await?;
    let path = download_dir.join(format!("{}_{}", chat_id, name));
    let mut dst = tokio::fs::File::create(&path).await?;
    bot.download_file(&file.path, &mut dst).await?;

    Ok(UploadedFile {
        name,
        path,
        mime_type: doc.mime_type.as_ref().map(|m| m.to_string()),
        size_bytes: doc.file.size as u64,
    })
}
