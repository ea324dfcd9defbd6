//! # chat-bots
//!
//! The demo bots: a streaming historian QA bot and two document-QA bots (PDF-only
//! and PDF/Word/Excel). Each bot is a [`chat_core::SessionHandler`] with two hooks:
//! `on_start` builds the session's pipeline (after an optional file-ingestion
//! step), `on_message` runs it and streams or sends the reply. The binaries wire a
//! handler to the Telegram transport.

pub mod doc_qa;
pub mod historian;
mod launch;

pub use doc_qa::DocQaHandler;
pub use historian::HistorianHandler;
pub use launch::{run_bot, BotArgs};
