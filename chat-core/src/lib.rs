//! # chat-core
//!
//! Core types and traits for the chat bots: [`ChatUi`], [`SessionHandler`], session and file
//! types, and tracing initialization. Transport-agnostic; used by chat-telegram, chat-pipeline,
//! and the bots themselves.

pub mod error;
pub mod logger;
pub mod types;
pub mod ui;

pub use error::{ChatError, HandlerError, Result};
pub use logger::init_tracing;
pub use types::{FileRequest, Session, SessionHandler, UploadedFile, User};
pub use ui::ChatUi;
