//! # chat-pipeline
//!
//! The per-session request pipeline: a prompt template plus a model handle, built
//! once per session ([`QaPipeline`]); the explicit session state that owns it
//! ([`SessionState`]); and the stream relay that drains generated fragments from a
//! channel into the transport ([`run_stream_relay`]).

mod pipeline;
mod state;
mod stream;

pub use pipeline::{QaPipeline, SLOT_DOCUMENT, SLOT_QUESTION};
pub use state::SessionState;
pub use stream::{run_stream_relay, StreamRelayConfig, StreamUpdate};
