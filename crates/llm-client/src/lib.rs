//! # LLM client abstraction
//!
//! Defines the [`LlmClient`] trait and an OpenAI implementation. Transport-agnostic;
//! used by chat-pipeline and the bots.
//!
//! The stream method takes a type-erased callback so that [`LlmClient`] stays
//! object-safe (`Arc<dyn LlmClient>` in pipelines and test mocks).

use anyhow::Result;
use async_openai::types::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
};
use async_trait::async_trait;
use futures::future::BoxFuture;
use prompt::{ChatMessage, MessageRole};

mod config;
mod openai;

pub use config::{EnvLlmConfig, LlmConfig};
pub use openai::OpenAiLlmClient;

/// A chunk of streamed LLM output. `done` is set on the final chunk.
#[derive(Debug, Clone)]
pub struct StreamChunk {
    pub content: String,
    pub done: bool,
}

/// Type-erased callback for stream chunks so that [`LlmClient`] is dyn compatible.
/// The callback clones what it needs into the returned future.
pub type StreamChunkCallback = dyn FnMut(StreamChunk) -> BoxFuture<'static, Result<()>> + Send;

/// LLM client interface: one-shot completion or streamed completion from a message list.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Returns the model reply text for the given messages (system/user/assistant).
    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String>;

    /// Streamed completion: invokes `callback` once per fragment, in generation
    /// order, and returns the full reply text.
    async fn complete_stream(
        &self,
        messages: Vec<ChatMessage>,
        callback: &mut StreamChunkCallback,
    ) -> Result<String>;
}

/// Converts a single [`ChatMessage`] into the OpenAI API message format.
fn chat_message_to_openai(msg: &ChatMessage) -> Result<ChatCompletionRequestMessage> {
    let content = msg.content.clone();
    let openai_msg: ChatCompletionRequestMessage = match msg.role {
        MessageRole::System => ChatCompletionRequestSystemMessageArgs::default()
            .content(content)
            .build()?
            .into(),
        MessageRole::User => ChatCompletionRequestUserMessageArgs::default()
            .content(content)
            .build()?
            .into(),
        MessageRole::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
            .content(content)
            .build()?
            .into(),
    };
    Ok(openai_msg)
}

/// Converts a message list for a request body.
fn messages_to_openai(messages: &[ChatMessage]) -> Result<Vec<ChatCompletionRequestMessage>> {
    messages.iter().map(chat_message_to_openai).collect()
}
