//! OpenAI implementation of [`LlmClient`] over async-openai.

use anyhow::Result;
use async_openai::config::OpenAIConfig;
use async_openai::types::{CreateChatCompletionRequest, CreateChatCompletionRequestArgs};
use async_openai::Client;
use async_trait::async_trait;
use futures::StreamExt;
use prompt::ChatMessage;
use std::sync::Arc;
use tracing::instrument;

use crate::{messages_to_openai, LlmClient, StreamChunk, StreamChunkCallback};

/// async-openai based [`LlmClient`]. Cheap to clone; the inner client is shared.
#[derive(Clone)]
pub struct OpenAiLlmClient {
    client: Arc<Client<OpenAIConfig>>,
    model: String,
}

impl OpenAiLlmClient {
    pub fn new(api_key: String) -> Self {
        let config = OpenAIConfig::new().with_api_key(api_key);
        Self {
            client: Arc::new(Client::with_config(config)),
            model: "gpt-3.5-turbo".to_string(),
        }
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(base_url);
        Self {
            client: Arc::new(Client::with_config(config)),
            model: "gpt-3.5-turbo".to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn build_request(&self, messages: &[ChatMessage]) -> Result<CreateChatCompletionRequest> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages_to_openai(messages)?)
            .build()?;
        Ok(request)
    }
}

#[async_trait]
impl LlmClient for OpenAiLlmClient {
    #[instrument(skip(self, messages))]
    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let request = self.build_request(&messages)?;
        let response = self.client.chat().create(request).await?;
        match response.choices.first() {
            Some(choice) => Ok(choice.message.content.clone().unwrap_or_default()),
            None => anyhow::bail!("no choices in completion response"),
        }
    }

    /// Forwards every content delta as one chunk, in generation order; any
    /// transport-required coalescing happens downstream.
    #[instrument(skip(self, messages, callback))]
    async fn complete_stream(
        &self,
        messages: Vec<ChatMessage>,
        callback: &mut StreamChunkCallback,
    ) -> Result<String> {
        let request = self.build_request(&messages)?;
        let mut stream = self.client.chat().create_stream(request).await?;

        let mut full_response = String::new();
        while let Some(result) = stream.next().await {
            let chunk = result.map_err(|e| anyhow::anyhow!("stream error: {}", e))?;
            if let Some(choice) = chunk.choices.first() {
                let done = choice.finish_reason.is_some();
                let content = choice.delta.content.clone().unwrap_or_default();
                if !content.is_empty() {
                    full_response.push_str(&content);
                }
                if !content.is_empty() || done {
                    callback(StreamChunk { content, done }).await?;
                }
            }
        }

        Ok(full_response)
    }
}
