//! Immutable prompt-template + model composition, built once per session.

use anyhow::{Context, Result};
use futures::future::BoxFuture;
use llm_client::{LlmClient, StreamChunk};
use prompt::{ChatMessage, PromptTemplate};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tracing::instrument;

use crate::stream::StreamUpdate;

/// Template slot for the user question.
pub const SLOT_QUESTION: &str = "question";
/// Template slot for the session document, used by document-QA templates.
pub const SLOT_DOCUMENT: &str = "document";

/// Composed prompt template + model handle with plain-text output. Built once per
/// session and not mutated afterward; the session state holds it behind an `Arc`.
pub struct QaPipeline {
    system_prompt: Option<String>,
    template: PromptTemplate,
    client: Arc<dyn LlmClient>,
}

impl QaPipeline {
    pub fn new(template: PromptTemplate, client: Arc<dyn LlmClient>) -> Self {
        Self {
            system_prompt: None,
            template,
            client,
        }
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(system_prompt.into());
        self
    }

    /// Renders the template with the question and document values and returns the
    /// message list submitted to the model. The document slot renders as the empty
    /// string when the session stores no document.
    fn build_messages(&self, question: &str, document: Option<&str>) -> Result<Vec<ChatMessage>> {
        let rendered = self
            .template
            .render(&[
                (SLOT_DOCUMENT, document.unwrap_or("")),
                (SLOT_QUESTION, question),
            ])
            .context("render prompt template")?;
        let mut messages = Vec::new();
        if let Some(system_prompt) = &self.system_prompt {
            messages.push(ChatMessage::system(system_prompt.clone()));
        }
        messages.push(ChatMessage::user(rendered));
        Ok(messages)
    }

    /// One-shot invocation: returns the complete reply.
    #[instrument(skip_all)]
    pub async fn invoke(&self, question: &str, document: Option<&str>) -> Result<String> {
        let messages = self.build_messages(question, document)?;
        self.client.complete(messages).await
    }

    /// Streamed invocation: pushes [`StreamUpdate::Fragment`]s onto `updates` in
    /// generation order, then [`StreamUpdate::Done`]. Returns the full reply text.
    /// On failure the sender is dropped without `Done`; consumers treat channel
    /// close as end of stream.
    #[instrument(skip_all)]
    pub async fn invoke_stream(
        &self,
        question: &str,
        document: Option<&str>,
        updates: UnboundedSender<StreamUpdate>,
    ) -> Result<String> {
        let messages = self.build_messages(question, document)?;
        let tx = updates.clone();
        let mut callback = move |chunk: StreamChunk| -> BoxFuture<'static, Result<()>> {
            let tx = tx.clone();
            Box::pin(async move {
                if !chunk.content.is_empty() {
                    tx.send(StreamUpdate::Fragment(chunk.content))
                        .map_err(|_| anyhow::anyhow!("stream consumer dropped"))?;
                }
                Ok(())
            })
        };
        let full = self.client.complete_stream(messages, &mut callback).await?;
        let _ = updates.send(StreamUpdate::Done);
        Ok(full)
    }
}
