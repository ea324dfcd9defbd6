//! Streaming historian bot: builds a question-only pipeline per session and streams
//! every answer by editing a placeholder message in place.

use async_trait::async_trait;
use chat_core::{ChatUi, HandlerError, Result, Session, SessionHandler};
use chat_pipeline::{run_stream_relay, QaPipeline, SessionState, StreamRelayConfig};
use llm_client::LlmClient;
use prompt::PromptTemplate;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::info;

/// System prompt of the historian persona.
pub const HISTORIAN_SYSTEM_PROMPT: &str = "You're a very knowledgeable historian who provides accurate and eloquent answers to historical questions.";

/// The question is forwarded verbatim as the human message.
pub const HISTORIAN_TEMPLATE: &str = "{question}";

/// Streaming QA bot with a historian persona. One pipeline per session, built in
/// `on_start`; every message is answered by streaming into an edited placeholder.
pub struct HistorianHandler {
    client: Arc<dyn LlmClient>,
    thinking_message: String,
}

impl HistorianHandler {
    pub fn new(client: Arc<dyn LlmClient>, thinking_message: impl Into<String>) -> Self {
        Self {
            client,
            thinking_message: thinking_message.into(),
        }
    }
}

#[async_trait]
impl SessionHandler for HistorianHandler {
    type State = SessionState;

    async fn on_start(
        &self,
        session: &Session,
        state: &mut SessionState,
        _ui: Arc<dyn ChatUi>,
    ) -> Result<()> {
        let pipeline = QaPipeline::new(
            PromptTemplate::new(HISTORIAN_TEMPLATE),
            self.client.clone(),
        )
        .with_system_prompt(HISTORIAN_SYSTEM_PROMPT);
        state.pipeline = Some(Arc::new(pipeline));
        info!(chat_id = session.chat_id, "historian pipeline ready");
        Ok(())
    }

    async fn on_message(
        &self,
        session: &Session,
        state: &mut SessionState,
        ui: Arc<dyn ChatUi>,
        text: &str,
    ) -> Result<()> {
        let pipeline = state
            .pipeline
            .clone()
            .ok_or_else(|| HandlerError::State("no pipeline for session".to_string()))?;

        let message_id = ui
            .send_message_and_return_id(session, &self.thinking_message)
            .await?;

        let (tx, rx) = mpsc::unbounded_channel();
        let relay = tokio::spawn(run_stream_relay(
            ui.clone(),
            session.clone(),
            message_id,
            rx,
            StreamRelayConfig::default(),
        ));

        let result = pipeline.invoke_stream(text, None, tx).await;
        // The relay performs the final edit with everything received, whether the
        // stream completed or the producer failed mid-way.
        let _ = relay.await;

        result?;
        Ok(())
    }
}
