//! Document-QA bots: ask for a file at session start, extract and truncate its
//! text, then answer questions grounded in that document with one reply per
//! question (no streaming).

use async_trait::async_trait;
use chat_core::{ChatUi, FileRequest, HandlerError, Result, Session, SessionHandler};
use chat_pipeline::{QaPipeline, SessionState};
use doc_loader::{load_document, DocumentFormat, ALLOWED_MIME_TYPES, MAX_UPLOAD_MB};
use llm_client::LlmClient;
use prompt::PromptTemplate;
use std::sync::Arc;
use tracing::info;

/// Fixed template answered over the uploaded document.
pub const DOC_QA_TEMPLATE: &str = "Please answer the questions based on the document.\ndocument:\n{document}\nquestion:\n{question}";

/// Upload prompt when any supported document is accepted.
pub const ASK_ANY_DOCUMENT: &str = "Please upload a PDF/WORD/EXCEL file to begin!";

/// Upload prompt when only PDF is accepted.
pub const ASK_PDF: &str = "Please upload a PDF file to begin!";

/// Rejection for extensions outside the allowed set.
pub const UNSUPPORTED_FORMAT_MESSAGE: &str =
    "The format of uploaded file is not supported. Please upload word/excel/pdf files.";

/// Document-grounded QA bot. `on_start` asks for a file, extracts and stores its
/// text truncated to the character budget, and builds the session pipeline;
/// `on_message` answers each question with one batch reply.
pub struct DocQaHandler {
    client: Arc<dyn LlmClient>,
    file_request: FileRequest,
}

impl DocQaHandler {
    /// Accepts PDF, Word, and Excel uploads.
    pub fn office(client: Arc<dyn LlmClient>) -> Self {
        let file_request = FileRequest::new(ASK_ANY_DOCUMENT)
            .with_accepted_mime_types(ALLOWED_MIME_TYPES.iter().map(|s| s.to_string()).collect())
            .with_max_size_mb(MAX_UPLOAD_MB);
        Self {
            client,
            file_request,
        }
    }

    /// Accepts PDF uploads only.
    pub fn pdf_only(client: Arc<dyn LlmClient>) -> Self {
        let file_request = FileRequest::new(ASK_PDF)
            .with_accepted_mime_types(vec!["application/pdf".to_string()])
            .with_max_size_mb(MAX_UPLOAD_MB);
        Self {
            client,
            file_request,
        }
    }
}

#[async_trait]
impl SessionHandler for DocQaHandler {
    type State = SessionState;

    async fn on_start(
        &self,
        session: &Session,
        state: &mut SessionState,
        ui: Arc<dyn ChatUi>,
    ) -> Result<()> {
        // Blocks until the user supplies a file; the wait has no timeout.
        let file = ui.ask_file(session, &self.file_request).await?;

        match DocumentFormat::from_file_name(&file.name) {
            Some(format) => {
                // Extractor failures propagate to the runner's error surface.
                let document =
                    load_document(&file.path, format).map_err(anyhow::Error::from)?;
                info!(
                    chat_id = session.chat_id,
                    file = %file.name,
                    total_chars = document.total_chars,
                    "document stored for session"
                );
                ui.send_message(
                    session,
                    &format!(
                        "`{}` uploaded, it contains {} characters!",
                        file.name, document.total_chars
                    ),
                )
                .await?;
                state.document = Some(document.text);
            }
            None => {
                // Unsupported extension: reject, store nothing, keep the session.
                info!(chat_id = session.chat_id, file = %file.name, "unsupported upload rejected");
                ui.send_message(session, UNSUPPORTED_FORMAT_MESSAGE).await?;
            }
        }

        let pipeline = QaPipeline::new(PromptTemplate::new(DOC_QA_TEMPLATE), self.client.clone());
        state.pipeline = Some(Arc::new(pipeline));
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
        let answer = pipeline.invoke(text, state.document.as_deref()).await?;
        ui.send_message(session, &answer).await?;
        Ok(())
    }
}
