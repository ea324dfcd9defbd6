//! Integration tests for [`chat_bots::DocQaHandler`].
//!
//! Covers: supported upload (document stored, truncated, acknowledged), unsupported
//! extension (rejection message, nothing stored, session still answers), and the
//! exact prompt submitted to the model. Uses MockUi/MockLlm and generated DOCX
//! fixtures; no Telegram or OpenAI calls.

mod common;

use chat_bots::doc_qa::{DocQaHandler, UNSUPPORTED_FORMAT_MESSAGE};
use chat_core::{ChatUi, SessionHandler, UploadedFile};
use chat_pipeline::SessionState;
use common::{drain_events, test_session, MockLlm, MockUi, UiEvent};
use doc_loader::MAX_DOC_CHARS;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

// --- Fixtures ---

fn write_docx(dir: &Path, name: &str, paragraphs: &[&str]) -> PathBuf {
    let body: String = paragraphs
        .iter()
        .map(|p| format!("<w:p><w:r><w:t>{}</w:t></w:r></w:p>", p))
        .collect();
    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
        body
    );
    let path = dir.join(name);
    let file = std::fs::File::create(&path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default();
    zip.start_file("word/document.xml", options).unwrap();
    zip.write_all(xml.as_bytes()).unwrap();
    zip.finish().unwrap();
    path
}

fn uploaded(name: &str, path: PathBuf) -> UploadedFile {
    let size_bytes = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
    UploadedFile {
        name: name.to_string(),
        path,
        mime_type: None,
        size_bytes,
    }
}

// --- on_start ---

/// **Test: A supported upload stores the extracted text and acknowledges with the
/// pre-truncation character count.**
#[tokio::test]
async fn test_on_start_stores_supported_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_docx(dir.path(), "notes.docx", &["Hello document."]);

    let llm = Arc::new(MockLlm::new("ok"));
    let handler = DocQaHandler::office(llm);
    let (ui, mut rx) = MockUi::with_receiver();
    ui.program_file(uploaded("notes.docx", path));

    let session = test_session();
    let mut state = SessionState::default();
    handler
        .on_start(&session, &mut state, ui.clone() as Arc<dyn ChatUi>)
        .await
        .unwrap();

    assert_eq!(state.document.as_deref(), Some("Hello document.\n"));
    assert!(state.pipeline.is_some());

    let events = drain_events(&mut rx);
    // chars: "Hello document." + paragraph newline = 16
    assert!(events.contains(&UiEvent::Sent(
        "`notes.docx` uploaded, it contains 16 characters!".to_string()
    )));
}

/// **Test: The stored document never exceeds the character budget.**
#[tokio::test]
async fn test_on_start_truncates_to_budget() {
    let dir = tempfile::tempdir().unwrap();
    let long = "a".repeat(6000);
    let path = write_docx(dir.path(), "long.docx", &[&long]);

    let llm = Arc::new(MockLlm::new("ok"));
    let handler = DocQaHandler::office(llm);
    let (ui, mut rx) = MockUi::with_receiver();
    ui.program_file(uploaded("long.docx", path));

    let session = test_session();
    let mut state = SessionState::default();
    handler
        .on_start(&session, &mut state, ui.clone() as Arc<dyn ChatUi>)
        .await
        .unwrap();

    let document = state.document.unwrap();
    assert_eq!(document.chars().count(), MAX_DOC_CHARS);

    // The acknowledgment reports the pre-truncation count (6000 + newline).
    let events = drain_events(&mut rx);
    assert!(events.contains(&UiEvent::Sent(
        "`long.docx` uploaded, it contains 6001 characters!".to_string()
    )));
}

/// **Test: An unsupported extension sends the rejection message, stores no
/// document, and still builds the pipeline.**
#[tokio::test]
async fn test_on_start_rejects_unsupported_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "plain text").unwrap();

    let llm = Arc::new(MockLlm::new("ok"));
    let handler = DocQaHandler::office(llm);
    let (ui, mut rx) = MockUi::with_receiver();
    ui.program_file(uploaded("notes.txt", path));

    let session = test_session();
    let mut state = SessionState::default();
    handler
        .on_start(&session, &mut state, ui.clone() as Arc<dyn ChatUi>)
        .await
        .unwrap();

    assert!(state.document.is_none());
    assert!(state.pipeline.is_some());

    let events = drain_events(&mut rx);
    assert!(events.contains(&UiEvent::Sent(UNSUPPORTED_FORMAT_MESSAGE.to_string())));
}

/// **Test: A corrupt supported file propagates an extraction error; nothing is stored.**
#[tokio::test]
async fn test_on_start_corrupt_file_propagates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.docx");
    std::fs::write(&path, b"not a zip archive").unwrap();

    let llm = Arc::new(MockLlm::new("ok"));
    let handler = DocQaHandler::office(llm);
    let (ui, _rx) = MockUi::with_receiver();
    ui.program_file(uploaded("broken.docx", path));

    let session = test_session();
    let mut state = SessionState::default();
    let result = handler
        .on_start(&session, &mut state, ui.clone() as Arc<dyn ChatUi>)
        .await;

    assert!(result.is_err());
    assert!(state.document.is_none());
}

// --- on_message ---

/// **Test: The prompt submitted to the model is the fixed template with the stored
/// document and the question substituted exactly; the reply is sent as one message.**
#[tokio::test]
async fn test_on_message_prompt_and_reply() {
    let llm = Arc::new(MockLlm::new("It is in chapter two."));
    let handler = DocQaHandler::office(llm.clone());
    let (ui, mut rx) = MockUi::with_receiver();

    let session = test_session();
    let mut state = SessionState::default();
    state.document = Some("The treaty was signed in 1648.".to_string());
    state.pipeline = Some(Arc::new(chat_pipeline::QaPipeline::new(
        prompt::PromptTemplate::new(chat_bots::doc_qa::DOC_QA_TEMPLATE),
        llm.clone(),
    )));

    handler
        .on_message(
            &session,
            &mut state,
            ui.clone() as Arc<dyn ChatUi>,
            "When was the treaty signed?",
        )
        .await
        .unwrap();

    let requests = llm.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0][0].content,
        "Please answer the questions based on the document.\ndocument:\nThe treaty was signed in 1648.\nquestion:\nWhen was the treaty signed?"
    );

    let events = drain_events(&mut rx);
    assert_eq!(events, vec![UiEvent::Sent("It is in chapter two.".to_string())]);
}

/// **Test: After a rejected upload the session still answers, with an empty
/// document slot.**
#[tokio::test]
async fn test_on_message_without_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "plain text").unwrap();

    let llm = Arc::new(MockLlm::new("answered without context"));
    let handler = DocQaHandler::office(llm.clone());
    let (ui, mut rx) = MockUi::with_receiver();
    ui.program_file(uploaded("notes.txt", path));

    let session = test_session();
    let mut state = SessionState::default();
    handler
        .on_start(&session, &mut state, ui.clone() as Arc<dyn ChatUi>)
        .await
        .unwrap();
    drain_events(&mut rx);

    handler
        .on_message(&session, &mut state, ui.clone() as Arc<dyn ChatUi>, "Q")
        .await
        .unwrap();

    assert_eq!(
        llm.requests()[0][0].content,
        "Please answer the questions based on the document.\ndocument:\n\nquestion:\nQ"
    );
    let events = drain_events(&mut rx);
    assert_eq!(
        events,
        vec![UiEvent::Sent("answered without context".to_string())]
    );
}

/// **Test: on_message without a pipeline is a state error.**
#[tokio::test]
async fn test_on_message_without_pipeline_is_error() {
    let llm = Arc::new(MockLlm::new("ok"));
    let handler = DocQaHandler::office(llm);
    let (ui, _rx) = MockUi::with_receiver();

    let session = test_session();
    let mut state = SessionState::default();
    let result = handler
        .on_message(&session, &mut state, ui.clone() as Arc<dyn ChatUi>, "Q")
        .await;
    assert!(result.is_err());
}
