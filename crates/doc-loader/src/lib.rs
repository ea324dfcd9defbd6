//! # doc-loader
//!
//! Format-specific text extraction for uploaded documents (PDF/Word/Excel), plus
//! the merge-and-truncate step that turns ordered page/element segments into the
//! single document string a session stores.
//!
//! ## External interactions
//!
//! - **lopdf**: PDF page text (one segment per page, in page order).
//! - **zip + quick-xml**: DOCX main document part (`word/document.xml`).
//! - **calamine**: XLSX workbook (one segment per sheet, in sheet order).

mod excel;
mod pdf;
mod word;

use std::path::Path;
use thiserror::Error;
use tracing::info;

pub use excel::extract_excel;
pub use pdf::extract_pdf;
pub use word::extract_word;

/// Character budget for the stored document text. Text beyond this is dropped;
/// truncation is character-exact and not boundary-aware.
pub const MAX_DOC_CHARS: usize = 5000;

/// Upload size cap in megabytes.
pub const MAX_UPLOAD_MB: u64 = 20;

/// Extensions the extractors accept. The authoritative check; compared lowercase.
pub const ALLOWED_EXTENSIONS: [&str; 3] = [".pdf", ".docx", ".xlsx"];

/// Advisory MIME accept list shown in upload prompts. Broader than
/// [`ALLOWED_EXTENSIONS`]; the extension check decides what gets extracted.
pub const ALLOWED_MIME_TYPES: [&str; 5] = [
    "application/pdf",
    "application/octet-stream",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "application/vnd.openxmlformats-officedocument.presentationml.presentation",
];

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("Word error: {0}")]
    Word(String),

    #[error("Excel error: {0}")]
    Excel(String),
}

/// Document format, dispatched from the uploaded file's extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Word,
    Excel,
}

impl DocumentFormat {
    /// Maps a dot-extension (".pdf") to a format; case-insensitive.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            ".pdf" => Some(Self::Pdf),
            ".docx" => Some(Self::Word),
            ".xlsx" => Some(Self::Excel),
            _ => None,
        }
    }

    /// Takes the dot-extension of a file name and maps it to a format.
    pub fn from_file_name(name: &str) -> Option<Self> {
        Self::from_extension(&extension_of(name)?)
    }
}

/// The dot-extension of a file name ("report.pdf" -> ".pdf"), if any.
pub fn extension_of(name: &str) -> Option<String> {
    name.rfind('.').map(|i| name[i..].to_string())
}

/// Ordered segments merged and limited to the character budget.
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    /// Merged text, truncated to the budget passed to [`merge_and_truncate`].
    pub text: String,
    /// Character count of the full merged text before truncation.
    pub total_chars: usize,
}

/// Dispatches to the extractor for `format`. Segments come back in source
/// order: one per PDF page, one per Word document, one per Excel sheet.
pub fn extract(path: &Path, format: DocumentFormat) -> Result<Vec<String>, ExtractError> {
    match format {
        DocumentFormat::Pdf => extract_pdf(path),
        DocumentFormat::Word => extract_word(path),
        DocumentFormat::Excel => extract_excel(path),
    }
}

/// Concatenates segments in order and truncates to `max_chars` characters.
pub fn merge_and_truncate(segments: &[String], max_chars: usize) -> LoadedDocument {
    let merged: String = segments.concat();
    let total_chars = merged.chars().count();
    LoadedDocument {
        text: truncate_chars(&merged, max_chars),
        total_chars,
    }
}

/// Truncates to at most `max_chars` characters (not bytes). Never splits a
/// character; may split words and sentences.
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

/// Extracts `path` as `format` and returns the merged document limited to
/// [`MAX_DOC_CHARS`].
pub fn load_document(path: &Path, format: DocumentFormat) -> Result<LoadedDocument, ExtractError> {
    let segments = extract(path, format)?;
    let document = merge_and_truncate(&segments, MAX_DOC_CHARS);
    info!(
        segments = segments.len(),
        total_chars = document.total_chars,
        stored_chars = document.text.chars().count(),
        "document extracted"
    );
    Ok(document)
}
