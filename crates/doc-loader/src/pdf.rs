//! PDF extraction via lopdf: one segment per page, in page order.

use lopdf::Document;
use std::path::Path;

use crate::ExtractError;

/// Extracts the text of each page. `get_pages` keys by page number, so the
/// segment order follows the document's page order.
pub fn extract_pdf(path: &Path) -> Result<Vec<String>, ExtractError> {
    let doc = Document::load(path).map_err(|e| ExtractError::Pdf(e.to_string()))?;
    let mut segments = Vec::new();
    for (&page_number, _) in doc.get_pages().iter() {
        let text = doc
            .extract_text(&[page_number])
            .map_err(|e| ExtractError::Pdf(e.to_string()))?;
        segments.push(text);
    }
    Ok(segments)
}
