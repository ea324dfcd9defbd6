//! DOCX extraction: reads `word/document.xml` from the zip container and collects
//! run text, with paragraph ends and explicit breaks rendered as newlines.

use quick_xml::events::Event;
use quick_xml::Reader;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use zip::ZipArchive;

use crate::ExtractError;

const DOCUMENT_PART: &str = "word/document.xml";

/// Extracts the whole document as a single segment: run text (`w:t`) in document
/// order, `\t` for tabs, `\n` at paragraph ends and `w:br`/`w:cr`.
pub fn extract_word(path: &Path) -> Result<Vec<String>, ExtractError> {
    let file = File::open(path)?;
    let mut archive = ZipArchive::new(file).map_err(|e| ExtractError::Word(e.to_string()))?;
    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| ExtractError::Word(e.to_string()))?
        .read_to_string(&mut xml)?;
    Ok(vec![document_text(&xml)?])
}

/// Walks the document XML and collects visible text.
fn document_text(xml: &str) -> Result<String, ExtractError> {
    let mut reader = Reader::from_str(xml);
    let mut out = String::new();
    let mut in_text = false;
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.local_name().as_ref() == b"t" => in_text = true,
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"p" => out.push('\n'),
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"tab" => out.push('\t'),
                b"br" | b"cr" => out.push('\n'),
                _ => {}
            },
            Ok(Event::Text(t)) if in_text => {
                let text = t.decode().map_err(|e| ExtractError::Word(e.to_string()))?;
                out.push_str(&text);
            }
            // Entity references inside run text are reported as separate events.
            Ok(Event::GeneralRef(e)) if in_text => {
                if let Some(ch) = resolve_reference(&e) {
                    out.push(ch);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ExtractError::Word(e.to_string())),
            Ok(_) => {}
        }
    }
    Ok(out)
}

/// Resolves predefined (`amp`, `lt`, ...) and numeric (`#233`, `#x41`) references.
fn resolve_reference(name: &[u8]) -> Option<char> {
    match name {
        b"amp" => Some('&'),
        b"lt" => Some('<'),
        b"gt" => Some('>'),
        b"quot" => Some('"'),
        b"apos" => Some('\''),
        _ => {
            let s = std::str::from_utf8(name).ok()?;
            let code = s.strip_prefix('#')?;
            let value = if let Some(hex) = code.strip_prefix('x').or_else(|| code.strip_prefix('X'))
            {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                code.parse().ok()?
            };
            char::from_u32(value)
        }
    }
}
