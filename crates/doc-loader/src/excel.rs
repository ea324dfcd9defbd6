//! XLSX extraction via calamine: one segment per sheet, in workbook order.

use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use std::path::Path;

use crate::ExtractError;

/// Extracts one segment per sheet: rows newline-joined, cells tab-joined.
pub fn extract_excel(path: &Path) -> Result<Vec<String>, ExtractError> {
    let mut workbook: Xlsx<_> =
        open_workbook(path).map_err(|e: calamine::XlsxError| ExtractError::Excel(e.to_string()))?;
    let sheet_names = workbook.sheet_names().to_owned();
    let mut segments = Vec::new();
    for name in sheet_names {
        let range = workbook
            .worksheet_range(&name)
            .map_err(|e| ExtractError::Excel(e.to_string()))?;
        segments.push(sheet_text(&range));
    }
    Ok(segments)
}

/// Renders one sheet as text: one line per row, cells tab-separated.
/// Empty cells render as empty strings.
fn sheet_text(range: &Range<Data>) -> String {
    let mut out = String::new();
    for row in range.rows() {
        let line: Vec<String> = row.iter().map(|cell| cell.to_string()).collect();
        out.push_str(&line.join("\t"));
        out.push('\n');
    }
    out
}
