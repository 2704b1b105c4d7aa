//! PDF text extraction using lopdf and pdf-extract.

use lopdf::Document;
use tracing::debug;

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Extract the text layer of every page, joined with newlines.
///
/// A page without a text layer contributes an empty string; there is no
/// OCR fallback. The final string is trimmed of surrounding whitespace.
pub fn extract_text(data: &[u8]) -> Result<String> {
    let doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

    let page_count = doc.get_pages().len();
    if page_count == 0 {
        return Err(PdfError::NoPages);
    }
    debug!("loaded PDF with {} pages", page_count);

    let pages = pdf_extract::extract_text_from_mem_by_pages(data)
        .map_err(|e| PdfError::TextExtraction(e.to_string()))?;

    Ok(join_pages(&pages))
}

fn join_pages(pages: &[String]) -> String {
    pages.join("\n").trim().to_string()
}
