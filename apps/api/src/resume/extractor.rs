//! Resume text extraction: uploaded PDF bytes to plain text, page order preserved.
//!
//! No OCR and no layout reconstruction. A document that parses but carries no text
//! layer is rejected, since every generation prompt needs the resume text.

use thiserror::Error;
use tracing::debug;

const PDF_MAGIC: &[u8] = b"%PDF-";

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("the uploaded file is empty")]
    Empty,

    #[error("the uploaded file is not a PDF document")]
    NotPdf,

    #[error("the PDF could not be parsed: {0}")]
    Malformed(String),

    #[error("the PDF contains no extractable text")]
    NoText,
}

/// Extracts the visible text of every page, concatenated in page order.
///
/// Parsing is CPU-bound and runs on the blocking pool. A panic inside the PDF
/// library surfaces as `Malformed` instead of tearing down the request.
pub async fn extract_resume_text(bytes: Vec<u8>) -> Result<String, ExtractError> {
    check_header(&bytes)?;

    let text = tokio::task::spawn_blocking(move || read_text_layer(&bytes))
        .await
        .map_err(|e| ExtractError::Malformed(format!("parser aborted: {e}")))??;

    if text.trim().is_empty() {
        return Err(ExtractError::NoText);
    }

    debug!(chars = text.chars().count(), "Extracted resume text");
    Ok(text)
}

/// Loads the object graph first so a damaged or page-less file is always
/// `Malformed`, then pulls the text layer.
fn read_text_layer(bytes: &[u8]) -> Result<String, ExtractError> {
    let document =
        lopdf::Document::load_mem(bytes).map_err(|e| ExtractError::Malformed(e.to_string()))?;
    if document.get_pages().is_empty() {
        return Err(ExtractError::Malformed("document has no pages".to_string()));
    }

    pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractError::Malformed(e.to_string()))
}

fn check_header(bytes: &[u8]) -> Result<(), ExtractError> {
    if bytes.is_empty() {
        return Err(ExtractError::Empty);
    }
    // Some producers emit a few junk bytes before the header; readers tolerate 1KB.
    let window = &bytes[..bytes.len().min(1024)];
    if !window.windows(PDF_MAGIC.len()).any(|w| w == PDF_MAGIC) {
        return Err(ExtractError::NotPdf);
    }
    Ok(())
}
