use std::path::Path;

use tracing::debug;

use crate::errors::AppError;

/// Reads the text layer of a PDF. Scanned pages without text yield nothing.
pub async fn extract_pdf_text(path: &Path) -> Result<String, AppError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| AppError::Document(format!("cannot read {}: {e}", path.display())))?;

    // pdf-extract is synchronous and CPU-bound, and may panic on malformed input
    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
        .await
        .map_err(|e| AppError::Document(format!("PDF extraction aborted for {}: {e}", path.display())))?
        .map_err(|e| AppError::Document(format!("cannot extract text from {}: {e}", path.display())))?;

    debug!("Extracted {} chars from {}", text.len(), path.display());
    Ok(text)
}

/// Text of a `.pdf` (any case) or of a plain-text file.
/// A document with no text at all is a `Document` error.
pub async fn read_document(path: &Path) -> Result<String, AppError> {
    let text = if is_pdf(path) {
        extract_pdf_text(path).await?
    } else {
        tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AppError::Document(format!("cannot read {}: {e}", path.display())))?
    };

    if text.trim().is_empty() {
        return Err(AppError::Document(format!(
            "no text found in {}",
            path.display()
        )));
    }
    Ok(text)
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}
