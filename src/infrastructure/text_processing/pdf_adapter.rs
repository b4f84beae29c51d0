use std::io::Write;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use pdf_oxide::PdfDocument;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{Document, FileFormat};

use super::text_sanitizer::sanitize_extracted_text;

const DEFAULT_EXTRACTION_TIMEOUT: Duration = Duration::from_secs(30);

/// Extracts PDF text page by page, in page order.
pub struct PdfAdapter {
    timeout: Duration,
}

impl Default for PdfAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
struct PdfPages {
    total: usize,
    texts: Vec<String>,
}

impl PdfAdapter {
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_EXTRACTION_TIMEOUT,
        }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }

    fn read_pages(path: &Path) -> Result<PdfPages, FileLoaderError> {
        let mut doc = PdfDocument::open(path)
            .map_err(|e| FileLoaderError::ExtractionFailed(format!("invalid PDF file: {e}")))?;

        let total = doc.page_count().map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("failed to read page count: {e}"))
        })?;

        collect_pages(total, (0..total).map(|page_index| doc.extract_text(page_index)))
    }
}

/// Keeps non-blank pages in order. Any unreadable page fails the whole
/// document, so a comparison never runs on a partial text.
fn collect_pages<E: std::fmt::Display>(
    total: usize,
    pages: impl Iterator<Item = Result<String, E>>,
) -> Result<PdfPages, FileLoaderError> {
    let mut texts = Vec::with_capacity(total);
    let mut failed = Vec::new();

    for (index, page) in pages.enumerate() {
        match page {
            Ok(text) if !text.trim().is_empty() => texts.push(text),
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(page = index + 1, error = %e, "Unreadable PDF page");
                failed.push((index + 1).to_string());
            }
        }
    }

    if !failed.is_empty() {
        return Err(FileLoaderError::ExtractionFailed(format!(
            "{} of {total} PDF pages could not be read (pages {})",
            failed.len(),
            failed.join(", ")
        )));
    }

    Ok(PdfPages { total, texts })
}

#[async_trait]
impl FileLoader for PdfAdapter {
    #[tracing::instrument(skip(self, data), fields(filename = %document.filename))]
    async fn extract_text(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<String, FileLoaderError> {
        if document.format != FileFormat::Pdf {
            return Err(FileLoaderError::UnsupportedFormat(
                document.format.extension().to_string(),
            ));
        }

        let mut temp_file = tempfile::NamedTempFile::new().map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("failed to create temp file: {e}"))
        })?;

        temp_file.write_all(data).map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("failed to write temp file: {e}"))
        })?;

        let temp_path = temp_file.path().to_path_buf();

        let pages = tokio::time::timeout(
            self.timeout,
            tokio::task::spawn_blocking(move || Self::read_pages(&temp_path)),
        )
        .await
        .map_err(|_| FileLoaderError::ExtractionFailed("PDF extraction timed out".to_string()))?
        .map_err(|e| FileLoaderError::ExtractionFailed(format!("task join error: {e}")))??;

        drop(temp_file);

        tracing::info!(
            pages_total = pages.total,
            pages_with_text = pages.texts.len(),
            "PDF text extraction complete"
        );

        let text = pages
            .texts
            .iter()
            .map(|page| sanitize_extracted_text(page))
            .filter(|page| !page.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n");

        if text.is_empty() {
            return Err(FileLoaderError::NoTextFound(document.filename.clone()));
        }

        Ok(text)
    }
}
