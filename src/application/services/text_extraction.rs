use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{Document, ExtractedText, FileFormat};

/// Resolves the format from `extension`, then extracts and measures the text.
#[tracing::instrument(skip(loader, data), fields(bytes = data.len()))]
pub async fn extract_document<F>(
    loader: &F,
    data: &[u8],
    filename: &str,
    extension: &str,
) -> Result<ExtractedText, FileLoaderError>
where
    F: FileLoader + ?Sized,
{
    let format = FileFormat::from_extension(extension)
        .ok_or_else(|| FileLoaderError::UnsupportedFormat(extension.to_ascii_lowercase()))?;
    let document = Document::new(filename.to_string(), format, data.len() as u64);

    extract_text(loader, data, &document).await
}

pub async fn extract_text<F>(
    loader: &F,
    data: &[u8],
    document: &Document,
) -> Result<ExtractedText, FileLoaderError>
where
    F: FileLoader + ?Sized,
{
    let raw = loader.extract_text(data, document).await?;

    let text = ExtractedText::new(&raw)
        .ok_or_else(|| FileLoaderError::NoTextFound(document.filename.clone()))?;

    let stats = text.stats();
    tracing::debug!(
        filename = %document.filename,
        format = %document.format,
        word_count = stats.word_count,
        char_count = stats.char_count,
        "Text extracted"
    );

    Ok(text)
}
