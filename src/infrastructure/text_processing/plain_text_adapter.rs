use std::borrow::Cow;

use async_trait::async_trait;
use encoding_rs::WINDOWS_1252;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{Document, FileFormat};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Reads `.txt` uploads: UTF-8 (with or without BOM), otherwise Windows-1252.
#[derive(Debug, Default)]
pub struct PlainTextAdapter;

impl PlainTextAdapter {
    fn decode(data: &[u8]) -> (Cow<'_, str>, &'static str) {
        let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);

        match std::str::from_utf8(data) {
            Ok(text) => (Cow::Borrowed(text), "utf-8"),
            Err(_) => {
                let (text, _) = WINDOWS_1252.decode_without_bom_handling(data);
                (text, "windows-1252")
            }
        }
    }
}

#[async_trait]
impl FileLoader for PlainTextAdapter {
    async fn extract_text(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<String, FileLoaderError> {
        if document.format != FileFormat::Text {
            return Err(FileLoaderError::UnsupportedFormat(
                document.format.extension().to_string(),
            ));
        }

        let (text, encoding) = Self::decode(data);

        if text.trim().is_empty() {
            return Err(FileLoaderError::NoTextFound(document.filename.clone()));
        }

        tracing::debug!(
            filename = %document.filename,
            encoding,
            chars = text.chars().count(),
            "Plain text decoded"
        );

        Ok(text.into_owned())
    }
}
