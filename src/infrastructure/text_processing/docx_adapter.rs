use std::io::{Cursor, Read};
use std::time::Duration;

use async_trait::async_trait;
use quick_xml::Reader;
use quick_xml::events::Event;
use zip::ZipArchive;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{Document, FileFormat};

use super::text_sanitizer::sanitize_extracted_text;

const DOCUMENT_PART: &str = "word/document.xml";

/// Largest uncompressed `word/document.xml` accepted (64 MiB).
pub const DEFAULT_MAX_PART_BYTES: u64 = 64 * 1024 * 1024;

const DEFAULT_EXTRACTION_TIMEOUT: Duration = Duration::from_secs(30);

/// Reads `.docx` uploads straight from the OOXML package.
///
/// Paragraphs come out one per line. A paragraph nested inside another one
/// (text boxes, shapes) is emitted when it closes, ahead of its parent. Table
/// rows become a single line with the non-empty cell texts joined by ` | `.
#[derive(Debug, Clone)]
pub struct DocxAdapter {
    max_part_bytes: u64,
    timeout: Duration,
}

impl Default for DocxAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl DocxAdapter {
    pub fn new() -> Self {
        Self {
            max_part_bytes: DEFAULT_MAX_PART_BYTES,
            timeout: DEFAULT_EXTRACTION_TIMEOUT,
        }
    }

    pub fn with_max_part_bytes(mut self, max_part_bytes: u64) -> Self {
        self.max_part_bytes = max_part_bytes;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn read_document_part(data: &[u8], max_bytes: u64) -> Result<String, FileLoaderError> {
        let mut archive = ZipArchive::new(Cursor::new(data)).map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("not a valid DOCX file: {e}"))
        })?;

        let part = archive.by_name(DOCUMENT_PART).map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("{DOCUMENT_PART} missing: {e}"))
        })?;

        let too_large = || {
            FileLoaderError::ExtractionFailed(format!(
                "{DOCUMENT_PART} expands beyond the {max_bytes} byte limit"
            ))
        };

        // The declared size can lie, so the read itself is bounded too.
        if part.size() > max_bytes {
            return Err(too_large());
        }

        let mut xml = String::new();
        part.take(max_bytes + 1)
            .read_to_string(&mut xml)
            .map_err(|e| {
                FileLoaderError::ExtractionFailed(format!("failed to read {DOCUMENT_PART}: {e}"))
            })?;

        if xml.len() as u64 > max_bytes {
            return Err(too_large());
        }

        Ok(xml)
    }

    fn collect_blocks(xml: &str) -> Result<Vec<String>, FileLoaderError> {
        let mut reader = Reader::from_str(xml);
        let mut state = BlockCollector::default();

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => state.open(e.local_name().as_ref()),
                Ok(Event::Empty(e)) => state.empty(e.local_name().as_ref()),
                Ok(Event::Text(e)) if state.in_text => {
                    let text = e.unescape().map_err(|err| {
                        FileLoaderError::ExtractionFailed(format!("invalid text run: {err}"))
                    })?;
                    state.push_text(&text);
                }
                Ok(Event::End(e)) => state.close(e.local_name().as_ref()),
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(FileLoaderError::ExtractionFailed(format!(
                        "malformed {DOCUMENT_PART} at byte {}: {e}",
                        reader.buffer_position()
                    )));
                }
                _ => {}
            }
        }

        Ok(state.blocks)
    }

    fn read_blocks(data: &[u8], max_bytes: u64) -> Result<Vec<String>, FileLoaderError> {
        let xml = Self::read_document_part(data, max_bytes)?;
        Self::collect_blocks(&xml)
    }
}

#[derive(Default)]
struct BlockCollector {
    blocks: Vec<String>,
    /// One buffer per open `w:p`; the innermost paragraph is last.
    paragraphs: Vec<String>,
    cell: String,
    row: Vec<String>,
    in_text: bool,
    in_paragraph_properties: bool,
    table_depth: usize,
}

impl BlockCollector {
    fn open(&mut self, name: &[u8]) {
        match name {
            b"t" => self.in_text = true,
            b"pPr" => self.in_paragraph_properties = true,
            b"p" => self.paragraphs.push(String::new()),
            b"tbl" => self.table_depth += 1,
            b"tr" if self.table_depth == 1 => self.row.clear(),
            b"tc" if self.table_depth == 1 => self.cell.clear(),
            _ => {}
        }
    }

    fn empty(&mut self, name: &[u8]) {
        if self.in_paragraph_properties {
            return;
        }
        match name {
            b"tab" => self.push_text("\t"),
            b"br" | b"cr" => self.push_text("\n"),
            _ => {}
        }
    }

    fn push_text(&mut self, text: &str) {
        if let Some(paragraph) = self.paragraphs.last_mut() {
            paragraph.push_str(text);
        }
    }

    fn close(&mut self, name: &[u8]) {
        match name {
            b"t" => self.in_text = false,
            b"pPr" => self.in_paragraph_properties = false,
            b"p" => {
                if let Some(paragraph) = self.paragraphs.pop() {
                    self.finish_paragraph(&paragraph);
                }
            }
            b"tc" if self.table_depth == 1 => {
                let cell = self.cell.trim();
                if !cell.is_empty() {
                    self.row.push(cell.to_string());
                }
                self.cell.clear();
            }
            b"tr" if self.table_depth == 1 => {
                if !self.row.is_empty() {
                    self.blocks.push(self.row.join(" | "));
                }
                self.row.clear();
            }
            b"tbl" => self.table_depth = self.table_depth.saturating_sub(1),
            _ => {}
        }
    }

    fn finish_paragraph(&mut self, paragraph: &str) {
        let text = paragraph.trim();
        if text.is_empty() {
            return;
        }
        if self.table_depth > 0 {
            if !self.cell.is_empty() {
                self.cell.push(' ');
            }
            self.cell.push_str(text);
        } else {
            self.blocks.push(text.to_string());
        }
    }
}

#[async_trait]
impl FileLoader for DocxAdapter {
    #[tracing::instrument(skip(self, data), fields(filename = %document.filename))]
    async fn extract_text(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<String, FileLoaderError> {
        if document.format != FileFormat::Docx {
            return Err(FileLoaderError::UnsupportedFormat(
                document.format.extension().to_string(),
            ));
        }

        let owned = data.to_vec();
        let max_bytes = self.max_part_bytes;

        let blocks = tokio::time::timeout(
            self.timeout,
            tokio::task::spawn_blocking(move || Self::read_blocks(&owned, max_bytes)),
        )
        .await
        .map_err(|_| FileLoaderError::ExtractionFailed("DOCX extraction timed out".to_string()))?
        .map_err(|e| FileLoaderError::ExtractionFailed(format!("task join error: {e}")))??;

        tracing::info!(blocks = blocks.len(), "DOCX text extraction complete");

        let text = sanitize_extracted_text(&blocks.join("\n"));
        if text.is_empty() {
            return Err(FileLoaderError::NoTextFound(document.filename.clone()));
        }

        Ok(text)
    }
}
