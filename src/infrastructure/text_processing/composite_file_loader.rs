use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{Document, FileFormat};

use super::{DocxAdapter, PdfAdapter, PlainTextAdapter};

/// Dispatches extraction to the adapter registered for the document's format.
pub struct CompositeFileLoader {
    adapters: HashMap<FileFormat, Arc<dyn FileLoader>>,
}

impl CompositeFileLoader {
    pub fn new(adapters: Vec<(FileFormat, Arc<dyn FileLoader>)>) -> Self {
        Self {
            adapters: adapters.into_iter().collect(),
        }
    }

    pub fn with_default_adapters() -> Self {
        let pdf: Arc<dyn FileLoader> = Arc::new(PdfAdapter::new());
        let docx: Arc<dyn FileLoader> = Arc::new(DocxAdapter::new());
        let text: Arc<dyn FileLoader> = Arc::new(PlainTextAdapter);

        Self::new(vec![
            (FileFormat::Pdf, pdf),
            (FileFormat::Docx, docx),
            (FileFormat::Text, text),
        ])
    }

    pub fn supports(&self, format: FileFormat) -> bool {
        self.adapters.contains_key(&format)
    }
}

#[async_trait]
impl FileLoader for CompositeFileLoader {
    async fn extract_text(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<String, FileLoaderError> {
        let adapter = self.adapters.get(&document.format).ok_or_else(|| {
            FileLoaderError::UnsupportedFormat(document.format.extension().to_string())
        })?;

        adapter.extract_text(data, document).await
    }
}
