use std::sync::atomic::{AtomicUsize, Ordering};

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::Document;

/// Treats every upload as UTF-8 text and counts how often it is asked to extract.
#[derive(Debug, Default)]
pub struct MockFileLoader {
    calls: AtomicUsize,
    failure: Option<FileLoaderError>,
}

impl MockFileLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(error: FileLoaderError) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            failure: Some(error),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl FileLoader for MockFileLoader {
    async fn extract_text(&self, data: &[u8], _doc: &Document) -> Result<String, FileLoaderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(error) = &self.failure {
            return Err(error.clone());
        }

        String::from_utf8(data.to_vec())
            .map_err(|e| FileLoaderError::ExtractionFailed(e.to_string()))
    }
}
