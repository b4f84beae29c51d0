use std::collections::HashMap;

use axum::extract::Multipart;

use crate::domain::{AnalysisType, DocumentSlot, UploadedDocument};

use super::error::ApiError;

const ANALYSIS_TYPE_FIELD: &str = "analysis_type";

/// The multipart fields this service understands, read fully into memory.
#[derive(Debug, Default)]
pub struct UploadForm {
    files: HashMap<String, UploadedDocument>,
    analysis_type: Option<String>,
}

impl UploadForm {
    pub async fn read(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            match field.file_name().map(base_name) {
                Some(filename) => {
                    let data = field.bytes().await?;
                    // Browsers submit an empty part for a file input left blank.
                    if filename.is_empty() {
                        continue;
                    }
                    tracing::debug!(field = %name, %filename, bytes = data.len(), "File received");
                    form.files
                        .insert(name, UploadedDocument::new(filename, data.to_vec()));
                }
                None if name == ANALYSIS_TYPE_FIELD => {
                    form.analysis_type = Some(field.text().await?);
                }
                None => tracing::debug!(field = %name, "Ignoring unknown form field"),
            }
        }

        Ok(form)
    }

    pub fn take(&mut self, slot: DocumentSlot) -> Option<UploadedDocument> {
        self.files.remove(slot.field_name())
    }

    pub fn analysis_type(&self) -> AnalysisType {
        AnalysisType::parse_lenient(self.analysis_type.as_deref())
    }
}

/// Drops any client-side directory prefix from a submitted filename.
fn base_name(filename: &str) -> String {
    filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}
