use crate::domain::{Document, DocumentSlot, FileFormat, UploadedDocument};

pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 16 * 1024 * 1024;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{} is required", .0.label())]
    Missing(DocumentSlot),
    #[error("{} is empty", .0.label())]
    Empty(DocumentSlot),
    #[error(
        "{} is too large ({:.1} MB); the maximum is {:.0} MB",
        .slot.label(),
        megabytes(.size_bytes),
        megabytes(.limit_bytes)
    )]
    TooLarge {
        slot: DocumentSlot,
        size_bytes: u64,
        limit_bytes: u64,
    },
    #[error(
        "{} has unsupported file type '.{extension}'; use {}",
        .slot.label(),
        FileFormat::supported_list()
    )]
    UnsupportedFormat {
        slot: DocumentSlot,
        extension: String,
    },
    #[error(
        "{} is too short for analysis (at least {min_chars} characters needed)",
        .slot.label()
    )]
    TooShort { slot: DocumentSlot, min_chars: usize },
}

/// An upload that passed every check, borrowed for the extraction step.
#[derive(Debug, Clone)]
pub struct ValidatedUpload<'a> {
    pub slot: DocumentSlot,
    pub document: Document,
    pub data: &'a [u8],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadPolicy {
    max_bytes: u64,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_UPLOAD_BYTES)
    }
}

impl UploadPolicy {
    pub fn new(max_bytes: u64) -> Self {
        Self { max_bytes }
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// Checks presence, emptiness, size, then extension, in that order.
    pub fn validate<'a>(
        &self,
        slot: DocumentSlot,
        upload: Option<&'a UploadedDocument>,
    ) -> Result<ValidatedUpload<'a>, ValidationError> {
        let upload = upload
            .filter(|u| !u.filename.trim().is_empty())
            .ok_or(ValidationError::Missing(slot))?;

        if upload.data.is_empty() {
            return Err(ValidationError::Empty(slot));
        }

        if upload.size_bytes() > self.max_bytes {
            return Err(ValidationError::TooLarge {
                slot,
                size_bytes: upload.size_bytes(),
                limit_bytes: self.max_bytes,
            });
        }

        let format = upload
            .format()
            .ok_or_else(|| ValidationError::UnsupportedFormat {
                slot,
                extension: upload.extension().to_ascii_lowercase(),
            })?;

        Ok(ValidatedUpload {
            slot,
            document: Document::new(upload.filename.clone(), format, upload.size_bytes()),
            data: &upload.data,
        })
    }

    /// Validates the first upload completely before looking at the second.
    pub fn validate_pair<'a>(
        &self,
        first: Option<&'a UploadedDocument>,
        second: Option<&'a UploadedDocument>,
    ) -> Result<(ValidatedUpload<'a>, ValidatedUpload<'a>), ValidationError> {
        let first = self.validate(DocumentSlot::First, first)?;
        let second = self.validate(DocumentSlot::Second, second)?;
        Ok((first, second))
    }
}

fn megabytes(bytes: &u64) -> f64 {
    *bytes as f64 / BYTES_PER_MB
}
