use std::fmt;

/// Document formats the extraction adapters understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileFormat {
    Pdf,
    Docx,
    Text,
}

impl FileFormat {
    pub const SUPPORTED_EXTENSIONS: [&'static str; 3] = ["pdf", "docx", "txt"];

    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            "txt" => Some(Self::Text),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::Text => "txt",
        }
    }

    /// The supported extensions for messages, e.g. `PDF, DOCX or TXT`.
    pub fn supported_list() -> String {
        let names: Vec<String> = Self::SUPPORTED_EXTENSIONS
            .iter()
            .map(|ext| ext.to_ascii_uppercase())
            .collect();

        match names.split_last() {
            Some((last, rest)) if !rest.is_empty() => format!("{} or {last}", rest.join(", ")),
            Some((last, _)) => last.clone(),
            None => String::new(),
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Form slot an upload arrived in: one of the two comparison inputs, or the
/// lone document of a single-document analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentSlot {
    First,
    Second,
    Single,
}

impl DocumentSlot {
    pub fn field_name(&self) -> &'static str {
        match self {
            Self::First => "file1",
            Self::Second => "file2",
            Self::Single => "file",
        }
    }

    /// Human-readable label used at the start of error messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::First => "First document (file1)",
            Self::Second => "Second document (file2)",
            Self::Single => "Document (file)",
        }
    }
}

impl fmt::Display for DocumentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

/// A file exactly as the client submitted it. Lives for one request only.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadedDocument {
    pub filename: String,
    pub data: Vec<u8>,
}

impl UploadedDocument {
    pub fn new(filename: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            data,
        }
    }

    /// Text after the last `.` of the filename, or `""` when there is none.
    pub fn extension(&self) -> &str {
        self.filename
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .unwrap_or("")
    }

    pub fn format(&self) -> Option<FileFormat> {
        FileFormat::from_extension(self.extension())
    }

    pub fn size_bytes(&self) -> u64 {
        self.data.len() as u64
    }
}

impl fmt::Debug for UploadedDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadedDocument")
            .field("filename", &self.filename)
            .field("size_bytes", &self.data.len())
            .finish()
    }
}

/// Metadata handed to extraction adapters alongside the raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub filename: String,
    pub format: FileFormat,
    pub size_bytes: u64,
}

impl Document {
    pub fn new(filename: String, format: FileFormat, size_bytes: u64) -> Self {
        Self {
            filename,
            format,
            size_bytes,
        }
    }
}
