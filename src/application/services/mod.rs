mod analysis_service;
mod comparison_service;
pub mod placeholder;
mod prompt_builder;
mod structure_analyzer;
mod structure_report;
mod text_extraction;
mod upload_policy;

pub use analysis_service::{AnalysisError, AnalysisService, ConnectionStatus, GenerationSettings};
pub use comparison_service::{ComparisonError, ComparisonService, MIN_PREVALIDATION_CHARS};
pub use prompt_builder::{
    CHANGE_TABLE_COLUMNS, COMPARISON_PROMPT_VERSION, DOCUMENT_PROMPT_VERSION, Prompt,
    PromptBuilder, PromptProfile, REPORT_SECTIONS, change_table_header,
};
pub use structure_analyzer::{analyze_structure, heading_title, split_sections};
pub use structure_report::{structure_section, warning_section};
pub use text_extraction::{extract_document, extract_text};
pub use upload_policy::{DEFAULT_MAX_UPLOAD_BYTES, UploadPolicy, ValidatedUpload, ValidationError};
