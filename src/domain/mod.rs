mod analysis;
mod comparison;
mod document;
mod extracted_text;
mod similarity;
mod structure;

pub use analysis::{AnalysisOutcome, AnalysisType, PlaceholderReason, TokenUsage};
pub use comparison::{
    ComparisonRequest, ComparisonResult, DocumentAnalysis, DocumentSummary, NamedText,
    PrevalidationReport,
};
pub use document::{Document, DocumentSlot, FileFormat, UploadedDocument};
pub use extracted_text::{DocumentStats, ExtractedText};
pub use similarity::{SimilarityClass, word_set_similarity};
pub use structure::{
    ComparisonStats, ContentChanges, CriticalIssue, IntegrityAssessment, IntegrityLevel,
    IssueKind, MajorChange, MajorChangeKind, ModifiedSection, Section, SectionMove, Severity,
    SizeCategory, SizeChange, StructureAnalysis, TextProfile,
};
