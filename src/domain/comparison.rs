use super::analysis::{AnalysisOutcome, AnalysisType};
use super::extracted_text::{DocumentStats, ExtractedText};
use super::similarity::SimilarityClass;
use super::structure::StructureAnalysis;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedText {
    pub filename: String,
    pub text: ExtractedText,
}

impl NamedText {
    pub fn new(filename: impl Into<String>, text: ExtractedText) -> Self {
        Self {
            filename: filename.into(),
            text,
        }
    }

    pub fn summary(&self) -> DocumentSummary {
        DocumentSummary {
            filename: self.filename.clone(),
            stats: self.text.stats(),
            preview: self.text.preview(),
        }
    }
}

/// Exactly two non-empty texts: the unit of work sent to the AI backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonRequest {
    original: NamedText,
    revised: NamedText,
}

impl ComparisonRequest {
    pub fn new(original: NamedText, revised: NamedText) -> Self {
        Self { original, revised }
    }

    pub fn original(&self) -> &NamedText {
        &self.original
    }

    pub fn revised(&self) -> &NamedText {
        &self.revised
    }

    /// Word-count change from the original to the revised version.
    pub fn word_delta(&self) -> i64 {
        self.revised.text.stats().word_count as i64 - self.original.text.stats().word_count as i64
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSummary {
    pub filename: String,
    pub stats: DocumentStats,
    pub preview: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonResult {
    pub original: DocumentSummary,
    pub revised: DocumentSummary,
    pub analysis_type: AnalysisType,
    pub outcome: AnalysisOutcome,
    pub structure: StructureAnalysis,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentAnalysis {
    pub document: DocumentSummary,
    pub analysis_type: AnalysisType,
    pub outcome: AnalysisOutcome,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrevalidationReport {
    pub original: DocumentSummary,
    pub revised: DocumentSummary,
    pub similarity: f64,
    pub class: SimilarityClass,
}
