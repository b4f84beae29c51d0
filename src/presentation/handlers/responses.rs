use serde::Serialize;

use crate::application::services::placeholder::PLACEHOLDER_PROMPT_VERSION;
use crate::application::services::structure_section;
use crate::domain::{
    AnalysisOutcome, AnalysisType, ComparisonResult, ComparisonStats, CriticalIssue,
    DocumentAnalysis, DocumentStats, PrevalidationReport, StructureAnalysis, TokenUsage,
};

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub word_count: usize,
    pub char_count: usize,
}

impl From<DocumentStats> for StatsResponse {
    fn from(stats: DocumentStats) -> Self {
        Self {
            word_count: stats.word_count,
            char_count: stats.char_count,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UsageResponse {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl From<TokenUsage> for UsageResponse {
    fn from(usage: TokenUsage) -> Self {
        Self {
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
            total_tokens: usage.total_tokens,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ComparisonStatsResponse {
    pub doc1_words: usize,
    pub doc2_words: usize,
    pub size_difference: i64,
    pub size_difference_percentage: f64,
}

impl From<ComparisonStats> for ComparisonStatsResponse {
    fn from(stats: ComparisonStats) -> Self {
        Self {
            doc1_words: stats.doc1_words,
            doc2_words: stats.doc2_words,
            size_difference: stats.size_difference,
            size_difference_percentage: (stats.size_difference_percentage * 10.0).round() / 10.0,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CriticalIssueResponse {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub severity: &'static str,
    pub message: String,
    pub action_required: &'static str,
}

impl From<&CriticalIssue> for CriticalIssueResponse {
    fn from(issue: &CriticalIssue) -> Self {
        Self {
            kind: issue.kind.as_str(),
            severity: issue.severity.as_str(),
            message: issue.message.clone(),
            action_required: issue.action_required,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SectionCountsResponse {
    pub original: usize,
    pub revised: usize,
    pub added: usize,
    pub removed: usize,
    pub modified: usize,
    pub unchanged: usize,
    pub moved: usize,
}

#[derive(Debug, Serialize)]
pub struct StructureAnalysisResponse {
    pub size_category: &'static str,
    pub sections: SectionCountsResponse,
    pub major_changes: Vec<&'static str>,
    pub integrity_score: u8,
    pub integrity_level: &'static str,
    pub integrity_warnings: Vec<String>,
    pub recommendation: &'static str,
    /// Markdown rendering of the whole pre-analysis.
    pub report: String,
}

impl From<&StructureAnalysis> for StructureAnalysisResponse {
    fn from(analysis: &StructureAnalysis) -> Self {
        let changes = &analysis.content_changes;
        Self {
            size_category: analysis.size_category.as_str(),
            sections: SectionCountsResponse {
                original: analysis.original_sections,
                revised: analysis.revised_sections,
                added: changes.added.len(),
                removed: changes.removed.len(),
                modified: changes.modified.len(),
                unchanged: changes.unchanged.len(),
                moved: analysis.moves.len(),
            },
            major_changes: analysis
                .major_changes
                .iter()
                .map(|change| change.kind.as_str())
                .collect(),
            integrity_score: analysis.integrity.score,
            integrity_level: analysis.integrity.level.as_str(),
            integrity_warnings: analysis.integrity.warnings.clone(),
            recommendation: analysis.integrity.level.recommendation(),
            report: structure_section(analysis),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AnalysisResultResponse {
    pub analysis_type: &'static str,
    pub result: String,
    pub demo_mode: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<UsageResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
    pub prompt_version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison_stats: Option<ComparisonStatsResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis_warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub critical_issues: Option<Vec<CriticalIssueResponse>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structure_analysis: Option<StructureAnalysisResponse>,
}

impl AnalysisResultResponse {
    /// `prompt_version` names the prompt that produced a generated report.
    pub fn new(
        outcome: AnalysisOutcome,
        analysis_type: AnalysisType,
        prompt_version: &'static str,
    ) -> Self {
        match outcome {
            AnalysisOutcome::Generated {
                markdown,
                model,
                usage,
            } => Self {
                analysis_type: analysis_type.as_str(),
                result: markdown,
                demo_mode: false,
                model: Some(model),
                usage: usage.map(UsageResponse::from),
                fallback_reason: None,
                prompt_version,
                comparison_stats: None,
                analysis_warnings: None,
                critical_issues: None,
                structure_analysis: None,
            },
            AnalysisOutcome::Placeholder { markdown, reason } => Self {
                analysis_type: analysis_type.as_str(),
                result: markdown,
                demo_mode: true,
                model: None,
                usage: None,
                fallback_reason: Some(reason.describe()),
                prompt_version: PLACEHOLDER_PROMPT_VERSION,
                comparison_stats: None,
                analysis_warnings: None,
                critical_issues: None,
                structure_analysis: None,
            },
        }
    }

    /// Attaches the structural pre-analysis of a two-document comparison.
    pub fn with_structure(mut self, analysis: &StructureAnalysis) -> Self {
        self.comparison_stats = Some(analysis.comparison_stats().into());
        self.analysis_warnings = Some(analysis.red_flags.clone());
        self.critical_issues = Some(analysis.critical_issues.iter().map(Into::into).collect());
        self.structure_analysis = Some(analysis.into());
        self
    }
}

#[derive(Debug, Serialize)]
pub struct CompareResponse {
    pub success: bool,
    pub filename1: String,
    pub filename2: String,
    pub stats1: StatsResponse,
    pub stats2: StatsResponse,
    pub text_preview1: String,
    pub text_preview2: String,
    pub analysis_type: &'static str,
    pub analysis_result: AnalysisResultResponse,
    pub timestamp: String,
}

impl CompareResponse {
    pub fn new(result: ComparisonResult, prompt_version: &'static str) -> Self {
        let ComparisonResult {
            original,
            revised,
            analysis_type,
            outcome,
            structure,
        } = result;

        Self {
            success: true,
            filename1: original.filename,
            filename2: revised.filename,
            stats1: original.stats.into(),
            stats2: revised.stats.into(),
            text_preview1: original.preview,
            text_preview2: revised.preview,
            analysis_type: analysis_type.as_str(),
            analysis_result: AnalysisResultResponse::new(outcome, analysis_type, prompt_version)
                .with_structure(&structure),
            timestamp: timestamp(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub filename: String,
    pub stats: StatsResponse,
    pub text_preview: String,
    pub analysis_type: &'static str,
    pub analysis_result: AnalysisResultResponse,
    pub timestamp: String,
}

impl UploadResponse {
    pub fn new(analysis: DocumentAnalysis, prompt_version: &'static str) -> Self {
        let DocumentAnalysis {
            document,
            analysis_type,
            outcome,
        } = analysis;

        Self {
            success: true,
            filename: document.filename,
            stats: document.stats.into(),
            text_preview: document.preview,
            analysis_type: analysis_type.as_str(),
            analysis_result: AnalysisResultResponse::new(outcome, analysis_type, prompt_version),
            timestamp: timestamp(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ValidateResponse {
    pub success: bool,
    pub filename1: String,
    pub filename2: String,
    pub stats1: StatsResponse,
    pub stats2: StatsResponse,
    pub similarity: f64,
    pub validation_result: &'static str,
    pub message: &'static str,
}

impl From<PrevalidationReport> for ValidateResponse {
    fn from(report: PrevalidationReport) -> Self {
        Self {
            success: true,
            filename1: report.original.filename,
            filename2: report.revised.filename,
            stats1: report.original.stats.into(),
            stats2: report.revised.stats.into(),
            similarity: (report.similarity * 1000.0).round() / 1000.0,
            validation_result: report.class.as_str(),
            message: report.class.describe(),
        }
    }
}

pub fn timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}
