use std::sync::Arc;

use crate::application::ports::{FileLoader, FileLoaderError, LlmClient};
use crate::domain::{
    AnalysisType, ComparisonRequest, ComparisonResult, DocumentAnalysis, DocumentSlot, NamedText,
    PrevalidationReport, SimilarityClass, UploadedDocument, word_set_similarity,
};

use super::analysis_service::{AnalysisError, AnalysisService};
use super::placeholder;
use super::prompt_builder::PromptBuilder;
use super::structure_analyzer::analyze_structure;
use super::structure_report::warning_section;
use super::text_extraction::extract_text;
use super::upload_policy::{UploadPolicy, ValidatedUpload, ValidationError};

/// Shortest text, in characters, accepted by the pre-validation check.
pub const MIN_PREVALIDATION_CHARS: usize = 50;

#[derive(Debug, thiserror::Error)]
pub enum ComparisonError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{} could not be read: {source}", .slot.label())]
    Extraction {
        slot: DocumentSlot,
        #[source]
        source: FileLoaderError,
    },
    #[error(transparent)]
    AiService(#[from] AnalysisError),
}

/// Runs a request through validate, extract, prompt, compare and assemble.
pub struct ComparisonService<F, L>
where
    F: FileLoader,
    L: LlmClient,
{
    file_loader: Arc<F>,
    analysis: Arc<AnalysisService<L>>,
    prompts: PromptBuilder,
    policy: UploadPolicy,
}

impl<F, L> ComparisonService<F, L>
where
    F: FileLoader,
    L: LlmClient,
{
    pub fn new(
        file_loader: Arc<F>,
        analysis: Arc<AnalysisService<L>>,
        prompts: PromptBuilder,
        policy: UploadPolicy,
    ) -> Self {
        Self {
            file_loader,
            analysis,
            prompts,
            policy,
        }
    }

    pub fn policy(&self) -> UploadPolicy {
        self.policy
    }

    #[tracing::instrument(skip(self, first, second))]
    pub async fn compare(
        &self,
        first: Option<UploadedDocument>,
        second: Option<UploadedDocument>,
        analysis_type: AnalysisType,
    ) -> Result<ComparisonResult, ComparisonError> {
        let request = self.extract_pair(first.as_ref(), second.as_ref()).await?;

        tracing::info!(
            original = %request.original().filename,
            revised = %request.revised().filename,
            original_chars = request.original().text.stats().char_count,
            revised_chars = request.revised().text.stats().char_count,
            "Comparing documents"
        );

        let structure = analyze_structure(
            request.original().text.as_str(),
            request.revised().text.as_str(),
        );
        for flag in &structure.red_flags {
            tracing::warn!(flag = %flag, "Structural red flag");
        }

        let prompt = self.prompts.comparison(&request, &structure);
        let mut outcome = self.analysis.compare(&request, prompt).await?;

        if let Some(warnings) = warning_section(&structure) {
            outcome = outcome.with_preamble(&warnings);
        }

        tracing::info!(
            demo_mode = outcome.is_placeholder(),
            integrity_score = structure.integrity.score,
            critical_issues = structure.critical_issues.len(),
            "Comparison completed"
        );

        Ok(ComparisonResult {
            original: request.original().summary(),
            revised: request.revised().summary(),
            analysis_type,
            outcome,
            structure,
        })
    }

    /// Checks that both documents are readable and long enough, without calling the AI backend.
    #[tracing::instrument(skip(self, first, second))]
    pub async fn prevalidate(
        &self,
        first: Option<UploadedDocument>,
        second: Option<UploadedDocument>,
    ) -> Result<PrevalidationReport, ComparisonError> {
        let request = self.extract_pair(first.as_ref(), second.as_ref()).await?;

        for (slot, named) in [
            (DocumentSlot::First, request.original()),
            (DocumentSlot::Second, request.revised()),
        ] {
            if named.text.stats().char_count < MIN_PREVALIDATION_CHARS {
                return Err(ValidationError::TooShort {
                    slot,
                    min_chars: MIN_PREVALIDATION_CHARS,
                }
                .into());
            }
        }

        let similarity = word_set_similarity(
            request.original().text.as_str(),
            request.revised().text.as_str(),
        );
        let class = SimilarityClass::classify(similarity);

        tracing::info!(similarity, class = class.as_str(), "Documents pre-validated");

        Ok(PrevalidationReport {
            original: request.original().summary(),
            revised: request.revised().summary(),
            similarity,
            class,
        })
    }

    /// Single-document analysis; shares validation, extraction and the demo fallback.
    #[tracing::instrument(skip(self, upload))]
    pub async fn analyze_document(
        &self,
        upload: Option<UploadedDocument>,
        analysis_type: AnalysisType,
    ) -> Result<DocumentAnalysis, ComparisonError> {
        let validated = self.policy.validate(DocumentSlot::Single, upload.as_ref())?;
        let named = self.extract(validated).await?;

        let prompt = self
            .prompts
            .single_document(named.text.as_str(), &named.filename, analysis_type);
        let sections = self.prompts.document_sections(analysis_type);

        let outcome = self
            .analysis
            .analyze_document(prompt, || {
                placeholder::document_report(&named, analysis_type, &sections)
            })
            .await?;

        Ok(DocumentAnalysis {
            document: named.summary(),
            analysis_type,
            outcome,
        })
    }

    async fn extract_pair(
        &self,
        first: Option<&UploadedDocument>,
        second: Option<&UploadedDocument>,
    ) -> Result<ComparisonRequest, ComparisonError> {
        let (first, second) = self.policy.validate_pair(first, second)?;

        let (original, revised) = tokio::try_join!(self.extract(first), self.extract(second))?;

        Ok(ComparisonRequest::new(original, revised))
    }

    async fn extract(&self, upload: ValidatedUpload<'_>) -> Result<NamedText, ComparisonError> {
        let ValidatedUpload {
            slot,
            document,
            data,
        } = upload;

        let text = extract_text(self.file_loader.as_ref(), data, &document)
            .await
            .map_err(|source| {
                tracing::warn!(
                    %slot,
                    filename = %document.filename,
                    error = %source,
                    "Extraction failed"
                );
                ComparisonError::Extraction { slot, source }
            })?;

        Ok(NamedText::new(document.filename, text))
    }
}
