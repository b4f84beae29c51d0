use std::sync::Arc;

use docdelta::application::ports::FileLoaderError;
use docdelta::application::services::{
    AnalysisService, ComparisonError, ComparisonService, GenerationSettings, PromptBuilder,
    UploadPolicy, ValidationError,
};
use docdelta::domain::{AnalysisType, DocumentSlot, SimilarityClass, UploadedDocument};
use docdelta::infrastructure::llm::MockLlmClient;
use docdelta::infrastructure::text_processing::MockFileLoader;

const LONG_TEXT: &str = "The association publishes a revised framework for elderly care budgets";

fn service(
    loader: Arc<MockFileLoader>,
    llm: Option<Arc<MockLlmClient>>,
) -> ComparisonService<MockFileLoader, MockLlmClient> {
    ComparisonService::new(
        loader,
        Arc::new(AnalysisService::new(llm, GenerationSettings::default())),
        PromptBuilder::default(),
        UploadPolicy::new(1024),
    )
}

fn upload(filename: &str, text: &str) -> Option<UploadedDocument> {
    Some(UploadedDocument::new(filename, text.as_bytes().to_vec()))
}

#[tokio::test]
async fn given_two_valid_uploads_when_comparing_then_assembles_both_summaries() {
    let loader = Arc::new(MockFileLoader::new());
    let llm = Arc::new(MockLlmClient::replying("## Executive Summary"));
    let service = service(Arc::clone(&loader), Some(Arc::clone(&llm)));

    let result = service
        .compare(
            upload("v1.txt", "Budget: €21.0M"),
            upload("v2.txt", "Budget: €24.4M"),
            AnalysisType::ExternalAnalysis,
        )
        .await
        .unwrap();

    assert_eq!(result.original.filename, "v1.txt");
    assert_eq!(result.revised.filename, "v2.txt");
    assert_eq!(result.revised.stats.word_count, 2);
    assert_eq!(result.analysis_type, AnalysisType::ExternalAnalysis);
    assert_eq!(result.outcome.markdown(), "## Executive Summary");
    assert_eq!(loader.calls(), 2);
    assert_eq!(llm.calls(), 1);
}

#[tokio::test]
async fn given_oversized_second_upload_when_comparing_then_never_extracts_or_calls_backend() {
    let loader = Arc::new(MockFileLoader::new());
    let llm = Arc::new(MockLlmClient::default());
    let service = service(Arc::clone(&loader), Some(Arc::clone(&llm)));

    let result = service
        .compare(
            upload("v1.txt", "Budget"),
            upload("v2.txt", &"a".repeat(2048)),
            AnalysisType::default(),
        )
        .await;

    assert!(matches!(
        result,
        Err(ComparisonError::Validation(ValidationError::TooLarge {
            slot: DocumentSlot::Second,
            ..
        }))
    ));
    assert_eq!(loader.calls(), 0);
    assert_eq!(llm.calls(), 0);
}

#[tokio::test]
async fn given_extraction_failure_when_comparing_then_names_slot_and_skips_backend() {
    let loader = Arc::new(MockFileLoader::failing(FileLoaderError::ExtractionFailed(
        "corrupt".to_string(),
    )));
    let llm = Arc::new(MockLlmClient::default());
    let service = service(loader, Some(Arc::clone(&llm)));

    let error = service
        .compare(
            upload("v1.pdf", "x"),
            upload("v2.pdf", "y"),
            AnalysisType::default(),
        )
        .await
        .unwrap_err();

    assert!(matches!(error, ComparisonError::Extraction { .. }));
    assert!(error.to_string().contains("could not be read"));
    assert_eq!(llm.calls(), 0);
}

#[tokio::test]
async fn given_similar_long_documents_when_prevalidating_then_classifies_without_backend() {
    let llm = Arc::new(MockLlmClient::default());
    let service = service(Arc::new(MockFileLoader::new()), Some(Arc::clone(&llm)));
    let revised = LONG_TEXT.replace("revised", "new");

    let report = service
        .prevalidate(upload("v1.txt", LONG_TEXT), upload("v2.txt", &revised))
        .await
        .unwrap();

    assert_eq!(report.class, SimilarityClass::Normal);
    assert!(report.similarity > 0.8 && report.similarity < 0.95);
    assert_eq!(llm.calls(), 0);
}

#[tokio::test]
async fn given_short_second_document_when_prevalidating_then_returns_too_short() {
    let service = service(Arc::new(MockFileLoader::new()), None);

    let result = service
        .prevalidate(upload("v1.txt", LONG_TEXT), upload("v2.txt", "Only a few words"))
        .await;

    assert!(matches!(
        result,
        Err(ComparisonError::Validation(ValidationError::TooShort {
            slot: DocumentSlot::Second,
            min_chars: 50
        }))
    ));
}

#[tokio::test]
async fn given_single_upload_without_credentials_when_analyzing_then_returns_placeholder() {
    let service = service(Arc::new(MockFileLoader::new()), None);

    let analysis = service
        .analyze_document(upload("note.txt", LONG_TEXT), AnalysisType::ExternalAnalysis)
        .await
        .unwrap();

    assert_eq!(analysis.document.filename, "note.txt");
    assert!(analysis.outcome.is_placeholder());
    assert!(analysis.outcome.markdown().contains("Overall sentiment"));
}

#[tokio::test]
async fn given_single_upload_when_analyzing_then_uses_document_generation_limits() {
    let llm = Arc::new(MockLlmClient::default());
    let service = service(Arc::new(MockFileLoader::new()), Some(Arc::clone(&llm)));

    service
        .analyze_document(upload("note.txt", LONG_TEXT), AnalysisType::StrategyAnalysis)
        .await
        .unwrap();

    let sent = llm.last_request().unwrap();
    assert_eq!(sent.max_tokens, 1500);
    assert!(sent.user.contains("communication strategy"));
}

const FULL_FRAMEWORK: &str = "1. Scope
This framework covers elderly care budgets for all regions.
2. Budget
The national budget rises to 24.4 million euro in 2026.
3. Staffing
Every location keeps at least two nurses on duty at night.";

const SCOPE_ONLY: &str = "1. Scope
This framework covers elderly care budgets for all regions.";

#[tokio::test]
async fn given_large_deletion_in_demo_mode_when_comparing_then_report_opens_with_warnings() {
    let service = service(Arc::new(MockFileLoader::new()), None);

    let result = service
        .compare(
            upload("v1.txt", FULL_FRAMEWORK),
            upload("v2.txt", SCOPE_ONLY),
            AnalysisType::default(),
        )
        .await
        .unwrap();

    assert!(result.outcome.is_placeholder());
    assert!(result.outcome.markdown().starts_with("## ⚠️ Critical Warnings"));
    assert!(result.outcome.markdown().contains("## Executive Summary"));
    assert!(!result.structure.red_flags.is_empty());
    assert_eq!(result.structure.comparison_stats().doc2_words, 11);
}

#[tokio::test]
async fn given_large_deletion_when_comparing_then_prompt_and_report_carry_structure() {
    let llm = Arc::new(MockLlmClient::replying("## Executive Summary"));
    let service = service(Arc::new(MockFileLoader::new()), Some(Arc::clone(&llm)));

    let result = service
        .compare(
            upload("v1.txt", FULL_FRAMEWORK),
            upload("v2.txt", SCOPE_ONLY),
            AnalysisType::default(),
        )
        .await
        .unwrap();

    let sent = llm.last_request().unwrap();
    assert!(sent.user.contains("Structural pre-analysis"));
    assert!(sent.user.contains("Sections: 3 -> 1"));
    assert!(!result.outcome.is_placeholder());
    assert!(result.outcome.markdown().starts_with("## ⚠️ Critical Warnings"));
    assert!(result.outcome.markdown().ends_with("## Executive Summary"));
}
