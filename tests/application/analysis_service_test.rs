use std::sync::Arc;
use std::time::Duration;

use docdelta::application::ports::LlmClientError;
use docdelta::application::services::{
    AnalysisError, AnalysisService, ConnectionStatus, GenerationSettings, PromptBuilder,
    analyze_structure,
};
use docdelta::domain::{
    AnalysisOutcome, ComparisonRequest, ExtractedText, NamedText, PlaceholderReason, TokenUsage,
};
use docdelta::infrastructure::llm::MockLlmClient;

fn request() -> ComparisonRequest {
    ComparisonRequest::new(
        NamedText::new("v1.txt", ExtractedText::new("Budget: €21.0M").unwrap()),
        NamedText::new("v2.txt", ExtractedText::new("Budget: €24.4M").unwrap()),
    )
}

async fn compare_with(
    service: &AnalysisService<MockLlmClient>,
) -> Result<AnalysisOutcome, AnalysisError> {
    let request = request();
    let structure = analyze_structure(
        request.original().text.as_str(),
        request.revised().text.as_str(),
    );
    let prompt = PromptBuilder::default().comparison(&request, &structure);
    service.compare(&request, prompt).await
}

#[tokio::test]
async fn given_no_client_when_comparing_then_returns_not_configured_placeholder() {
    let service = AnalysisService::<MockLlmClient>::new(None, GenerationSettings::default());

    let outcome = compare_with(&service).await.unwrap();

    assert!(matches!(
        outcome,
        AnalysisOutcome::Placeholder {
            reason: PlaceholderReason::NotConfigured,
            ..
        }
    ));
    assert!(outcome.markdown().contains("## Action Required"));
}

#[tokio::test]
async fn given_client_reply_when_comparing_then_returns_markdown_verbatim() {
    let client = Arc::new(MockLlmClient::replying("  ## Executive Summary\n| a | b |  "));
    let service = AnalysisService::new(Some(Arc::clone(&client)), GenerationSettings::default());

    let outcome = compare_with(&service).await.unwrap();

    assert_eq!(
        outcome,
        AnalysisOutcome::Generated {
            markdown: "  ## Executive Summary\n| a | b |  ".to_string(),
            model: MockLlmClient::MODEL.to_string(),
            usage: Some(TokenUsage {
                prompt_tokens: 10,
                completion_tokens: 5,
                total_tokens: 15,
            }),
        }
    );
    assert_eq!(client.calls(), 1);
}

#[tokio::test]
async fn given_generation_settings_when_comparing_then_request_uses_them() {
    let client = Arc::new(MockLlmClient::default());
    let service = AnalysisService::new(
        Some(Arc::clone(&client)),
        GenerationSettings {
            max_tokens: 1234,
            temperature: 0.2,
        },
    );

    compare_with(&service).await.unwrap();

    let sent = client.last_request().unwrap();
    assert_eq!(sent.max_tokens, 1234);
    assert_eq!(sent.temperature, 0.2);
    assert!(sent.system.is_some());
    assert!(sent.user.contains("Budget: €24.4M"));
}

#[tokio::test]
async fn given_failed_call_when_comparing_then_falls_back_to_placeholder() {
    let client = Arc::new(MockLlmClient::failing(LlmClientError::ApiRequestFailed(
        "HTTP 500".to_string(),
    )));
    let service = AnalysisService::new(Some(client), GenerationSettings::default());

    let outcome = compare_with(&service).await.unwrap();

    match outcome {
        AnalysisOutcome::Placeholder {
            reason: PlaceholderReason::BackendUnavailable(cause),
            ..
        } => assert!(cause.contains("HTTP 500")),
        other => panic!("expected placeholder, got {other:?}"),
    }
}

#[tokio::test]
async fn given_rate_limit_when_comparing_then_falls_back_to_placeholder() {
    let client = Arc::new(MockLlmClient::failing(LlmClientError::RateLimited));
    let service = AnalysisService::new(Some(client), GenerationSettings::default());

    let outcome = compare_with(&service).await.unwrap();

    assert!(outcome.is_placeholder());
}

#[tokio::test]
async fn given_timeout_when_comparing_then_returns_timeout_error() {
    let client = Arc::new(MockLlmClient::failing(LlmClientError::Timeout(
        Duration::from_secs(300),
    )));
    let service = AnalysisService::new(Some(client), GenerationSettings::default());

    let result = compare_with(&service).await;

    assert_eq!(result.unwrap_err(), AnalysisError::Timeout(Duration::from_secs(300)));
}

#[tokio::test]
async fn given_invalid_response_when_comparing_then_returns_hard_error() {
    let client = Arc::new(MockLlmClient::failing(LlmClientError::InvalidResponse(
        "no choices".to_string(),
    )));
    let service = AnalysisService::new(Some(client), GenerationSettings::default());

    let result = compare_with(&service).await;

    assert!(matches!(result, Err(AnalysisError::InvalidResponse(_))));
}

#[tokio::test]
async fn given_no_client_when_testing_connection_then_reports_not_configured() {
    let service = AnalysisService::<MockLlmClient>::new(None, GenerationSettings::default());

    assert_eq!(service.test_connection().await, ConnectionStatus::NotConfigured);
}

#[tokio::test]
async fn given_replying_client_when_testing_connection_then_uses_short_request() {
    let client = Arc::new(MockLlmClient::replying(" Connection successful \n"));
    let service = AnalysisService::new(Some(Arc::clone(&client)), GenerationSettings::default());

    let status = service.test_connection().await;

    assert_eq!(
        status,
        ConnectionStatus::Connected {
            reply: "Connection successful".to_string(),
            model: MockLlmClient::MODEL.to_string(),
        }
    );
    assert_eq!(client.last_request().unwrap().max_tokens, 50);
}
