use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, Query};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tower::ServiceExt;

use docdelta::application::ports::{CompletionRequest, LlmClient, LlmClientError};
use docdelta::application::services::{
    AnalysisError, AnalysisService, GenerationSettings, PromptBuilder, UploadPolicy,
    analyze_structure,
};
use docdelta::domain::{ComparisonRequest, ExtractedText, NamedText};
use docdelta::infrastructure::llm::AzureOpenAiClient;
use docdelta::infrastructure::text_processing::MockFileLoader;
use docdelta::presentation::config::AzureCredentials;
use docdelta::presentation::create_router;

use crate::helpers::{MultipartBody, create_test_state, json_body};

const TEST_KEY: &str = "test-key";
const DEPLOYMENT: &str = "gpt-4-test";

fn credentials(addr: SocketAddr) -> AzureCredentials {
    AzureCredentials {
        endpoint: format!("http://{addr}/"),
        api_key: TEST_KEY.to_string(),
        deployment: DEPLOYMENT.to_string(),
        api_version: "2024-02-01".to_string(),
    }
}

fn client(addr: SocketAddr, timeout: Duration) -> AzureOpenAiClient {
    AzureOpenAiClient::new(credentials(addr), timeout).unwrap()
}

fn request() -> CompletionRequest {
    CompletionRequest::new("Compare these", 100, 0.05).with_system("You are an analyst")
}

/// Serves `reply` for every chat completion call after checking the route, key and
/// api-version, and returns the bound address.
async fn spawn_stub(reply: fn(Value) -> axum::response::Response) -> SocketAddr {
    let app = Router::new().route(
        "/openai/deployments/{deployment}/chat/completions",
        post(
            move |Path(deployment): Path<String>,
                  Query(query): Query<HashMap<String, String>>,
                  headers: HeaderMap,
                  Json(body): Json<Value>| async move {
                if deployment != DEPLOYMENT
                    || headers.get("api-key").and_then(|v| v.to_str().ok()) != Some(TEST_KEY)
                    || query.get("api-version").map(String::as_str) != Some("2024-02-01")
                {
                    return StatusCode::UNAUTHORIZED.into_response();
                }
                reply(body)
            },
        ),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Accepts connections and never answers.
async fn spawn_silent_listener() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    addr
}

fn echo_completion(body: Value) -> axum::response::Response {
    let system = body["messages"][0]["content"].as_str().unwrap_or_default();
    let user = body["messages"][1]["content"].as_str().unwrap_or_default();
    Json(json!({
        "model": "gpt-4",
        "choices": [{
            "message": {
                "role": "assistant",
                "content": format!(
                    "{system}|{user}|{}|{}|{}",
                    body["max_tokens"], body["top_p"], body["presence_penalty"]
                )
            }
        }],
        "usage": {"prompt_tokens": 12, "completion_tokens": 8, "total_tokens": 20}
    }))
    .into_response()
}

#[tokio::test]
async fn given_successful_completion_when_calling_then_returns_content_model_and_usage() {
    let addr = spawn_stub(echo_completion).await;

    let completion = client(addr, Duration::from_secs(5))
        .complete(&request())
        .await
        .unwrap();

    assert_eq!(completion.content, "You are an analyst|Compare these|100|0.9|0.1");
    assert_eq!(completion.model, "gpt-4");
    assert_eq!(completion.usage.unwrap().total_tokens, 20);
}

#[tokio::test]
async fn given_rate_limit_status_when_calling_then_returns_rate_limited() {
    let addr = spawn_stub(|_| StatusCode::TOO_MANY_REQUESTS.into_response()).await;

    let result = client(addr, Duration::from_secs(5))
        .complete(&request())
        .await;

    assert_eq!(result.unwrap_err(), LlmClientError::RateLimited);
}

#[tokio::test]
async fn given_server_error_when_calling_then_returns_api_request_failed() {
    let addr = spawn_stub(|_| (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response()).await;

    let result = client(addr, Duration::from_secs(5))
        .complete(&request())
        .await;

    match result {
        Err(LlmClientError::ApiRequestFailed(message)) => {
            assert!(message.contains("500"));
            assert!(message.contains("boom"));
        }
        other => panic!("expected ApiRequestFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn given_malformed_json_when_calling_then_returns_invalid_response() {
    let addr = spawn_stub(|_| "not json".into_response()).await;

    let result = client(addr, Duration::from_secs(5))
        .complete(&request())
        .await;

    assert!(matches!(result, Err(LlmClientError::InvalidResponse(_))));
}

#[tokio::test]
async fn given_empty_choices_when_calling_then_returns_invalid_response() {
    let addr = spawn_stub(|_| Json(json!({"choices": []})).into_response()).await;

    let result = client(addr, Duration::from_secs(5))
        .complete(&request())
        .await;

    assert!(matches!(result, Err(LlmClientError::InvalidResponse(_))));
}

#[tokio::test]
async fn given_blank_content_when_calling_then_returns_invalid_response() {
    let addr = spawn_stub(|_| {
        Json(json!({"choices": [{"message": {"role": "assistant", "content": "  "}}]}))
            .into_response()
    })
    .await;

    let result = client(addr, Duration::from_secs(5))
        .complete(&request())
        .await;

    assert!(matches!(result, Err(LlmClientError::InvalidResponse(_))));
}

#[tokio::test]
async fn given_unreachable_endpoint_when_calling_then_returns_api_request_failed() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let result = client(addr, Duration::from_secs(5))
        .complete(&request())
        .await;

    assert!(matches!(result, Err(LlmClientError::ApiRequestFailed(_))));
}

#[tokio::test]
async fn given_silent_backend_when_calling_then_times_out() {
    let addr = spawn_silent_listener().await;
    let timeout = Duration::from_millis(200);

    let result = client(addr, timeout).complete(&request()).await;

    assert_eq!(result.unwrap_err(), LlmClientError::Timeout(timeout));
}

#[tokio::test]
async fn given_silent_backend_when_comparing_then_surfaces_timeout_instead_of_placeholder() {
    let addr = spawn_silent_listener().await;
    let timeout = Duration::from_millis(200);
    let service = AnalysisService::new(
        Some(Arc::new(client(addr, timeout))),
        GenerationSettings::default(),
    );
    let comparison = ComparisonRequest::new(
        NamedText::new("v1.txt", ExtractedText::new("Budget: 21.0M").unwrap()),
        NamedText::new("v2.txt", ExtractedText::new("Budget: 24.4M").unwrap()),
    );
    let structure = analyze_structure("Budget: 21.0M", "Budget: 24.4M");
    let prompt = PromptBuilder::default().comparison(&comparison, &structure);

    let result = service.compare(&comparison, prompt).await;

    assert_eq!(result.unwrap_err(), AnalysisError::Timeout(timeout));
}

#[tokio::test]
async fn given_silent_backend_when_posting_compare_then_returns_gateway_timeout() {
    let addr = spawn_silent_listener().await;
    let state = create_test_state(
        Arc::new(MockFileLoader::new()),
        Some(Arc::new(client(addr, Duration::from_millis(200)))),
        UploadPolicy::default(),
    );
    let request = MultipartBody::new()
        .file("file1", "v1.txt", b"Budget: 21.0M")
        .file("file2", "v2.txt", b"Budget: 24.4M")
        .into_request("/compare");

    let response = create_router(state).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
    let body = json_body(response).await;
    assert!(body.get("analysis_result").is_none());
}
