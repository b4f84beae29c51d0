use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::ports::{Completion, CompletionRequest, LlmClient, LlmClientError};
use crate::domain::TokenUsage;
use crate::presentation::config::AzureCredentials;

const TOP_P: f32 = 0.9;
const FREQUENCY_PENALTY: f32 = 0.1;
const PRESENCE_PENALTY: f32 = 0.1;

/// Chat completions against an Azure OpenAI deployment.
pub struct AzureOpenAiClient {
    client: Client,
    credentials: AzureCredentials,
    timeout: Duration,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
    frequency_penalty: f32,
    presence_penalty: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<UsageBody>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct UsageBody {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

impl AzureOpenAiClient {
    pub fn new(credentials: AzureCredentials, timeout: Duration) -> Result<Self, LlmClientError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmClientError::ApiRequestFailed(e.to_string()))?;

        Ok(Self {
            client,
            credentials,
            timeout,
        })
    }

    pub fn deployment(&self) -> &str {
        &self.credentials.deployment
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.credentials.endpoint.trim_end_matches('/'),
            self.credentials.deployment,
            self.credentials.api_version
        )
    }

    fn transport_error(&self, error: reqwest::Error) -> LlmClientError {
        if error.is_timeout() {
            LlmClientError::Timeout(self.timeout)
        } else {
            LlmClientError::ApiRequestFailed(error.to_string())
        }
    }
}

#[async_trait]
impl LlmClient for AzureOpenAiClient {
    #[tracing::instrument(skip(self, request), fields(deployment = %self.credentials.deployment))]
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, LlmClientError> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &request.system {
            messages.push(ChatMessage {
                role: "system",
                content: system,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: &request.user,
        });

        let request_body = ChatCompletionRequest {
            messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            top_p: TOP_P,
            frequency_penalty: FREQUENCY_PENALTY,
            presence_penalty: PRESENCE_PENALTY,
        };

        tracing::debug!(
            prompt_chars = request.user.chars().count(),
            max_tokens = request.max_tokens,
            "Calling Azure OpenAI"
        );

        let response = self
            .client
            .post(self.completions_url())
            .header("api-key", &self.credentials.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmClientError::RateLimited);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmClientError::ApiRequestFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let body = response.text().await.map_err(|e| self.transport_error(e))?;
        let completion_response: ChatCompletionResponse = serde_json::from_str(&body)
            .map_err(|e| LlmClientError::InvalidResponse(e.to_string()))?;

        let content = completion_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| LlmClientError::InvalidResponse("empty completion".to_string()))?;

        let usage = completion_response.usage.map(|u| TokenUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });

        Ok(Completion {
            content,
            model: completion_response
                .model
                .unwrap_or_else(|| self.credentials.deployment.clone()),
            usage,
        })
    }
}
