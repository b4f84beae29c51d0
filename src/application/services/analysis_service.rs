use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{CompletionRequest, LlmClient, LlmClientError};
use crate::domain::{AnalysisOutcome, ComparisonRequest, PlaceholderReason};
use crate::infrastructure::observability::sanitize_prompt;

use super::placeholder;
use super::prompt_builder::Prompt;

const DOCUMENT_MAX_TOKENS: u32 = 1500;
const DOCUMENT_TEMPERATURE: f32 = 0.3;
const CONNECTION_TEST_MAX_TOKENS: u32 = 50;
const CONNECTION_TEST_PROMPT: &str = "Connection test: reply with 'Connection successful'.";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationSettings {
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            max_tokens: 4000,
            temperature: 0.05,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    #[error("AI service timed out after {}s", .0.as_secs())]
    Timeout(Duration),
    #[error("AI service returned an unusable response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionStatus {
    NotConfigured,
    Connected { reply: String, model: String },
    Failed { message: String },
}

/// Talks to the AI backend, substituting a placeholder report when it is
/// unconfigured or unreachable.
pub struct AnalysisService<L>
where
    L: LlmClient,
{
    client: Option<Arc<L>>,
    generation: GenerationSettings,
}

impl<L> AnalysisService<L>
where
    L: LlmClient,
{
    pub fn new(client: Option<Arc<L>>, generation: GenerationSettings) -> Self {
        Self { client, generation }
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    #[tracing::instrument(
        skip(self, request, prompt),
        fields(
            original = %request.original().filename,
            revised = %request.revised().filename,
        )
    )]
    pub async fn compare(
        &self,
        request: &ComparisonRequest,
        prompt: Prompt,
    ) -> Result<AnalysisOutcome, AnalysisError> {
        let completion =
            prompt.into_request(self.generation.max_tokens, self.generation.temperature);
        self.run(completion, || placeholder::comparison_report(request))
            .await
    }

    #[tracing::instrument(skip(self, prompt, placeholder))]
    pub async fn analyze_document(
        &self,
        prompt: Prompt,
        placeholder: impl FnOnce() -> String,
    ) -> Result<AnalysisOutcome, AnalysisError> {
        let completion = prompt.into_request(DOCUMENT_MAX_TOKENS, DOCUMENT_TEMPERATURE);
        self.run(completion, placeholder).await
    }

    pub async fn test_connection(&self) -> ConnectionStatus {
        let Some(client) = &self.client else {
            tracing::warn!("Connection test skipped: AI backend not configured");
            return ConnectionStatus::NotConfigured;
        };

        let request =
            CompletionRequest::new(CONNECTION_TEST_PROMPT, CONNECTION_TEST_MAX_TOKENS, 0.0);

        match client.complete(&request).await {
            Ok(completion) => {
                tracing::info!(model = %completion.model, "AI backend connection test succeeded");
                ConnectionStatus::Connected {
                    reply: completion.content.trim().to_string(),
                    model: completion.model,
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "AI backend connection test failed");
                ConnectionStatus::Failed {
                    message: e.to_string(),
                }
            }
        }
    }

    async fn run(
        &self,
        request: CompletionRequest,
        placeholder: impl FnOnce() -> String,
    ) -> Result<AnalysisOutcome, AnalysisError> {
        let Some(client) = &self.client else {
            tracing::info!("AI backend not configured, returning placeholder report");
            return Ok(AnalysisOutcome::Placeholder {
                markdown: placeholder(),
                reason: PlaceholderReason::NotConfigured,
            });
        };

        tracing::debug!(
            prompt = %sanitize_prompt(&request.user),
            prompt_chars = request.user.chars().count(),
            max_tokens = request.max_tokens,
            "Sending analysis request"
        );

        match client.complete(&request).await {
            Ok(completion) => {
                if let Some(usage) = completion.usage {
                    tracing::info!(
                        model = %completion.model,
                        prompt_tokens = usage.prompt_tokens,
                        completion_tokens = usage.completion_tokens,
                        total_tokens = usage.total_tokens,
                        "Analysis generated"
                    );
                }
                Ok(AnalysisOutcome::Generated {
                    markdown: completion.content,
                    model: completion.model,
                    usage: completion.usage,
                })
            }
            Err(LlmClientError::Timeout(after)) => {
                tracing::error!(timeout_secs = after.as_secs(), "AI backend timed out");
                Err(AnalysisError::Timeout(after))
            }
            Err(LlmClientError::InvalidResponse(message)) => {
                tracing::error!(error = %message, "AI backend returned an invalid response");
                Err(AnalysisError::InvalidResponse(message))
            }
            Err(e) => {
                tracing::warn!(error = %e, "AI backend unavailable, returning placeholder report");
                Ok(AnalysisOutcome::Placeholder {
                    markdown: placeholder(),
                    reason: PlaceholderReason::BackendUnavailable(e.to_string()),
                })
            }
        }
    }
}
