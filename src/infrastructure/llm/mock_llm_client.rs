use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::application::ports::{Completion, CompletionRequest, LlmClient, LlmClientError};
use crate::domain::TokenUsage;

/// Canned LLM backend that remembers what it was asked.
#[derive(Debug)]
pub struct MockLlmClient {
    response: Result<String, LlmClientError>,
    calls: AtomicUsize,
    last_request: Mutex<Option<CompletionRequest>>,
}

impl MockLlmClient {
    pub const MODEL: &'static str = "mock-model";

    pub fn replying(content: impl Into<String>) -> Self {
        Self::with_response(Ok(content.into()))
    }

    pub fn failing(error: LlmClientError) -> Self {
        Self::with_response(Err(error))
    }

    fn with_response(response: Result<String, LlmClientError>) -> Self {
        Self {
            response,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.last_request
            .lock()
            .ok()
            .and_then(|request| request.clone())
    }
}

impl Default for MockLlmClient {
    fn default() -> Self {
        Self::replying("Mock answer")
    }
}

#[async_trait::async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, LlmClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_request.lock() {
            *last = Some(request.clone());
        }

        let content = self.response.clone()?;
        Ok(Completion {
            content,
            model: Self::MODEL.to_string(),
            usage: Some(TokenUsage {
                prompt_tokens: 10,
                completion_tokens: 5,
                total_tokens: 15,
            }),
        })
    }
}
