use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::application::ports::{FileLoader, LlmClient};
use crate::application::services::ConnectionStatus;
use crate::presentation::state::AppState;

use super::error::ApiError;

#[derive(Serialize)]
pub struct ConnectionResponse {
    pub success: bool,
    pub message: String,
    pub response: String,
    pub model: String,
    pub deployment: String,
}

#[derive(Serialize)]
pub struct AzureConfigReport {
    pub endpoint: Option<String>,
    pub api_key_set: bool,
    pub api_key_length: usize,
    pub deployment: String,
    pub api_version: String,
    pub request_timeout_secs: u64,
    pub max_tokens: u32,
}

#[derive(Serialize)]
pub struct ConnectionReport {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl From<ConnectionStatus> for ConnectionReport {
    fn from(status: ConnectionStatus) -> Self {
        match status {
            ConnectionStatus::NotConfigured => Self {
                status: "not_configured",
                message: None,
                model: None,
            },
            ConnectionStatus::Connected { reply, model } => Self {
                status: "connected",
                message: Some(reply),
                model: Some(model),
            },
            ConnectionStatus::Failed { message } => Self {
                status: "failed",
                message: Some(message),
                model: None,
            },
        }
    }
}

#[derive(Serialize)]
pub struct DebugResponse {
    pub configured: bool,
    pub config: AzureConfigReport,
    pub connection: ConnectionReport,
    pub timestamp: String,
}

/// 200 when the backend answers, 400 when unconfigured, 502 when the call fails.
#[tracing::instrument(skip(state))]
pub async fn test_azure_handler<F, L>(
    State(state): State<AppState<F, L>>,
) -> Result<Json<ConnectionResponse>, ApiError>
where
    F: FileLoader + 'static,
    L: LlmClient + 'static,
{
    match state.analysis_service.test_connection().await {
        ConnectionStatus::Connected { reply, model } => Ok(Json(ConnectionResponse {
            success: true,
            message: "Azure OpenAI connection successful".to_string(),
            response: reply,
            model,
            deployment: state.settings.azure_openai.deployment.clone(),
        })),
        ConnectionStatus::NotConfigured => Err(ApiError::new(
            StatusCode::BAD_REQUEST,
            "Azure OpenAI is not configured: set AZURE_OPENAI_ENDPOINT and AZURE_OPENAI_KEY",
        )),
        ConnectionStatus::Failed { message } => Err(ApiError::new(
            StatusCode::BAD_GATEWAY,
            format!("Azure OpenAI connection failed: {message}"),
        )),
    }
}

/// Configuration diagnostics. Never includes the key itself.
#[tracing::instrument(skip(state))]
pub async fn debug_azure_handler<F, L>(State(state): State<AppState<F, L>>) -> impl IntoResponse
where
    F: FileLoader + 'static,
    L: LlmClient + 'static,
{
    let azure = &state.settings.azure_openai;
    let config = AzureConfigReport {
        endpoint: azure.endpoint.clone(),
        api_key_set: azure.api_key_length() > 0,
        api_key_length: azure.api_key_length(),
        deployment: azure.deployment.clone(),
        api_version: azure.api_version.clone(),
        request_timeout_secs: azure.request_timeout_secs,
        max_tokens: azure.max_tokens,
    };

    let connection = state.analysis_service.test_connection().await;

    Json(DebugResponse {
        configured: state.analysis_service.is_configured(),
        config,
        connection: connection.into(),
        timestamp: super::responses::timestamp(),
    })
}
