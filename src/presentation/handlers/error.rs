use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::ports::FileLoaderError;
use crate::application::services::{AnalysisError, ComparisonError, ValidationError};

#[derive(Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

/// A failed request: HTTP status plus the message shown to the user.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<ComparisonError> for ApiError {
    fn from(error: ComparisonError) -> Self {
        let status = match &error {
            ComparisonError::Validation(ValidationError::TooLarge { .. }) => {
                StatusCode::PAYLOAD_TOO_LARGE
            }
            ComparisonError::Validation(_) => StatusCode::BAD_REQUEST,
            ComparisonError::Extraction {
                source: FileLoaderError::UnsupportedFormat(_),
                ..
            } => StatusCode::BAD_REQUEST,
            ComparisonError::Extraction { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ComparisonError::AiService(AnalysisError::Timeout(_)) => StatusCode::GATEWAY_TIMEOUT,
            ComparisonError::AiService(AnalysisError::InvalidResponse(_)) => {
                StatusCode::BAD_GATEWAY
            }
        };

        Self::new(status, error.to_string())
    }
}

impl From<MultipartError> for ApiError {
    fn from(error: MultipartError) -> Self {
        Self::new(error.status(), error.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, error = %self.message, "Request failed");
        } else {
            tracing::warn!(status = %self.status, error = %self.message, "Request rejected");
        }

        (
            self.status,
            Json(ErrorResponse {
                success: false,
                error: self.message,
            }),
        )
            .into_response()
    }
}
