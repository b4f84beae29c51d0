use axum::Json;
use axum::extract::{Multipart, State};

use crate::application::ports::{FileLoader, LlmClient};
use crate::application::services::DOCUMENT_PROMPT_VERSION;
use crate::domain::DocumentSlot;
use crate::presentation::state::AppState;

use super::error::ApiError;
use super::form::UploadForm;
use super::responses::UploadResponse;

#[tracing::instrument(skip(state, multipart))]
pub async fn upload_handler<F, L>(
    State(state): State<AppState<F, L>>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError>
where
    F: FileLoader + 'static,
    L: LlmClient + 'static,
{
    let mut form = UploadForm::read(multipart).await?;
    let analysis_type = form.analysis_type();

    let analysis = state
        .comparison_service
        .analyze_document(form.take(DocumentSlot::Single), analysis_type)
        .await?;

    Ok(Json(UploadResponse::new(analysis, DOCUMENT_PROMPT_VERSION)))
}
