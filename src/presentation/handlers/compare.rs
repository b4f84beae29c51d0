use axum::Json;
use axum::extract::{Multipart, State};

use crate::application::ports::{FileLoader, LlmClient};
use crate::application::services::COMPARISON_PROMPT_VERSION;
use crate::domain::DocumentSlot;
use crate::presentation::state::AppState;

use super::error::ApiError;
use super::form::UploadForm;
use super::responses::CompareResponse;

#[tracing::instrument(skip(state, multipart))]
pub async fn compare_handler<F, L>(
    State(state): State<AppState<F, L>>,
    multipart: Multipart,
) -> Result<Json<CompareResponse>, ApiError>
where
    F: FileLoader + 'static,
    L: LlmClient + 'static,
{
    let mut form = UploadForm::read(multipart).await?;
    let analysis_type = form.analysis_type();

    let result = state
        .comparison_service
        .compare(
            form.take(DocumentSlot::First),
            form.take(DocumentSlot::Second),
            analysis_type,
        )
        .await?;

    Ok(Json(CompareResponse::new(result, COMPARISON_PROMPT_VERSION)))
}
