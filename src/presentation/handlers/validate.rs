use axum::Json;
use axum::extract::{Multipart, State};

use crate::application::ports::{FileLoader, LlmClient};
use crate::domain::DocumentSlot;
use crate::presentation::state::AppState;

use super::error::ApiError;
use super::form::UploadForm;
use super::responses::ValidateResponse;

#[tracing::instrument(skip(state, multipart))]
pub async fn validate_documents_handler<F, L>(
    State(state): State<AppState<F, L>>,
    multipart: Multipart,
) -> Result<Json<ValidateResponse>, ApiError>
where
    F: FileLoader + 'static,
    L: LlmClient + 'static,
{
    let mut form = UploadForm::read(multipart).await?;

    let report = state
        .comparison_service
        .prevalidate(form.take(DocumentSlot::First), form.take(DocumentSlot::Second))
        .await?;

    Ok(Json(report.into()))
}
