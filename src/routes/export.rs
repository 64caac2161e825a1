use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
};
use crate::{AppState, error::{Error, Result}, services::export_service::ExportService};

/// Download the current quiz as CSV, or the raw model output as text.
#[axum::debug_handler]
pub async fn export_quiz(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let exported = {
        let session = state.session.read().await;
        ExportService::export(&session)?
    };

    let Some(file) = exported else {
        tracing::warn!("Export requested before any questions were generated");
        return Err(Error::NothingToExport);
    };

    tracing::info!(filename = file.filename, bytes = file.body.len(), "Exporting quiz");
    let disposition = file.content_disposition();

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, file.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        file.body,
    ))
}
