use crate::{
    dto::quiz_dto::QuizStateResponse,
    error::{Error, Result},
    models::session::GenerationGuard,
    services::normalize_service::NormalizeService,
    AppState,
};
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use uuid::Uuid;

pub const MSG_NO_PDF: &str = "Please upload a PDF first.";

/// Forwards the uploaded PDF to the generator and stores the normalized reply.
#[axum::debug_handler]
pub async fn generate_questions(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response> {
    let mut upload = None;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("pdf") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload.pdf").to_string();
        let data = field.bytes().await?;
        if !data.is_empty() {
            upload = Some((file_name, data));
        }
    }

    let (file_name, data) = upload.ok_or_else(|| Error::BadRequest(MSG_NO_PDF.to_string()))?;

    let generation_id = Uuid::new_v4();
    tracing::info!(%generation_id, file_name = %file_name, size = data.len(), "Generating questions");
    let guard = GenerationGuard::begin(state.session.clone(), generation_id).await;

    // The session lock is not held across the upstream call.
    let reply = state
        .generator_service
        .generate(&file_name, data.to_vec())
        .await;

    let mut session = state.session.write().await;
    let status = match reply {
        Ok(body) => {
            session.apply(NormalizeService::normalize(&body), generation_id);
            StatusCode::OK
        }
        Err(err) => {
            session.record_transport_error(&err, generation_id);
            StatusCode::BAD_GATEWAY
        }
    };
    guard.finish();

    Ok((status, Json(QuizStateResponse::from(&*session))).into_response())
}

#[axum::debug_handler]
pub async fn get_quiz(State(state): State<AppState>) -> impl IntoResponse {
    let session = state.session.read().await;
    Json(QuizStateResponse::from(&*session))
}
