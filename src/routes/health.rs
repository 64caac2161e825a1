use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

pub async fn home() -> &'static str {
    "Quiz Question Creator is running"
}

#[axum::debug_handler]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let body = json!({
        "status": "ok",
        "generator": state.generator_service.endpoint().as_str(),
        "generation_in_progress": state.generation_gate.is_busy(),
    });
    (StatusCode::OK, Json(body))
}
