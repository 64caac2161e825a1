pub mod export;
pub mod health;
pub mod quiz;

use crate::middleware::single_flight::single_flight_middleware;
use crate::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub fn router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes();

    let generate_api = Router::new()
        .route("/api/generate-questions", post(quiz::generate_questions))
        .layer(axum::middleware::from_fn_with_state(
            state.generation_gate.clone(),
            single_flight_middleware,
        ));

    Router::new()
        .route("/", get(health::home))
        .route("/health", get(health::health))
        .route("/api/quiz", get(quiz::get_quiz))
        .route("/api/export", get(export::export_quiz))
        .merge(generate_api)
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(body_limit))
}
