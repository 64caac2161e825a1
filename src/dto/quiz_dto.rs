use crate::models::question::QuizResult;
use crate::models::session::{QuizSession, Status};
use crate::services::render_service::{RenderService, RenderedQuiz};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizStateResponse {
    pub status: Status,
    pub view: RenderedQuiz,
    pub quiz: QuizResult,
    pub raw: String,
    pub generation_id: Option<uuid::Uuid>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl From<&QuizSession> for QuizStateResponse {
    fn from(session: &QuizSession) -> Self {
        Self {
            status: session.status().clone(),
            view: RenderService::render(session),
            quiz: session.structured().clone(),
            raw: session.raw().to_string(),
            generation_id: session.generation_id(),
            updated_at: session.updated_at(),
        }
    }
}
