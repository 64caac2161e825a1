use crate::error::Error;
use crate::models::question::QuizResult;
use crate::services::normalize_service::Normalized;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

pub const MSG_IDLE: &str = "Upload a PDF to generate questions.";
pub const MSG_GENERATING: &str = "Generating questions...";
pub const MSG_SUCCESS: &str = "Questions generated successfully!";
pub const MSG_NO_PARSED: &str = "No parsed questions found. Showing raw AI output.";
pub const MSG_TRANSPORT: &str = "Error generating questions. Check server logs.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    Idle,
    Generating,
    Success,
    NoParsedQuestions,
    BackendError,
    TransportError,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub kind: StatusKind,
    pub message: String,
}

impl Status {
    fn new(kind: StatusKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl Default for Status {
    fn default() -> Self {
        Status::new(StatusKind::Idle, MSG_IDLE)
    }
}

/// Controller state for one quiz generator front end.
///
/// `structured` and `raw` are never both meaningful: a populated result clears
/// `raw`, a fallback clears `structured`, and failures leave both untouched.
#[derive(Debug, Clone, Default)]
pub struct QuizSession {
    structured: QuizResult,
    raw: String,
    status: Status,
    updated_at: Option<DateTime<Utc>>,
    generation_id: Option<Uuid>,
    pending: Option<PendingGeneration>,
}

/// Generation in flight, with the status to restore if it never completes.
#[derive(Debug, Clone)]
struct PendingGeneration {
    id: Uuid,
    previous: Status,
}

impl QuizSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a session directly from stored state, bypassing the replacement rules.
    pub fn from_parts(structured: QuizResult, raw: impl Into<String>) -> Self {
        Self {
            structured,
            raw: raw.into(),
            ..Self::default()
        }
    }

    pub fn structured(&self) -> &QuizResult {
        &self.structured
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    pub fn generation_id(&self) -> Option<Uuid> {
        self.generation_id
    }

    pub fn begin_generation(&mut self, generation_id: Uuid) -> &Status {
        let previous = std::mem::replace(
            &mut self.status,
            Status::new(StatusKind::Generating, MSG_GENERATING),
        );
        self.pending = Some(PendingGeneration {
            id: generation_id,
            previous,
        });
        &self.status
    }

    /// Restores the status from before `generation_id` started, unless another
    /// generation has taken over since.
    pub fn abandon_generation(&mut self, generation_id: Uuid) {
        if self.pending.as_ref().map(|p| p.id) != Some(generation_id) {
            return;
        }
        if let Some(pending) = self.pending.take() {
            tracing::warn!(%generation_id, "Generation abandoned before completion");
            self.status = pending.previous;
        }
    }

    pub fn apply(&mut self, outcome: Normalized, generation_id: Uuid) -> &Status {
        self.pending = None;
        match outcome {
            Normalized::BackendError { message, details } => {
                tracing::error!(%generation_id, response = %details, "Backend error");
                self.status = Status::new(StatusKind::BackendError, format!("Error: {}", message));
            }
            Normalized::Fallback { raw } => {
                tracing::warn!(%generation_id, raw = %raw, "No parsed questions, keeping raw AI output");
                self.structured = QuizResult::default();
                self.raw = raw;
                self.mark_updated(generation_id);
                self.status = Status::new(StatusKind::NoParsedQuestions, MSG_NO_PARSED);
            }
            Normalized::Populated(result) => {
                tracing::info!(
                    %generation_id,
                    mcqs = result.mcqs.len(),
                    true_false = result.true_false.len(),
                    "Questions generated"
                );
                self.structured = result;
                self.raw.clear();
                self.mark_updated(generation_id);
                self.status = Status::new(StatusKind::Success, MSG_SUCCESS);
            }
        }
        &self.status
    }

    pub fn record_transport_error(&mut self, err: &Error, generation_id: Uuid) -> &Status {
        self.pending = None;
        tracing::error!(%generation_id, error = %err, "Question generation request failed");
        self.status = Status::new(StatusKind::TransportError, MSG_TRANSPORT);
        &self.status
    }

    fn mark_updated(&mut self, generation_id: Uuid) {
        self.updated_at = Some(Utc::now());
        self.generation_id = Some(generation_id);
    }
}

/// Marks a generation as started and restores the status on drop unless
/// [`GenerationGuard::finish`] was reached.
pub struct GenerationGuard {
    session: Arc<RwLock<QuizSession>>,
    generation_id: Uuid,
    finished: bool,
}

impl GenerationGuard {
    pub async fn begin(session: Arc<RwLock<QuizSession>>, generation_id: Uuid) -> Self {
        session.write().await.begin_generation(generation_id);
        Self {
            session,
            generation_id,
            finished: false,
        }
    }

    pub fn finish(mut self) {
        self.finished = true;
    }
}

impl Drop for GenerationGuard {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        let generation_id = self.generation_id;
        if let Ok(mut session) = self.session.try_write() {
            session.abandon_generation(generation_id);
            return;
        }
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let session = self.session.clone();
                handle.spawn(async move {
                    session.write().await.abandon_generation(generation_id);
                });
            }
            Err(_) => {
                tracing::error!(%generation_id, "No runtime to reset abandoned generation status");
            }
        }
    }
}
