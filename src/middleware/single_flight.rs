use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use crate::error::Error;

/// Admits one request at a time; others are turned away instead of queued.
#[derive(Clone, Debug)]
pub struct SingleFlight {
    gate: Arc<Semaphore>,
}

impl Default for SingleFlight {
    fn default() -> Self {
        Self {
            gate: Arc::new(Semaphore::new(1)),
        }
    }
}

impl SingleFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only: never takes the permit, so polling it cannot turn a request away.
    pub fn is_busy(&self) -> bool {
        self.gate.available_permits() == 0
    }

    pub fn try_enter(&self) -> Option<OwnedSemaphorePermit> {
        self.gate.clone().try_acquire_owned().ok()
    }
}

pub async fn single_flight_middleware(
    State(state): State<SingleFlight>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let Some(_permit) = state.try_enter() else {
        tracing::warn!(uri = %req.uri(), "Rejecting request, generation already in progress");
        return Error::Conflict("generation_in_progress".to_string()).into_response();
    };
    next.run(req).await
}
