pub mod config;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use crate::config::Config;
use crate::error::Result;
use crate::middleware::single_flight::SingleFlight;
use crate::models::session::QuizSession;
use crate::services::generator_service::GeneratorService;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub session: Arc<RwLock<QuizSession>>,
    pub generator_service: GeneratorService,
    pub generation_gate: SingleFlight,
}

impl AppState {
    pub fn new() -> Result<Self> {
        let config = crate::config::get_config()?;
        Self::with_config(config.clone())
    }

    pub fn with_config(config: Config) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.generator_timeout_secs))
            .build()?;

        let generator_service =
            GeneratorService::new(config.generate_questions_url()?, http_client);

        Ok(Self {
            config: Arc::new(config),
            session: Arc::new(RwLock::new(QuizSession::new())),
            generator_service,
            generation_gate: SingleFlight::new(),
        })
    }
}
