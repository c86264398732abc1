pub mod config;
pub mod errors;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use services::analysis_provider::RecommendationEngine;

/// Shared application state passed to all Axum handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: config::AppConfig,
    pub engine: Arc<RecommendationEngine>,
}

impl AppState {
    /// Build the state, selecting the analysis engine from configuration.
    pub fn new(config: config::AppConfig) -> Self {
        let engine = RecommendationEngine::from_config(&config);
        Self {
            config,
            engine: Arc::new(engine),
        }
    }
}
