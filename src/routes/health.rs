//! Health check endpoints for liveness and readiness probes.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::ApiResponse;
use crate::services::analysis_provider::AnalysisMode;
use crate::AppState;

/// Readiness probe detail.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub analysis_mode: AnalysisMode,
}

/// Liveness probe: always returns OK if the process is running.
pub async fn live() -> &'static str {
    "OK"
}

/// Readiness probe: reports which analysis engine serves recommendations.
///
/// The remote provider is not probed: an unreachable provider only means
/// recommendations fall back to the heuristic engine.
pub async fn ready(State(state): State<AppState>) -> Json<ApiResponse<HealthStatus>> {
    ApiResponse::success(HealthStatus {
        status: "ok".to_string(),
        analysis_mode: state.engine.mode(),
    })
}
