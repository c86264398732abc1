//! Risk score route: deterministic probability × vulnerability × impact.

use axum::Json;
use axum_extra::extract::WithRejection;
use serde::Deserialize;
use validator::Validate;

use crate::errors::{ApiResponse, AppError};
use crate::services::risk_score::{self, RiskScore};

/// Request body for the risk score computation.
#[derive(Debug, Deserialize, Validate)]
pub struct RiskScoreRequest {
    #[validate(range(min = 1, max = 3))]
    pub probability: u8,
    #[validate(range(min = 1, max = 4))]
    pub vulnerability: u8,
    #[validate(range(min = 1, max = 5))]
    pub impact: u8,
}

/// POST /api/v1/risk-score: compute score and priority band.
pub async fn compute(
    WithRejection(Json(body), _): WithRejection<Json<RiskScoreRequest>, AppError>,
) -> Result<Json<ApiResponse<RiskScore>>, AppError> {
    body.validate()?;
    let result = risk_score::compute(body.probability, body.vulnerability, body.impact)?;
    Ok(ApiResponse::success(result))
}
