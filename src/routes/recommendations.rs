//! Recommendation route: factor estimates inferred from evaluations.

use axum::{extract::State, Json};
use axum_extra::extract::WithRejection;
use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::errors::{ApiResponse, AppError};
use crate::models::evaluation::Evaluation;
use crate::models::risk::RiskContext;
use crate::services::recommendation::RiskRecommendations;
use crate::AppState;

/// Risk metadata plus the evaluations to learn from.
#[derive(Debug, Deserialize, Validate)]
pub struct RecommendationRequest {
    #[validate(custom(function = "validate_context"))]
    pub context: RiskContext,
    #[serde(default)]
    pub evaluations: Vec<Evaluation>,
}

fn validate_context(context: &RiskContext) -> Result<(), ValidationError> {
    if context.target.trim().is_empty() {
        return Err(ValidationError::new("target_required"));
    }
    Ok(())
}

/// POST /api/v1/risks/recommendations: probability, vulnerability and impact
/// recommendations with overall assessment and questionnaire gaps.
pub async fn recommend(
    State(state): State<AppState>,
    WithRejection(Json(body), _): WithRejection<Json<RecommendationRequest>, AppError>,
) -> Result<Json<ApiResponse<RiskRecommendations>>, AppError> {
    body.validate()?;
    let result = state.engine.recommend(&body.context, &body.evaluations).await;
    Ok(ApiResponse::success(result))
}
