//! Security Index route.

use axum::Json;
use axum_extra::extract::WithRejection;

use crate::errors::{ApiResponse, AppError};
use crate::models::security_index::{SecurityIndexComponents, SecurityIndexInput};
use crate::services::security_index;

/// POST /api/v1/security-index: tenant index from aggregate counts.
pub async fn compute(
    WithRejection(Json(body), _): WithRejection<Json<SecurityIndexInput>, AppError>,
) -> Result<Json<ApiResponse<SecurityIndexComponents>>, AppError> {
    Ok(ApiResponse::success(security_index::compute(&body)))
}
