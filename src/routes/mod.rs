//! Route definitions for the GAMR risk analytics API.

pub mod health;
pub mod recommendations;
pub mod risk_score;
pub mod security_index;

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    let cors = match state.config.frontend_url.parse::<HeaderValue>() {
        Ok(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        Err(e) => {
            tracing::warn!(
                error = %e,
                url = %state.config.frontend_url,
                "Invalid FRONTEND_URL, cross-origin requests disabled"
            );
            CorsLayer::new()
        }
    };

    let api_routes = Router::new()
        .route("/risk-score", post(risk_score::compute))
        .route("/risks/recommendations", post(recommendations::recommend))
        .route("/security-index", post(security_index::compute));

    Router::new()
        .route("/health/live", get(health::live))
        .route("/health/ready", get(health::ready))
        .nest("/api/v1", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(CompressionLayer::new())
                .layer(DefaultBodyLimit::max(state.config.max_body_bytes)),
        )
        .with_state(state)
}
