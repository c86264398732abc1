//! Optional remote analysis with a heuristic fallback.
//!
//! A remote provider receives the same risk context and evaluations as the
//! heuristic pipeline and must return the same [`RiskRecommendations`]
//! shape. [`RecommendationEngine`] is the single call site: it bounds every
//! remote call with a deadline and falls back to the heuristic pipeline on
//! timeout, transport failure, or an invalid payload. Callers never see a
//! provider error.

use std::future::Future;
use std::time::Duration;

use serde::Serialize;

use crate::config::AppConfig;
use crate::errors::AppError;
use crate::models::evaluation::Evaluation;
use crate::models::risk::RiskContext;
use crate::services::recommendation::{self, AnalysisSource, RiskRecommendations};

/// Capability of producing recommendations outside this process.
pub trait AnalysisProvider: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    fn analyze(
        &self,
        context: &RiskContext,
        evaluations: &[Evaluation],
    ) -> impl Future<Output = Result<RiskRecommendations, AppError>> + Send;
}

/// Request body sent to the remote provider.
#[derive(Debug, Serialize)]
struct AnalysisRequest<'a> {
    context: &'a RiskContext,
    evaluations: &'a [Evaluation],
}

/// HTTP provider posting JSON to a configured endpoint.
#[derive(Debug, Clone)]
pub struct RemoteAnalyzer {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl RemoteAnalyzer {
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            api_key,
        }
    }
}

impl AnalysisProvider for RemoteAnalyzer {
    fn name(&self) -> &str {
        &self.endpoint
    }

    async fn analyze(
        &self,
        context: &RiskContext,
        evaluations: &[Evaluation],
    ) -> Result<RiskRecommendations, AppError> {
        let mut request = self.client.post(&self.endpoint).json(&AnalysisRequest {
            context,
            evaluations,
        });
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let recommendations = request
            .send()
            .await?
            .error_for_status()?
            .json::<RiskRecommendations>()
            .await?;

        Ok(recommendations)
    }
}

/// How recommendations are produced, for health reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisMode {
    Heuristic,
    Remote,
}

/// Single call site selecting the remote provider or the heuristic pipeline.
#[derive(Debug, Clone)]
pub struct RecommendationEngine<P = RemoteAnalyzer> {
    remote: Option<P>,
    deadline: Duration,
}

impl RecommendationEngine<RemoteAnalyzer> {
    /// Build the engine from configuration. No provider URL means heuristic only.
    pub fn from_config(config: &AppConfig) -> Self {
        let remote = config
            .analysis_provider_url
            .as_ref()
            .map(|url| RemoteAnalyzer::new(url.clone(), config.analysis_provider_api_key.clone()));

        Self {
            remote,
            deadline: config.analysis_provider_timeout(),
        }
    }
}

impl<P: AnalysisProvider> RecommendationEngine<P> {
    /// Heuristic-only engine.
    pub fn heuristic() -> Self {
        Self {
            remote: None,
            deadline: Duration::ZERO,
        }
    }

    /// Engine delegating to `provider`, bounded by `deadline`.
    pub fn with_provider(provider: P, deadline: Duration) -> Self {
        Self {
            remote: Some(provider),
            deadline,
        }
    }

    pub fn mode(&self) -> AnalysisMode {
        if self.remote.is_some() {
            AnalysisMode::Remote
        } else {
            AnalysisMode::Heuristic
        }
    }

    /// Produce recommendations, preferring the remote provider when configured.
    pub async fn recommend(
        &self,
        context: &RiskContext,
        evaluations: &[Evaluation],
    ) -> RiskRecommendations {
        let Some(provider) = &self.remote else {
            return recommendation::recommend(context, evaluations);
        };

        let outcome = match tokio::time::timeout(
            self.deadline,
            provider.analyze(context, evaluations),
        )
        .await
        {
            Ok(result) => result.and_then(|recommendations| {
                recommendations.validate()?;
                Ok(recommendations)
            }),
            Err(_) => Err(AppError::Provider(format!(
                "no answer within {}ms",
                self.deadline.as_millis()
            ))),
        };

        match outcome {
            Ok(mut recommendations) => {
                tracing::debug!(provider = provider.name(), "Remote analysis succeeded");
                recommendations.source = AnalysisSource::Remote;
                recommendations
            }
            Err(e) => {
                tracing::warn!(
                    provider = provider.name(),
                    error = %e,
                    "Remote analysis failed, falling back to heuristic engine"
                );
                recommendation::recommend(context, evaluations)
            }
        }
    }
}
