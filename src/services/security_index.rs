//! Tenant-wide Security Index.
//!
//! Four sub-scores, each normalized to the GAMR [1, 60] scale where 1 is
//! the safest posture and 60 the most exposed:
//! - Evaluation score: 40%
//! - Corrective action coverage of critical risks: 30%
//! - Critical risk resolution rate: 20%
//! - Security objectives compliance: 10%
//!
//! Missing data counts as best case (1), never worst case.

use std::future::Future;

use uuid::Uuid;

use crate::errors::AppError;
use crate::models::security_index::{
    CriticalRiskSummary, SecurityIndexComponents, SecurityIndexInput,
};

const SCALE_MIN: f64 = 1.0;
const SCALE_MAX: f64 = 60.0;

const EVALUATION_WEIGHT: f64 = 0.40;
const COVERAGE_WEIGHT: f64 = 0.30;
const RESOLUTION_WEIGHT: f64 = 0.20;
const COMPLIANCE_WEIGHT: f64 = 0.10;

/// Persistence collaborator supplying tenant aggregates.
pub trait TenantRiskStore: Send + Sync {
    /// Total scores of the tenant's completed evaluations.
    fn evaluation_scores(
        &self,
        tenant_id: Uuid,
    ) -> impl Future<Output = Result<Vec<f64>, AppError>> + Send;

    /// Critical risks of the tenant with their corrective actions.
    fn critical_risks(
        &self,
        tenant_id: Uuid,
    ) -> impl Future<Output = Result<Vec<CriticalRiskSummary>, AppError>> + Send;
}

/// Fetch a tenant's aggregates from the store and compute its index.
pub async fn compute_for_tenant<S: TenantRiskStore>(
    store: &S,
    tenant_id: Uuid,
) -> Result<SecurityIndexComponents, AppError> {
    let (evaluation_scores, critical_risks) = tokio::try_join!(
        store.evaluation_scores(tenant_id),
        store.critical_risks(tenant_id),
    )?;

    let components = compute(&SecurityIndexInput {
        evaluation_scores,
        critical_risks,
    });

    tracing::info!(
        %tenant_id,
        global_security_index = components.global_security_index,
        "Computed tenant security index"
    );

    Ok(components)
}

/// Compute the Security Index from tenant aggregates.
pub fn compute(input: &SecurityIndexInput) -> SecurityIndexComponents {
    let evaluation = evaluation_score(&input.evaluation_scores);
    let coverage = corrective_action_coverage(&input.critical_risks);
    let resolution = critical_risks_resolution_rate(&input.critical_risks);
    let compliance = security_objectives_compliance(&input.critical_risks);

    let global = (evaluation * EVALUATION_WEIGHT
        + coverage * COVERAGE_WEIGHT
        + resolution * RESOLUTION_WEIGHT
        + compliance * COMPLIANCE_WEIGHT)
        .clamp(SCALE_MIN, SCALE_MAX);

    SecurityIndexComponents {
        evaluation_score: round1(evaluation),
        corrective_action_coverage: round1(coverage),
        critical_risks_resolution_rate: round1(resolution),
        security_objectives_compliance: round1(compliance),
        global_security_index: round1(global),
    }
}

/// Mean evaluation score on the GAMR scale.
///
/// Means up to 60 are already on the scale; larger means are read as
/// percentages and rescaled.
fn evaluation_score(scores: &[f64]) -> f64 {
    if scores.is_empty() {
        return SCALE_MIN;
    }

    let mean = scores.iter().sum::<f64>() / scores.len() as f64;
    let scaled = if mean <= SCALE_MAX {
        mean
    } else {
        (mean / 100.0) * 59.0 + 1.0
    };
    scaled.clamp(SCALE_MIN, SCALE_MAX)
}

/// Share of critical risks with at least one corrective action.
fn corrective_action_coverage(risks: &[CriticalRiskSummary]) -> f64 {
    if risks.is_empty() {
        return SCALE_MIN;
    }
    let covered = risks.iter().filter(|risk| !risk.actions.is_empty()).count();
    percentage_to_scale(percentage(covered, risks.len()))
}

/// Share of critical risks with at least one completed action.
fn critical_risks_resolution_rate(risks: &[CriticalRiskSummary]) -> f64 {
    if risks.is_empty() {
        return SCALE_MIN;
    }
    let resolved = risks
        .iter()
        .filter(|risk| risk.actions.iter().any(|action| action.is_completed()))
        .count();
    percentage_to_scale(percentage(resolved, risks.len()))
}

/// Share of non-cancelled actions on critical risks that are completed.
fn security_objectives_compliance(risks: &[CriticalRiskSummary]) -> f64 {
    let (active, completed) = risks
        .iter()
        .flat_map(|risk| &risk.actions)
        .filter(|action| !action.is_cancelled())
        .fold((0, 0), |(active, completed), action| {
            (active + 1, completed + usize::from(action.is_completed()))
        });

    if active == 0 {
        return SCALE_MIN;
    }
    percentage_to_scale(percentage(completed, active))
}

fn percentage(part: usize, whole: usize) -> f64 {
    part as f64 / whole as f64 * 100.0
}

/// Higher percentage maps to a lower (better) index.
fn percentage_to_scale(pct: f64) -> f64 {
    (SCALE_MAX - (pct / 100.0) * 59.0).clamp(SCALE_MIN, SCALE_MAX)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::security_index::{ActionStatus, ActionSummary};

    fn risk(statuses: &[ActionStatus]) -> CriticalRiskSummary {
        CriticalRiskSummary {
            id: Uuid::new_v4(),
            actions: statuses
                .iter()
                .map(|status| ActionSummary { status: *status })
                .collect(),
        }
    }

    fn assert_in_scale(components: &SecurityIndexComponents) {
        for value in [
            components.evaluation_score,
            components.corrective_action_coverage,
            components.critical_risks_resolution_rate,
            components.security_objectives_compliance,
            components.global_security_index,
        ] {
            assert!((SCALE_MIN..=SCALE_MAX).contains(&value), "{value} out of scale");
        }
    }

    #[test]
    fn empty_tenant_is_best_case() {
        let result = compute(&SecurityIndexInput::default());
        assert_eq!(result.evaluation_score, 1.0);
        assert_eq!(result.corrective_action_coverage, 1.0);
        assert_eq!(result.critical_risks_resolution_rate, 1.0);
        assert_eq!(result.security_objectives_compliance, 1.0);
        assert_eq!(result.global_security_index, 1.0);
    }

    #[test]
    fn evaluation_mean_on_gamr_scale_is_kept() {
        assert_eq!(evaluation_score(&[20.0, 30.0]), 25.0);
        assert_eq!(evaluation_score(&[0.0]), 1.0);
        assert_eq!(evaluation_score(&[60.0]), 60.0);
    }

    #[test]
    fn evaluation_mean_above_sixty_is_rescaled() {
        // (80 / 100) * 59 + 1 = 48.2
        assert!((evaluation_score(&[80.0]) - 48.2).abs() < 1e-9);
        assert_eq!(evaluation_score(&[100.0]), 60.0);
        assert_eq!(evaluation_score(&[250.0]), 60.0);
    }

    #[test]
    fn uncovered_critical_risks_are_worst_case() {
        let result = compute(&SecurityIndexInput {
            evaluation_scores: Vec::new(),
            critical_risks: vec![risk(&[]), risk(&[])],
        });

        assert_eq!(result.corrective_action_coverage, 60.0);
        assert_eq!(result.critical_risks_resolution_rate, 60.0);
        // No actions at all: compliance has nothing to measure.
        assert_eq!(result.security_objectives_compliance, 1.0);
        // 0.4*1 + 0.3*60 + 0.2*60 + 0.1*1 = 30.5
        assert_eq!(result.global_security_index, 30.5);
    }

    #[test]
    fn mixed_portfolio() {
        let result = compute(&SecurityIndexInput {
            evaluation_scores: vec![30.0, 50.0],
            critical_risks: vec![
                risk(&[ActionStatus::Completed, ActionStatus::InProgress]),
                risk(&[ActionStatus::Planned, ActionStatus::Cancelled]),
                risk(&[]),
                risk(&[ActionStatus::Completed]),
            ],
        });

        // Mean 40 stays on scale.
        assert_eq!(result.evaluation_score, 40.0);
        // 3/4 covered: 60 - 0.75*59 = 15.75
        assert_eq!(result.corrective_action_coverage, 15.8);
        // 2/4 resolved: 60 - 0.5*59 = 30.5
        assert_eq!(result.critical_risks_resolution_rate, 30.5);
        // 2 completed out of 4 non-cancelled: 30.5
        assert_eq!(result.security_objectives_compliance, 30.5);
        // 0.4*40 + 0.3*15.75 + 0.2*30.5 + 0.1*30.5 = 16 + 4.725 + 6.1 + 3.05 = 29.875
        assert_eq!(result.global_security_index, 29.9);
        assert_in_scale(&result);
    }

    #[test]
    fn fully_resolved_portfolio_is_best_case() {
        let result = compute(&SecurityIndexInput {
            evaluation_scores: vec![1.0],
            critical_risks: vec![
                risk(&[ActionStatus::Completed]),
                risk(&[ActionStatus::Completed, ActionStatus::Cancelled]),
            ],
        });

        assert_eq!(result.corrective_action_coverage, 1.0);
        assert_eq!(result.critical_risks_resolution_rate, 1.0);
        assert_eq!(result.security_objectives_compliance, 1.0);
        assert_eq!(result.global_security_index, 1.0);
    }

    #[test]
    fn only_cancelled_actions_leave_compliance_at_best() {
        let result = compute(&SecurityIndexInput {
            evaluation_scores: Vec::new(),
            critical_risks: vec![risk(&[ActionStatus::Cancelled])],
        });

        // Cancelled actions still count as coverage but not as resolution.
        assert_eq!(result.corrective_action_coverage, 1.0);
        assert_eq!(result.critical_risks_resolution_rate, 60.0);
        assert_eq!(result.security_objectives_compliance, 1.0);
    }

    #[test]
    fn components_always_within_scale() {
        let inputs = [
            SecurityIndexInput::default(),
            SecurityIndexInput {
                evaluation_scores: vec![1000.0, -50.0],
                critical_risks: vec![risk(&[ActionStatus::Planned]); 5],
            },
            SecurityIndexInput {
                evaluation_scores: vec![-10.0],
                critical_risks: vec![risk(&[ActionStatus::Completed]); 3],
            },
        ];
        for input in &inputs {
            assert_in_scale(&compute(input));
        }
    }

    struct InMemoryStore {
        tenant_id: Uuid,
        input: SecurityIndexInput,
    }

    impl TenantRiskStore for InMemoryStore {
        async fn evaluation_scores(&self, tenant_id: Uuid) -> Result<Vec<f64>, AppError> {
            if tenant_id == self.tenant_id {
                Ok(self.input.evaluation_scores.clone())
            } else {
                Err(AppError::NotFound(format!("tenant {tenant_id}")))
            }
        }

        async fn critical_risks(
            &self,
            tenant_id: Uuid,
        ) -> Result<Vec<CriticalRiskSummary>, AppError> {
            if tenant_id == self.tenant_id {
                Ok(self.input.critical_risks.clone())
            } else {
                Err(AppError::NotFound(format!("tenant {tenant_id}")))
            }
        }
    }

    #[tokio::test]
    async fn compute_for_tenant_reads_the_store() {
        let store = InMemoryStore {
            tenant_id: Uuid::new_v4(),
            input: SecurityIndexInput {
                evaluation_scores: vec![30.0, 50.0],
                critical_risks: vec![risk(&[]), risk(&[])],
            },
        };

        let result = compute_for_tenant(&store, store.tenant_id).await.unwrap();
        assert_eq!(result, compute(&store.input));
    }

    #[tokio::test]
    async fn compute_for_tenant_propagates_store_errors() {
        let store = InMemoryStore {
            tenant_id: Uuid::new_v4(),
            input: SecurityIndexInput::default(),
        };

        let result = compute_for_tenant(&store, Uuid::new_v4()).await;
        assert!(matches!(result, Err(ref e) if e.is_not_found()));
    }

    struct OfflineStore;

    impl TenantRiskStore for OfflineStore {
        async fn evaluation_scores(&self, _tenant_id: Uuid) -> Result<Vec<f64>, AppError> {
            Ok(Vec::new())
        }

        async fn critical_risks(
            &self,
            _tenant_id: Uuid,
        ) -> Result<Vec<CriticalRiskSummary>, AppError> {
            Err(AppError::Internal("risk store unreachable".to_string()))
        }
    }

    #[tokio::test]
    async fn compute_for_tenant_surfaces_storage_failures() {
        let result = compute_for_tenant(&OfflineStore, Uuid::new_v4()).await;
        assert!(matches!(result, Err(AppError::Internal(_))));
    }
}
