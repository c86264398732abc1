//! Tenant-wide aggregates consumed by the Security Index.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of a corrective action.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatus {
    Planned,
    InProgress,
    Completed,
    Cancelled,
}

/// Corrective action attached to a risk, reduced to its status.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActionSummary {
    pub status: ActionStatus,
}

impl ActionSummary {
    pub fn is_completed(&self) -> bool {
        self.status == ActionStatus::Completed
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == ActionStatus::Cancelled
    }
}

/// A risk classified as critical together with its corrective actions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CriticalRiskSummary {
    pub id: Uuid,
    #[serde(default)]
    pub actions: Vec<ActionSummary>,
}

/// Aggregate counts for one tenant.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SecurityIndexInput {
    /// Total scores of completed evaluations.
    #[serde(default)]
    pub evaluation_scores: Vec<f64>,
    #[serde(default)]
    pub critical_risks: Vec<CriticalRiskSummary>,
}

/// Security Index and its four sub-scores, on the [1, 60] scale (lower is better).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SecurityIndexComponents {
    pub evaluation_score: f64,
    pub corrective_action_coverage: f64,
    pub critical_risks_resolution_rate: f64,
    pub security_objectives_compliance: f64,
    pub global_security_index: f64,
}
