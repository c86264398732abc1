//! Deterministic GAMR risk score: probability × vulnerability × impact.
//!
//! Factor ranges:
//! - Probability: 1–3
//! - Vulnerability: 1–4
//! - Impact: 1–5
//!
//! The product therefore lies in [1, 60] and is banded into five priority
//! levels with fixed thresholds.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

pub const PROBABILITY_RANGE: RangeInclusive<u8> = 1..=3;
pub const VULNERABILITY_RANGE: RangeInclusive<u8> = 1..=4;
pub const IMPACT_RANGE: RangeInclusive<u8> = 1..=5;

/// Highest reachable score (3 × 4 × 5).
pub const MAX_SCORE: u32 = 60;

/// Computed risk score result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskScore {
    pub score: u32,
    pub priority: PriorityLevel,
}

/// Priority band derived from the risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriorityLevel {
    VeryLow,
    Low,
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for PriorityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::VeryLow => write!(f, "Très faible"),
            Self::Low => write!(f, "Faible"),
            Self::Medium => write!(f, "Moyenne"),
            Self::High => write!(f, "Élevée"),
            Self::Critical => write!(f, "Critique"),
        }
    }
}

/// Compute the risk score, rejecting factors outside their valid range.
pub fn compute(probability: u8, vulnerability: u8, impact: u8) -> Result<RiskScore, AppError> {
    check_range("probability", probability, &PROBABILITY_RANGE)?;
    check_range("vulnerability", vulnerability, &VULNERABILITY_RANGE)?;
    check_range("impact", impact, &IMPACT_RANGE)?;

    let score = u32::from(probability) * u32::from(vulnerability) * u32::from(impact);

    Ok(RiskScore {
        score,
        priority: score_to_priority(score),
    })
}

fn check_range(name: &str, value: u8, range: &RangeInclusive<u8>) -> Result<(), AppError> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "{name} must be between {} and {}, got {value}",
            range.start(),
            range.end()
        )))
    }
}

/// Map a score to its priority band.
pub fn score_to_priority(score: u32) -> PriorityLevel {
    if score >= 48 {
        PriorityLevel::Critical
    } else if score >= 36 {
        PriorityLevel::High
    } else if score >= 24 {
        PriorityLevel::Medium
    } else if score >= 12 {
        PriorityLevel::Low
    } else {
        PriorityLevel::VeryLow
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimum_factors_are_very_low() {
        let result = compute(1, 1, 1).unwrap();
        assert_eq!(result.score, 1);
        assert_eq!(result.priority, PriorityLevel::VeryLow);
    }

    #[test]
    fn maximum_factors_are_critical() {
        let result = compute(3, 4, 5).unwrap();
        assert_eq!(result.score, MAX_SCORE);
        assert_eq!(result.priority, PriorityLevel::Critical);
    }

    #[test]
    fn score_is_product_within_bounds_for_all_valid_factors() {
        for p in PROBABILITY_RANGE {
            for v in VULNERABILITY_RANGE {
                for i in IMPACT_RANGE {
                    let result = compute(p, v, i).unwrap();
                    assert_eq!(result.score, u32::from(p) * u32::from(v) * u32::from(i));
                    assert!((1..=MAX_SCORE).contains(&result.score));
                }
            }
        }
    }

    #[test]
    fn priority_is_monotonic() {
        let mut previous = score_to_priority(1);
        for score in 2..=MAX_SCORE {
            let current = score_to_priority(score);
            assert!(current >= previous, "priority dropped at score {score}");
            previous = current;
        }
    }

    #[test]
    fn score_boundaries() {
        assert_eq!(score_to_priority(60), PriorityLevel::Critical);
        assert_eq!(score_to_priority(48), PriorityLevel::Critical);
        assert_eq!(score_to_priority(47), PriorityLevel::High);
        assert_eq!(score_to_priority(36), PriorityLevel::High);
        assert_eq!(score_to_priority(35), PriorityLevel::Medium);
        assert_eq!(score_to_priority(24), PriorityLevel::Medium);
        assert_eq!(score_to_priority(23), PriorityLevel::Low);
        assert_eq!(score_to_priority(12), PriorityLevel::Low);
        assert_eq!(score_to_priority(11), PriorityLevel::VeryLow);
    }

    #[test]
    fn out_of_range_factors_are_rejected() {
        assert!(matches!(compute(0, 2, 3), Err(AppError::Validation(_))));
        assert!(matches!(compute(4, 2, 3), Err(AppError::Validation(_))));
        assert!(matches!(compute(2, 5, 3), Err(AppError::Validation(_))));
        assert!(matches!(compute(2, 2, 6), Err(AppError::Validation(_))));
    }

    #[test]
    fn priority_serializes_screaming_snake_case() {
        let json = serde_json::to_value(PriorityLevel::VeryLow).unwrap();
        assert_eq!(json, "VERY_LOW");
        assert_eq!(PriorityLevel::Critical.to_string(), "Critique");
    }
}
