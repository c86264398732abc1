//! Heuristic recommendation pipeline for one risk sheet.
//!
//! insight extraction → three factor analyzers → overall assessment and
//! questionnaire gaps. Pure and deterministic: identical inputs always give
//! identical output.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::evaluation::{Evaluation, SecurityLevel};
use crate::models::risk::RiskContext;
use crate::services::assessment::{self, OverallAssessment};
use crate::services::factors::{self, FactorRecommendation, FactorTable};
use crate::services::insights;
use crate::services::questionnaire::{self, QuestionnaireRecommendation};
use crate::services::risk_score;

/// Which engine produced a set of recommendations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisSource {
    #[default]
    Heuristic,
    Remote,
}

/// Evidence volume behind a set of recommendations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EvaluationBasis {
    pub evaluation_count: usize,
    pub total_responses: usize,
    pub negative_responses: usize,
    pub security_level: SecurityLevel,
}

/// Factor estimates, synthesis and questionnaire gaps for one risk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RiskRecommendations {
    pub probability: FactorRecommendation,
    pub vulnerability: FactorRecommendation,
    pub impact: FactorRecommendation,
    pub overall_assessment: OverallAssessment,
    pub based_on_evaluations: EvaluationBasis,
    pub questionnaire_recommendations: Vec<QuestionnaireRecommendation>,
    #[serde(default)]
    pub source: AnalysisSource,
}

impl RiskRecommendations {
    /// Check factor ranges, confidence bounds, non-empty evidence and that the
    /// composite score and priority agree with the three factors.
    ///
    /// Heuristic output always passes; remote payloads are checked before use.
    pub fn validate(&self) -> Result<(), AppError> {
        check_factor("probability", &self.probability, &factors::probability::TABLE)?;
        check_factor(
            "vulnerability",
            &self.vulnerability,
            &factors::vulnerability::TABLE,
        )?;
        check_factor("impact", &self.impact, &factors::impact::TABLE)?;

        let expected = u32::from(self.probability.score)
            * u32::from(self.vulnerability.score)
            * u32::from(self.impact.score);
        let assessment = &self.overall_assessment;
        if assessment.composite_score != expected {
            return Err(AppError::Validation(format!(
                "composite score {} does not match factor product {expected}",
                assessment.composite_score
            )));
        }
        let priority = risk_score::score_to_priority(expected);
        if assessment.priority != priority {
            return Err(AppError::Validation(format!(
                "priority {:?} does not match composite score {expected} ({priority:?})",
                assessment.priority
            )));
        }
        Ok(())
    }
}

fn check_factor(
    name: &str,
    factor: &FactorRecommendation,
    table: &FactorTable,
) -> Result<(), AppError> {
    if !table.range.contains(&factor.score) {
        return Err(AppError::Validation(format!(
            "{name} score {} outside {}..={}",
            factor.score,
            table.range.start(),
            table.range.end()
        )));
    }
    if !(0.0..=1.0).contains(&factor.confidence) {
        return Err(AppError::Validation(format!(
            "{name} confidence {} outside [0, 1]",
            factor.confidence
        )));
    }
    if factor.positive_points.is_empty() || factor.negative_points.is_empty() {
        return Err(AppError::Validation(format!(
            "{name} recommendation is missing evidence points"
        )));
    }
    Ok(())
}

/// Run the heuristic pipeline.
pub fn recommend(context: &RiskContext, evaluations: &[Evaluation]) -> RiskRecommendations {
    let tally = insights::extract(evaluations);

    let probability = factors::probability::recommend(context, &tally);
    let vulnerability = factors::vulnerability::recommend(context, &tally);
    let impact = factors::impact::recommend(context, &tally);

    let overall_assessment =
        assessment::compose(context, &probability, &vulnerability, &impact, &tally);
    let questionnaire_recommendations = questionnaire::recommend(context, &tally);

    tracing::debug!(
        target_name = %context.target,
        probability = probability.score,
        vulnerability = vulnerability.score,
        impact = impact.score,
        composite = overall_assessment.composite_score,
        "Computed heuristic risk recommendations"
    );

    RiskRecommendations {
        probability,
        vulnerability,
        impact,
        overall_assessment,
        based_on_evaluations: EvaluationBasis {
            evaluation_count: evaluations.len(),
            total_responses: tally.total_responses,
            negative_responses: tally.negative_responses,
            security_level: tally.security_level,
        },
        questionnaire_recommendations,
        source: AnalysisSource::Heuristic,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::evaluation::EvaluationAnswer;
    use crate::services::risk_score::PriorityLevel;

    fn scenario_d_evaluation() -> Evaluation {
        Evaluation {
            id: None,
            responses: vec![
                EvaluationAnswer::boolean("Le contrôle d'accès est-il assuré par badge ?", false),
                EvaluationAnswer::boolean("Les accès de service sont-ils verrouillés ?", false),
                EvaluationAnswer::boolean("Les accès visiteurs sont-ils tracés ?", false),
                EvaluationAnswer::boolean("La clôture est-elle continue ?", false),
                EvaluationAnswer::boolean("La clôture est-elle en bon état ?", false),
                EvaluationAnswer::boolean("Une formation sûreté est-elle dispensée ?", false),
                EvaluationAnswer::boolean("La formation est-elle renouvelée ?", false),
                EvaluationAnswer::boolean(
                    "Une formation des nouveaux arrivants existe-t-elle ?",
                    false,
                ),
                EvaluationAnswer::boolean("Les extincteurs sont-ils vérifiés ?", true),
                EvaluationAnswer::boolean("Le registre des entrées est-il tenu ?", true),
            ],
        }
    }

    #[test]
    fn weak_site_scenario() {
        let context = RiskContext::new("Entrepôt logistique", "Intrusion et vol de matériel");
        let result = recommend(&context, &[scenario_d_evaluation()]);

        assert_eq!(result.based_on_evaluations.security_level, SecurityLevel::Low);
        assert_eq!(result.based_on_evaluations.total_responses, 10);
        assert_eq!(result.based_on_evaluations.negative_responses, 8);
        assert!(result.probability.score >= 2);

        let cited = [
            "Le contrôle d'accès est-il assuré par badge ?",
            "La clôture est-elle continue ?",
            "Une formation sûreté est-elle dispensée ?",
        ];
        assert!(result
            .probability
            .negative_points
            .iter()
            .any(|point| cited.iter().any(|question| point.contains(question))));
        assert!(result.validate().is_ok());
    }

    #[test]
    fn empty_evaluations_still_produce_evidence() {
        let context = RiskContext::new("Parking", "Vandalisme");
        let result = recommend(&context, &[]);

        for factor in [&result.probability, &result.vulnerability, &result.impact] {
            assert!(!factor.positive_points.is_empty());
            assert!(!factor.negative_points.is_empty());
        }
        assert_eq!(result.based_on_evaluations.evaluation_count, 0);
        assert_eq!(result.overall_assessment.composite_score, 2 * 2 * 3);
        assert!(result.validate().is_ok());
    }

    #[test]
    fn composite_matches_factor_product() {
        let context = RiskContext::new("Salle serveur", "Intrusion");
        let result = recommend(&context, &[scenario_d_evaluation()]);

        let product = u32::from(result.probability.score)
            * u32::from(result.vulnerability.score)
            * u32::from(result.impact.score);
        assert_eq!(result.overall_assessment.composite_score, product);
    }

    #[test]
    fn pipeline_is_idempotent() {
        let context = RiskContext::new("Salle serveur", "Intrusion");
        let evaluations = [scenario_d_evaluation()];

        let first = serde_json::to_string(&recommend(&context, &evaluations)).unwrap();
        let second = serde_json::to_string(&recommend(&context, &evaluations)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn validate_rejects_out_of_range_and_missing_evidence() {
        let context = RiskContext::new("Site", "Vol");
        let mut result = recommend(&context, &[]);
        result.impact.score = 6;
        assert!(matches!(result.validate(), Err(AppError::Validation(_))));

        let mut result = recommend(&context, &[]);
        result.vulnerability.negative_points.clear();
        assert!(matches!(result.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn validate_rejects_inconsistent_composite() {
        let context = RiskContext::new("Parking", "Vandalisme");
        let mut result = recommend(&context, &[]);
        result.overall_assessment.composite_score += 1;
        assert!(matches!(result.validate(), Err(AppError::Validation(_))));

        let mut result = recommend(&context, &[]);
        // Default factors 2 × 2 × 3 = 12 fall in the LOW band.
        result.overall_assessment.priority = PriorityLevel::Critical;
        assert!(matches!(result.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn source_defaults_to_heuristic_when_absent() {
        let context = RiskContext::new("Site", "Vol");
        let mut json = serde_json::to_value(recommend(&context, &[])).unwrap();
        json.as_object_mut().unwrap().remove("source");

        let decoded: RiskRecommendations = serde_json::from_value(json).unwrap();
        assert_eq!(decoded.source, AnalysisSource::Heuristic);
    }
}
