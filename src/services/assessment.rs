//! Overall assessment composer.
//!
//! Deterministic template over values already computed by the factor
//! analyzers and the insight tally: no new scoring happens here besides
//! echoing the composite product as a cross-check figure.

use serde::{Deserialize, Serialize};

use crate::models::risk::RiskContext;
use crate::services::factors::FactorRecommendation;
use crate::services::insights::InsightTally;
use crate::services::risk_score::{self, PriorityLevel};

/// Attention thresholds per factor.
const PROBABILITY_ATTENTION: u8 = 3;
const VULNERABILITY_ATTENTION: u8 = 3;
const IMPACT_ATTENTION: u8 = 4;

/// Human-readable synthesis of the three factor estimates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OverallAssessment {
    pub summary: String,
    pub composite_score: u32,
    pub priority: PriorityLevel,
    pub attention_points: Vec<String>,
}

/// Compose the narrative and attention bullets.
pub fn compose(
    context: &RiskContext,
    probability: &FactorRecommendation,
    vulnerability: &FactorRecommendation,
    impact: &FactorRecommendation,
    tally: &InsightTally,
) -> OverallAssessment {
    let composite_score = u32::from(probability.score)
        * u32::from(vulnerability.score)
        * u32::from(impact.score);
    let priority = risk_score::score_to_priority(composite_score);

    let mut lines = vec![
        format!("Cible : {}", context.target),
        format!("Scénario : {}", context.scenario),
    ];
    if let Some(category) = &context.category {
        lines.push(format!("Catégorie : {category}"));
    }
    lines.push(format!(
        "Base d'analyse : {} réponse(s), dont {} défavorable(s) ; niveau de sécurité {}",
        tally.total_responses,
        tally.negative_responses,
        tally.security_level.label()
    ));
    lines.push(format!("Probabilité {}/3 : {}", probability.score, probability.explanation));
    lines.push(format!(
        "Vulnérabilité {}/4 : {}",
        vulnerability.score, vulnerability.explanation
    ));
    lines.push(format!("Impact {}/5 : {}", impact.score, impact.explanation));
    lines.push(format!("Points faibles : {}", join_or_none(&tally.weaknesses)));
    lines.push(format!("Points forts : {}", join_or_none(&tally.strengths)));
    lines.push(format!(
        "Score de risque : {} × {} × {} = {composite_score} (priorité {priority})",
        probability.score, vulnerability.score, impact.score
    ));

    OverallAssessment {
        summary: lines.join("\n"),
        composite_score,
        priority,
        attention_points: attention_points(probability, vulnerability, impact),
    }
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "aucun identifié".to_string()
    } else {
        items.join(" ; ")
    }
}

fn attention_points(
    probability: &FactorRecommendation,
    vulnerability: &FactorRecommendation,
    impact: &FactorRecommendation,
) -> Vec<String> {
    let mut points = Vec::new();
    if probability.score >= PROBABILITY_ATTENTION {
        points.push(
            "Réduire la probabilité : renforcer les mesures dissuasives et de prévention"
                .to_string(),
        );
    }
    if vulnerability.score >= VULNERABILITY_ATTENTION {
        points.push(
            "Réduire la vulnérabilité : corriger en priorité les mesures de protection défaillantes"
                .to_string(),
        );
    }
    if impact.score >= IMPACT_ATTENTION {
        points.push(
            "Limiter l'impact : préparer les plans de réponse et de continuité d'activité"
                .to_string(),
        );
    }
    if points.is_empty() {
        points.push("Aucun facteur ne nécessite d'attention prioritaire".to_string());
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::insights;

    fn factor(score: u8) -> FactorRecommendation {
        FactorRecommendation {
            score,
            explanation: format!("explication {score}"),
            positive_points: vec!["+".to_string()],
            negative_points: vec!["-".to_string()],
            confidence: 0.9,
        }
    }

    #[test]
    fn composite_echoes_the_product() {
        let context = RiskContext::new("Salle serveur", "Intrusion");
        let tally = insights::extract(&[]);

        let result = compose(&context, &factor(3), &factor(2), &factor(4), &tally);
        assert_eq!(result.composite_score, 24);
        assert_eq!(result.priority, PriorityLevel::Medium);
        assert!(result.summary.contains("3 × 2 × 4 = 24"));
        assert!(result.summary.contains("Cible : Salle serveur"));
        assert!(result.summary.contains("Points faibles : aucun identifié"));
    }

    #[test]
    fn attention_bullets_follow_thresholds() {
        let context = RiskContext::new("Site", "Vol");
        let tally = insights::extract(&[]);

        let all = compose(&context, &factor(3), &factor(3), &factor(4), &tally);
        assert_eq!(all.attention_points.len(), 3);

        let none = compose(&context, &factor(2), &factor(2), &factor(3), &tally);
        assert_eq!(
            none.attention_points,
            vec!["Aucun facteur ne nécessite d'attention prioritaire".to_string()]
        );

        let impact_only = compose(&context, &factor(1), &factor(2), &factor(5), &tally);
        assert_eq!(impact_only.attention_points.len(), 1);
        assert!(impact_only.attention_points[0].starts_with("Limiter l'impact"));
    }

    #[test]
    fn category_line_is_optional() {
        let mut context = RiskContext::new("Site", "Vol");
        let tally = insights::extract(&[]);

        let without = compose(&context, &factor(1), &factor(1), &factor(1), &tally);
        assert!(!without.summary.contains("Catégorie"));

        context.category = Some("Malveillance".to_string());
        let with = compose(&context, &factor(1), &factor(1), &factor(1), &tally);
        assert!(with.summary.contains("Catégorie : Malveillance"));
    }
}
