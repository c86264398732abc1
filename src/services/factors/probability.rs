//! Probability analyzer (1–3): how likely the threat scenario is to occur.

use crate::models::evaluation::{Category, SecurityLevel};
use crate::models::risk::RiskContext;
use crate::services::insights::InsightTally;

use super::{
    evaluate, protective_summary, response_summary, Adjustment, FactorRecommendation, FactorTable,
    Trigger,
};

const ACCESS_GATE: &[&str] = &["accès", "serveur", "données", "intrusion", "informatique"];
const PERIMETER_GATE: &[&str] = &["intrusion", "vol", "site", "périmètre", "extérieur"];
const LIGHTING_GATE: &[&str] = &["intrusion", "vol", "nuit", "extérieur", "parking"];

const ADJUSTMENTS: &[Adjustment] = &[
    Adjustment {
        trigger: Trigger::Weakness {
            category: Category::Incidents,
            threshold: 18,
        },
        gate: &[],
        delta: 1,
        label: "Historique d'incidents sur le site",
    },
    Adjustment {
        trigger: Trigger::Weakness {
            category: Category::Access,
            threshold: 15,
        },
        gate: ACCESS_GATE,
        delta: 1,
        label: "Contrôle d'accès insuffisant",
    },
    Adjustment {
        trigger: Trigger::Weakness {
            category: Category::Perimeter,
            threshold: 12,
        },
        gate: PERIMETER_GATE,
        delta: 1,
        label: "Protection périmétrique défaillante",
    },
    Adjustment {
        trigger: Trigger::Weakness {
            category: Category::Lighting,
            threshold: 8,
        },
        gate: LIGHTING_GATE,
        delta: 1,
        label: "Éclairage insuffisant favorisant une approche discrète",
    },
    Adjustment {
        trigger: Trigger::Level(SecurityLevel::Low),
        gate: &[],
        delta: 1,
        label: "Niveau de sécurité global faible",
    },
    Adjustment {
        trigger: Trigger::Strength {
            category: Category::Access,
            threshold: 12,
        },
        gate: ACCESS_GATE,
        delta: -1,
        label: "Contrôle d'accès dissuasif",
    },
    Adjustment {
        trigger: Trigger::Strength {
            category: Category::Surveillance,
            threshold: 10,
        },
        gate: &[],
        delta: -1,
        label: "Surveillance dissuasive en place",
    },
    Adjustment {
        trigger: Trigger::Strength {
            category: Category::Procedures,
            threshold: 10,
        },
        gate: &[],
        delta: 0,
        label: "Procédures de sécurité appliquées",
    },
    Adjustment {
        trigger: Trigger::Level(SecurityLevel::High),
        gate: &[],
        delta: -1,
        label: "Niveau de sécurité global satisfaisant",
    },
];

pub const TABLE: FactorTable = FactorTable {
    default_score: 2,
    range: 1..=3,
    adjustments: ADJUSTMENTS,
    confidence: 0.88,
};

const PROTECTIVE: &[Category] = &[
    Category::Access,
    Category::Perimeter,
    Category::Surveillance,
    Category::Lighting,
];

/// Estimate the probability factor.
pub fn recommend(context: &RiskContext, tally: &InsightTally) -> FactorRecommendation {
    evaluate(&TABLE, context, tally, explain)
}

fn explain(score: u8, tally: &InsightTally) -> String {
    let summary = response_summary(tally);
    if score >= 3 {
        format!("Probabilité ÉLEVÉE : {summary} traduisent une exposition marquée à la menace.")
    } else if score >= 2 {
        format!("Probabilité MODÉRÉE : {summary} ; des mesures existent mais restent perfectibles.")
    } else {
        format!(
            "Probabilité FAIBLE : {summary} ; {}.",
            protective_summary(tally, PROTECTIVE)
        )
    }
}
