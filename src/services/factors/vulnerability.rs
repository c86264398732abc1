//! Vulnerability analyzer (1–4): how weak the existing controls are.
//!
//! Reacts to control-category weaknesses and strengths only; incident
//! history says nothing about the controls themselves.

use crate::models::evaluation::Category;
use crate::models::risk::RiskContext;
use crate::services::insights::InsightTally;

use super::{
    evaluate, protective_summary, response_summary, Adjustment, FactorRecommendation, FactorTable,
    Trigger,
};

const HUMAN_FACTOR_GATE: &[&str] = &[
    "personnel",
    "agression",
    "humain",
    "erreur",
    "social",
    "formation",
    "employé",
];

const ADJUSTMENTS: &[Adjustment] = &[
    Adjustment {
        trigger: Trigger::Weakness {
            category: Category::Access,
            threshold: 15,
        },
        gate: &[],
        delta: 1,
        label: "Contrôle d'accès défaillant",
    },
    Adjustment {
        trigger: Trigger::Weakness {
            category: Category::Perimeter,
            threshold: 12,
        },
        gate: &[],
        delta: 1,
        label: "Périmètre franchissable",
    },
    Adjustment {
        trigger: Trigger::Weakness {
            category: Category::Surveillance,
            threshold: 10,
        },
        gate: &[],
        delta: 1,
        label: "Absence de détection par la surveillance",
    },
    Adjustment {
        trigger: Trigger::Weakness {
            category: Category::Training,
            threshold: 12,
        },
        gate: HUMAN_FACTOR_GATE,
        delta: 1,
        label: "Personnel insuffisamment formé face au scénario",
    },
    Adjustment {
        trigger: Trigger::Weakness {
            category: Category::Procedures,
            threshold: 10,
        },
        gate: &[],
        delta: 1,
        label: "Procédures de sécurité lacunaires",
    },
    Adjustment {
        trigger: Trigger::Weakness {
            category: Category::Lighting,
            threshold: 16,
        },
        gate: &[],
        delta: 1,
        label: "Éclairage défaillant sur plusieurs zones",
    },
    Adjustment {
        trigger: Trigger::Weakness {
            category: Category::Infrastructure,
            threshold: 10,
        },
        gate: &[],
        delta: 1,
        label: "Infrastructure vulnérable",
    },
    Adjustment {
        trigger: Trigger::Strength {
            category: Category::Access,
            threshold: 12,
        },
        gate: &[],
        delta: -1,
        label: "Contrôle d'accès robuste",
    },
    Adjustment {
        trigger: Trigger::Strength {
            category: Category::Surveillance,
            threshold: 10,
        },
        gate: &[],
        delta: -1,
        label: "Surveillance opérationnelle",
    },
    Adjustment {
        trigger: Trigger::Strength {
            category: Category::Training,
            threshold: 12,
        },
        gate: &[],
        delta: -1,
        label: "Personnel formé aux consignes de sûreté",
    },
    Adjustment {
        trigger: Trigger::Strength {
            category: Category::Procedures,
            threshold: 10,
        },
        gate: &[],
        delta: -1,
        label: "Procédures formalisées et appliquées",
    },
    Adjustment {
        trigger: Trigger::Strength {
            category: Category::Infrastructure,
            threshold: 8,
        },
        gate: &[],
        delta: 0,
        label: "Infrastructure en bon état",
    },
];

pub const TABLE: FactorTable = FactorTable {
    default_score: 2,
    range: 1..=4,
    adjustments: ADJUSTMENTS,
    confidence: 0.90,
};

const PROTECTIVE: &[Category] = &[
    Category::Access,
    Category::Perimeter,
    Category::Surveillance,
    Category::Training,
    Category::Procedures,
    Category::Infrastructure,
];

/// Estimate the vulnerability factor.
pub fn recommend(context: &RiskContext, tally: &InsightTally) -> FactorRecommendation {
    evaluate(&TABLE, context, tally, explain)
}

fn explain(score: u8, tally: &InsightTally) -> String {
    let summary = response_summary(tally);
    match score {
        4.. => format!(
            "Vulnérabilité CRITIQUE : {summary} ; les mesures de protection sont largement défaillantes."
        ),
        3 => format!(
            "Vulnérabilité ÉLEVÉE : {summary} ; plusieurs mesures de protection présentent des faiblesses."
        ),
        2 => format!(
            "Vulnérabilité MODÉRÉE : {summary} ; les protections existantes sont partielles."
        ),
        _ => format!(
            "Vulnérabilité FAIBLE : {summary} ; {}.",
            protective_summary(tally, PROTECTIVE)
        ),
    }
}
