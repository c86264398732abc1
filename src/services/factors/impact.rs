//! Impact analyzer (1–5): how severe the consequences would be.

use crate::models::evaluation::Category;
use crate::models::risk::RiskContext;
use crate::services::insights::InsightTally;

use super::{
    evaluate, protective_summary, response_summary, Adjustment, FactorRecommendation, FactorTable,
    Trigger,
};

const ADJUSTMENTS: &[Adjustment] = &[
    Adjustment {
        trigger: Trigger::Context,
        gate: &[
            "données",
            "information",
            "serveur",
            "informatique",
            "confidentiel",
        ],
        delta: 1,
        label: "Actifs informationnels sensibles exposés",
    },
    Adjustment {
        trigger: Trigger::Context,
        gate: &["personnel", "agression", "employé", "santé", "blessure"],
        delta: 1,
        label: "Atteinte possible à l'intégrité des personnes",
    },
    Adjustment {
        trigger: Trigger::Weakness {
            category: Category::Incidents,
            threshold: 18,
        },
        gate: &[],
        delta: 1,
        label: "Des incidents passés ont déjà eu des conséquences",
    },
    Adjustment {
        trigger: Trigger::Weakness {
            category: Category::Procedures,
            threshold: 10,
        },
        gate: &[],
        delta: 1,
        label: "Absence de procédure de gestion de crise",
    },
    Adjustment {
        trigger: Trigger::Strength {
            category: Category::Procedures,
            threshold: 10,
        },
        gate: &[],
        delta: -1,
        label: "Procédures de réponse limitant les conséquences",
    },
    Adjustment {
        trigger: Trigger::Strength {
            category: Category::Training,
            threshold: 12,
        },
        gate: &[],
        delta: -1,
        label: "Personnel formé à réagir",
    },
    Adjustment {
        trigger: Trigger::Strength {
            category: Category::Surveillance,
            threshold: 10,
        },
        gate: &["intrusion", "vol", "agression", "incendie"],
        delta: -1,
        label: "Détection rapide réduisant l'ampleur des dommages",
    },
];

pub const TABLE: FactorTable = FactorTable {
    default_score: 3,
    range: 1..=5,
    adjustments: ADJUSTMENTS,
    confidence: 0.87,
};

const PROTECTIVE: &[Category] = &[
    Category::Procedures,
    Category::Training,
    Category::Surveillance,
];

/// Estimate the impact factor.
pub fn recommend(context: &RiskContext, tally: &InsightTally) -> FactorRecommendation {
    evaluate(&TABLE, context, tally, explain)
}

fn explain(score: u8, tally: &InsightTally) -> String {
    let summary = response_summary(tally);
    let band = match score {
        5.. => "CRITIQUE",
        4 => "MAJEUR",
        3 => "SIGNIFICATIF",
        2 => "MODÉRÉ",
        _ => "MINEUR",
    };

    if score >= 2 {
        format!("Impact {band} : {summary} ; conséquences estimées selon la nature de la cible.")
    } else {
        format!(
            "Impact {band} : {summary} ; {}.",
            protective_summary(tally, PROTECTIVE)
        )
    }
}
