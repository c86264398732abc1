//! Factor analyzers deriving probability, vulnerability and impact
//! estimates from an insight tally.
//!
//! Each analyzer is a declarative [`FactorTable`]: a neutral default score
//! and an ordered list of [`Adjustment`]s. An adjustment fires on a
//! category signal, the overall security level, or the risk context alone,
//! optionally gated by keywords found in the risk target or scenario.
//! Every fired adjustment nudges the score (clamped to the factor range
//! after each step) and records one evidence point citing the answer that
//! triggered it.

pub mod impact;
pub mod probability;
pub mod vulnerability;

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::models::evaluation::{Category, SecurityLevel};
use crate::models::risk::RiskContext;
use crate::services::insights::{rule_for, InsightTally};

/// Estimated factor score with its supporting evidence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FactorRecommendation {
    pub score: u8,
    pub explanation: String,
    pub positive_points: Vec<String>,
    pub negative_points: Vec<String>,
    pub confidence: f64,
}

/// Condition under which an adjustment fires.
#[derive(Debug, Clone, Copy)]
pub enum Trigger {
    /// Category score at or below `-threshold`.
    Weakness { category: Category, threshold: i32 },
    /// Category score at or above `threshold`.
    Strength { category: Category, threshold: i32 },
    /// Overall security level equal to the band, with at least one yes/no answer.
    Level(SecurityLevel),
    /// Fires on the keyword gate alone.
    Context,
}

/// One ordered step of a factor table.
#[derive(Debug)]
pub struct Adjustment {
    pub trigger: Trigger,
    /// Keywords of which at least one must appear in target or scenario.
    /// Empty means ungated.
    pub gate: &'static [&'static str],
    pub delta: i8,
    pub label: &'static str,
}

/// Declarative definition of one factor analyzer.
#[derive(Debug)]
pub struct FactorTable {
    pub default_score: u8,
    pub range: RangeInclusive<u8>,
    pub adjustments: &'static [Adjustment],
    pub confidence: f64,
}

/// Which evidence list a fired adjustment feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Polarity {
    Favourable,
    Unfavourable,
}

impl Trigger {
    fn polarity(&self) -> Polarity {
        match self {
            Trigger::Strength { .. } | Trigger::Level(SecurityLevel::High) => Polarity::Favourable,
            Trigger::Weakness { .. } | Trigger::Level(_) | Trigger::Context => {
                Polarity::Unfavourable
            }
        }
    }

    fn fires(&self, tally: &InsightTally) -> bool {
        match *self {
            Trigger::Weakness {
                category,
                threshold,
            } => tally.score(category) <= -threshold,
            Trigger::Strength {
                category,
                threshold,
            } => tally.score(category) >= threshold,
            Trigger::Level(level) => {
                tally.answered_responses() > 0 && tally.security_level == level
            }
            Trigger::Context => true,
        }
    }
}

/// Run a factor table and build the recommendation.
///
/// `explain` receives the final score and the tally and returns the
/// explanation sentence.
pub(crate) fn evaluate(
    table: &FactorTable,
    context: &RiskContext,
    tally: &InsightTally,
    explain: fn(u8, &InsightTally) -> String,
) -> FactorRecommendation {
    let haystack = context.haystack();
    let min = i16::from(*table.range.start());
    let max = i16::from(*table.range.end());

    let mut score = i16::from(table.default_score);
    let mut positive_points = Vec::new();
    let mut negative_points = Vec::new();

    for adjustment in table.adjustments {
        let gated_in = adjustment.gate.is_empty()
            || adjustment.gate.iter().any(|keyword| haystack.contains(keyword));
        if !gated_in || !adjustment.trigger.fires(tally) {
            continue;
        }

        score = (score + i16::from(adjustment.delta)).clamp(min, max);

        let point = evidence_point(adjustment, context, tally);
        match adjustment.trigger.polarity() {
            Polarity::Favourable => positive_points.push(point),
            Polarity::Unfavourable => negative_points.push(point),
        }
    }

    if positive_points.is_empty() {
        positive_points.push(favourable_fallback(tally));
    }
    if negative_points.is_empty() {
        negative_points.push(unfavourable_fallback(tally));
    }

    // The clamp above keeps the score inside the u8 factor range.
    let score = u8::try_from(score).unwrap_or(table.default_score);

    FactorRecommendation {
        score,
        explanation: explain(score, tally),
        positive_points,
        negative_points,
        confidence: table.confidence,
    }
}

/// Point text for a fired adjustment, quoting the triggering answer when one exists.
fn evidence_point(adjustment: &Adjustment, context: &RiskContext, tally: &InsightTally) -> String {
    let label = adjustment.label;
    match adjustment.trigger {
        Trigger::Weakness { category, .. } => {
            let weak_value = rule_for(category).weak_signal.weak_value();
            category_point(label, category, weak_value, "défavorable", tally)
        }
        Trigger::Strength { category, .. } => {
            let strong_value = !rule_for(category).weak_signal.weak_value();
            category_point(label, category, strong_value, "favorable", tally)
        }
        Trigger::Level(_) => format!(
            "{label} : {} réponse(s) défavorable(s) sur {} analysée(s)",
            tally.negative_responses, tally.total_responses
        ),
        Trigger::Context => format!("{label} (cible : « {} »)", context.target),
    }
}

fn category_point(
    label: &str,
    category: Category,
    value: bool,
    qualifier: &str,
    tally: &InsightTally,
) -> String {
    match tally.first_answer(category, value) {
        Some(answer) => format!("{label} : {}", answer.citation()),
        None => format!(
            "{label} : {} réponse(s) {qualifier}(s) sur {} en {}",
            tally.count_answers(category, value),
            tally.answers(category).len(),
            category.label()
        ),
    }
}

fn favourable_fallback(tally: &InsightTally) -> String {
    match tally.positive_responses.first() {
        Some(answer) => format!(
            "Réponse favorable relevée : {} ({} réponse(s) favorable(s) au total)",
            answer.citation(),
            tally.positive_responses.len()
        ),
        None => "Aucun élément favorable disponible dans les évaluations analysées".to_string(),
    }
}

fn unfavourable_fallback(tally: &InsightTally) -> String {
    match tally.negative_responses_list.first() {
        Some(answer) => format!(
            "Réponse défavorable relevée : {} ({} réponse(s) défavorable(s) au total)",
            answer.citation(),
            tally.negative_responses_list.len()
        ),
        None => "Aucun élément défavorable disponible dans les évaluations analysées".to_string(),
    }
}

/// "N réponse(s) défavorable(s) sur M analysée(s)" or the no-data sentence.
pub(crate) fn response_summary(tally: &InsightTally) -> String {
    if tally.total_responses == 0 {
        "aucune réponse d'évaluation disponible, estimation par défaut".to_string()
    } else {
        format!(
            "{} réponse(s) défavorable(s) sur {} analysée(s)",
            tally.negative_responses, tally.total_responses
        )
    }
}

/// Comma-separated labels of the protective categories among `candidates`.
pub(crate) fn protective_summary(tally: &InsightTally, candidates: &[Category]) -> String {
    let protective = tally.protective_categories(candidates);
    if protective.is_empty() {
        "aucune mesure protectrice spécifique identifiée".to_string()
    } else {
        let labels: Vec<&str> = protective.iter().map(|c| c.label()).collect();
        format!("mesures protectrices : {}", labels.join(", "))
    }
}
