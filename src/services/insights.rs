//! Evaluation response insight extraction.
//!
//! Classifies every questionnaire answer into zero or more semantic
//! categories using a declarative keyword table, then tallies a signed
//! score per category. Yes/no answers carry the signal: for most
//! categories "no" is a weakness and "yes" a strength, while for incident
//! history a "yes" (an incident happened) is itself the weakness.
//!
//! This module contains no I/O; the caller fetches the evaluations.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::evaluation::{Category, Evaluation, EvaluationAnswer, SecurityLevel};

/// Which yes/no answer marks a weakness for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeakSignal {
    AnsweredNo,
    AnsweredYes,
}

impl WeakSignal {
    /// The boolean value that marks a weakness.
    pub fn weak_value(self) -> bool {
        matches!(self, Self::AnsweredYes)
    }
}

/// Matching and scoring rule for one category.
#[derive(Debug)]
pub struct CategoryRule {
    pub category: Category,
    /// Lower-case regex alternatives, matched as whole words against the
    /// question text.
    pub keywords: &'static [&'static str],
    pub weakness_weight: i32,
    /// `None` when a favourable answer carries no signal.
    pub strength_weight: Option<i32>,
    pub weak_signal: WeakSignal,
    pub weakness: &'static str,
    pub strength: &'static str,
}

/// One word-bounded pattern per rule, aligned with [`CATEGORY_RULES`].
static RULE_PATTERNS: LazyLock<Vec<Option<Regex>>> = LazyLock::new(|| {
    CATEGORY_RULES
        .iter()
        .map(|rule| {
            let pattern = format!(r"\b(?:{})\b", rule.keywords.join("|"));
            match Regex::new(&pattern) {
                Ok(re) => Some(re),
                Err(e) => {
                    tracing::warn!(
                        category = ?rule.category,
                        error = %e,
                        "Invalid keyword pattern"
                    );
                    None
                }
            }
        })
        .collect()
});

impl CategoryRule {
    pub fn matches(&self, lowered_question: &str) -> bool {
        Category::ALL
            .iter()
            .position(|category| *category == self.category)
            .and_then(|index| RULE_PATTERNS.get(index)?.as_ref())
            .is_some_and(|re| re.is_match(lowered_question))
    }
}

pub const CATEGORY_RULES: [CategoryRule; 8] = [
    CategoryRule {
        category: Category::Access,
        keywords: &["accès", "badges?"],
        weakness_weight: 15,
        strength_weight: Some(12),
        weak_signal: WeakSignal::AnsweredNo,
        weakness: "Contrôle d'accès insuffisant",
        strength: "Contrôle d'accès en place",
    },
    CategoryRule {
        category: Category::Perimeter,
        keywords: &["clôtures?", "périmètres?", "barrières?", "portails?"],
        weakness_weight: 12,
        strength_weight: Some(10),
        weak_signal: WeakSignal::AnsweredNo,
        weakness: "Protection périmétrique défaillante",
        strength: "Périmètre protégé",
    },
    CategoryRule {
        category: Category::Surveillance,
        keywords: &[r"vidéo\w*", "caméras?", "surveillance", r"gardien\w*"],
        weakness_weight: 10,
        strength_weight: Some(10),
        weak_signal: WeakSignal::AnsweredNo,
        weakness: "Surveillance insuffisante",
        strength: "Dispositif de surveillance opérationnel",
    },
    CategoryRule {
        category: Category::Lighting,
        keywords: &["éclairages?", "lumières?", "luminaires?"],
        weakness_weight: 8,
        strength_weight: Some(8),
        weak_signal: WeakSignal::AnsweredNo,
        weakness: "Éclairage insuffisant",
        strength: "Éclairage adapté",
    },
    CategoryRule {
        category: Category::Training,
        keywords: &["formations?", "sensibilisations?", "exercices?"],
        weakness_weight: 12,
        strength_weight: Some(12),
        weak_signal: WeakSignal::AnsweredNo,
        weakness: "Personnel insuffisamment formé",
        strength: "Personnel formé et sensibilisé",
    },
    CategoryRule {
        category: Category::Procedures,
        keywords: &["procédures?", "protocoles?", "consignes?", "plans? d'urgence"],
        weakness_weight: 10,
        strength_weight: Some(10),
        weak_signal: WeakSignal::AnsweredNo,
        weakness: "Procédures de sécurité absentes ou incomplètes",
        strength: "Procédures de sécurité formalisées",
    },
    CategoryRule {
        category: Category::Incidents,
        keywords: &["incidents?", "intrusions?", "vols?", "agressions?"],
        weakness_weight: 18,
        strength_weight: None,
        weak_signal: WeakSignal::AnsweredYes,
        weakness: "Incident de sécurité déjà survenu",
        strength: "",
    },
    CategoryRule {
        category: Category::Infrastructure,
        keywords: &["bâtiments?", "infrastructures?", "serrures?", "portes?"],
        weakness_weight: 10,
        strength_weight: Some(8),
        weak_signal: WeakSignal::AnsweredNo,
        weakness: "Infrastructure vulnérable",
        strength: "Infrastructure robuste",
    },
];

/// Look up the rule for a category.
pub fn rule_for(category: Category) -> &'static CategoryRule {
    let index = Category::ALL
        .iter()
        .position(|c| *c == category)
        .unwrap_or_default();
    &CATEGORY_RULES[index]
}

/// Categories whose keywords appear in the question text.
pub fn classify(question_text: &str) -> Vec<Category> {
    let lowered = question_text.to_lowercase();
    CATEGORY_RULES
        .iter()
        .filter(|rule| rule.matches(&lowered))
        .map(|rule| rule.category)
        .collect()
}

/// Answers and signed score accumulated for one category.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CategoryInsight {
    pub answers: Vec<EvaluationAnswer>,
    pub score: i32,
}

static EMPTY_INSIGHT: CategoryInsight = CategoryInsight {
    answers: Vec::new(),
    score: 0,
};

/// Aggregated signal derived from a set of evaluations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InsightTally {
    pub total_responses: usize,
    pub negative_responses: usize,
    pub categories: BTreeMap<Category, CategoryInsight>,
    pub weaknesses: Vec<String>,
    pub strengths: Vec<String>,
    pub security_level: SecurityLevel,
    pub positive_responses: Vec<EvaluationAnswer>,
    pub negative_responses_list: Vec<EvaluationAnswer>,
}

impl InsightTally {
    pub fn category(&self, category: Category) -> &CategoryInsight {
        self.categories.get(&category).unwrap_or(&EMPTY_INSIGHT)
    }

    pub fn score(&self, category: Category) -> i32 {
        self.category(category).score
    }

    pub fn answers(&self, category: Category) -> &[EvaluationAnswer] {
        &self.category(category).answers
    }

    /// Number of answers carrying a yes/no value.
    pub fn answered_responses(&self) -> usize {
        self.positive_responses.len() + self.negative_responses
    }

    /// First answer of a category with the given yes/no value.
    pub fn first_answer(&self, category: Category, value: bool) -> Option<&EvaluationAnswer> {
        self.answers(category)
            .iter()
            .find(|answer| answer.boolean_value == Some(value))
    }

    /// Count of answers of a category with the given yes/no value.
    pub fn count_answers(&self, category: Category, value: bool) -> usize {
        self.answers(category)
            .iter()
            .filter(|answer| answer.boolean_value == Some(value))
            .count()
    }

    /// Categories among `candidates` whose score reaches their strength weight.
    pub fn protective_categories(&self, candidates: &[Category]) -> Vec<Category> {
        candidates
            .iter()
            .copied()
            .filter(|category| {
                rule_for(*category)
                    .strength_weight
                    .is_some_and(|weight| self.score(*category) >= weight)
            })
            .collect()
    }
}

/// Build one tally across all supplied evaluations.
pub fn extract(evaluations: &[Evaluation]) -> InsightTally {
    let mut categories: BTreeMap<Category, CategoryInsight> = Category::ALL
        .iter()
        .map(|category| (*category, CategoryInsight::default()))
        .collect();
    let mut total_responses = 0;
    let mut negative_responses = 0;
    let mut weaknesses = Vec::new();
    let mut strengths = Vec::new();
    let mut positive_responses = Vec::new();
    let mut negative_responses_list = Vec::new();

    for answer in evaluations.iter().flat_map(|evaluation| &evaluation.responses) {
        total_responses += 1;

        match answer.boolean_value {
            Some(false) => {
                negative_responses += 1;
                negative_responses_list.push(answer.clone());
            }
            Some(true) => positive_responses.push(answer.clone()),
            None => {}
        }

        let lowered = answer.question_text.to_lowercase();
        for rule in CATEGORY_RULES.iter().filter(|rule| rule.matches(&lowered)) {
            let insight = categories.entry(rule.category).or_default();
            insight.answers.push(answer.clone());

            let Some(value) = answer.boolean_value else {
                continue;
            };
            if value == rule.weak_signal.weak_value() {
                insight.score -= rule.weakness_weight;
                weaknesses.push(format!("{} ({})", rule.weakness, answer.citation()));
            } else if let Some(weight) = rule.strength_weight {
                insight.score += weight;
                strengths.push(format!("{} ({})", rule.strength, answer.citation()));
            }
        }
    }

    let security_level = SecurityLevel::from_counts(negative_responses, total_responses);

    tracing::debug!(
        evaluations = evaluations.len(),
        total_responses,
        negative_responses,
        ?security_level,
        "Extracted evaluation insights"
    );

    InsightTally {
        total_responses,
        negative_responses,
        categories,
        weaknesses,
        strengths,
        security_level,
        positive_responses,
        negative_responses_list,
    }
}
