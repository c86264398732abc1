//! Evaluation questionnaire answers and the semantic categories they feed.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A completed evaluation as supplied by the evaluation store.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Evaluation {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub responses: Vec<EvaluationAnswer>,
}

/// One question/answer record of an evaluation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EvaluationAnswer {
    pub question_text: String,
    #[serde(default)]
    pub boolean_value: Option<bool>,
    #[serde(default)]
    pub text_value: Option<String>,
    #[serde(default)]
    pub numeric_value: Option<f64>,
}

impl EvaluationAnswer {
    /// Yes/no answer, the only kind that carries scoring signal.
    pub fn boolean(question_text: impl Into<String>, value: bool) -> Self {
        Self {
            question_text: question_text.into(),
            boolean_value: Some(value),
            ..Self::default()
        }
    }

    /// Evidence citation: the quoted question and its yes/no value.
    pub fn citation(&self) -> String {
        let value = match self.boolean_value {
            Some(true) => "Oui",
            Some(false) => "Non",
            None => "sans réponse",
        };
        format!("« {} » → {}", self.question_text, value)
    }
}

/// Fixed semantic buckets used to classify questionnaire answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Access,
    Perimeter,
    Surveillance,
    Lighting,
    Training,
    Procedures,
    Incidents,
    Infrastructure,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Access,
        Category::Perimeter,
        Category::Surveillance,
        Category::Lighting,
        Category::Training,
        Category::Procedures,
        Category::Incidents,
        Category::Infrastructure,
    ];

    /// Display label used in generated French narratives.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Access => "contrôle d'accès",
            Self::Perimeter => "protection périmétrique",
            Self::Surveillance => "surveillance",
            Self::Lighting => "éclairage",
            Self::Training => "formation du personnel",
            Self::Procedures => "procédures de sécurité",
            Self::Incidents => "historique des incidents",
            Self::Infrastructure => "infrastructure",
        }
    }
}

/// Ternary banding of the share of unfavourable answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecurityLevel {
    Low,
    Medium,
    High,
}

impl SecurityLevel {
    /// Band the negative/total ratio: >0.6 low, >0.3 medium, else high.
    pub fn from_counts(negative: usize, total: usize) -> Self {
        let ratio = if total == 0 {
            0.0
        } else {
            negative as f64 / total as f64
        };

        if ratio > 0.6 {
            Self::Low
        } else if ratio > 0.3 {
            Self::Medium
        } else {
            Self::High
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "faible",
            Self::Medium => "moyen",
            Self::High => "élevé",
        }
    }
}
