//! Risk sheet metadata supplied by the risk store.

use serde::{Deserialize, Serialize};

/// Target and threat scenario of the risk being assessed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RiskContext {
    pub target: String,
    pub scenario: String,
    #[serde(default)]
    pub category: Option<String>,
}

impl RiskContext {
    pub fn new(target: impl Into<String>, scenario: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            scenario: scenario.into(),
            category: None,
        }
    }

    /// Lower-cased target and scenario, the haystack for keyword gates.
    pub fn haystack(&self) -> String {
        format!("{} {}", self.target, self.scenario).to_lowercase()
    }

    /// Whether the target or scenario mentions any of `keywords`.
    pub fn mentions(&self, keywords: &[&str]) -> bool {
        let haystack = self.haystack();
        keywords.iter().any(|keyword| haystack.contains(keyword))
    }

    /// Whether the target alone mentions any of `keywords`.
    pub fn target_mentions(&self, keywords: &[&str]) -> bool {
        let target = self.target.to_lowercase();
        keywords.iter().any(|keyword| target.contains(keyword))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mentions_is_case_insensitive() {
        let context = RiskContext::new("Salle SERVEUR", "Intrusion nocturne");
        assert!(context.mentions(&["serveur"]));
        assert!(context.mentions(&["intrusion"]));
        assert!(!context.mentions(&["incendie"]));
    }

    #[test]
    fn target_mentions_ignores_scenario() {
        let context = RiskContext::new("Entrepôt", "Vol de données");
        assert!(!context.target_mentions(&["données"]));
        assert!(context.mentions(&["données"]));
    }
}
