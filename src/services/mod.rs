//! Business logic services.

pub mod analysis_provider;
pub mod assessment;
pub mod factors;
pub mod insights;
pub mod questionnaire;
pub mod recommendation;
pub mod risk_score;
pub mod security_index;
