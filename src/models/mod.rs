//! Domain models and DTOs exchanged with the analytics services.

pub mod evaluation;
pub mod risk;
pub mod security_index;
