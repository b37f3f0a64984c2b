pub mod diagnosis;
pub mod health;
pub mod pages;

pub use diagnosis::{diagnose, list_symptoms, method_not_allowed};
pub use health::{health_check, metrics, not_found};
pub use pages::{index, report};
