pub mod diagnosis;
pub mod symptom;

pub use diagnosis::{DiagnosisResult, Severity};
pub use symptom::Symptom;
