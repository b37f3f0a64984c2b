use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Low,
    Medium,
    High,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        };
        f.write_str(label)
    }
}

/// Outcome of running a symptom list through the diagnosis table.
///
/// Built fresh for every request and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisResult {
    pub issues: Vec<String>,
    pub severity: Severity,
    pub estimated_cost: u64,
    pub recommendations: Vec<String>,
}

#[cfg(test)]
impl DiagnosisResult {
    pub fn empty() -> Self {
        Self {
            issues: Vec::new(),
            severity: Severity::default(),
            estimated_cost: 0,
            recommendations: Vec::new(),
        }
    }
}
