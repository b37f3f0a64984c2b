use crate::models::{DiagnosisResult, Symptom};
use crate::services::CatalogueEntry;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Upper bound on symptoms accepted in one request.
pub const MAX_SYMPTOMS: u64 = 64;

/// Body of `POST /api/diagnosis`.
///
/// `symptoms` is the canonical field; older clients send the same list as
/// `diagnosis_result`.
#[derive(Debug, Deserialize, Validate)]
pub struct DiagnosisRequest {
    #[serde(alias = "diagnosis_result")]
    #[validate(length(max = MAX_SYMPTOMS))]
    pub symptoms: Vec<Symptom>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DiagnosisResponse {
    #[serde(flatten)]
    pub diagnosis: DiagnosisResult,
    pub summary: String,
}

#[derive(Debug, Serialize)]
pub struct SymptomCatalogueResponse {
    pub symptoms: Vec<CatalogueEntry>,
}

/// Homepage form submission; checkbox fields repeat the `symptoms` key.
#[derive(Debug, Deserialize, Validate)]
pub struct ReportForm {
    #[serde(default)]
    #[validate(length(max = MAX_SYMPTOMS))]
    pub symptoms: Vec<Symptom>,
}
