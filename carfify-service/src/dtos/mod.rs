pub mod diagnosis;

pub use diagnosis::{
    DiagnosisRequest, DiagnosisResponse, ReportForm, SymptomCatalogueResponse, MAX_SYMPTOMS,
};
