pub mod diagnosis;
pub mod metrics;

pub use diagnosis::{
    format_summary, run_diagnosis, CatalogueEntry, DiagnosisEngine, DiagnosisOutcome,
    DiagnosisRule, DiagnosisTable,
};
pub use self::metrics::{get_metrics, init_metrics, record_diagnosis};
