use crate::dtos::{DiagnosisRequest, DiagnosisResponse, SymptomCatalogueResponse};
use crate::services::{format_summary, run_diagnosis};
use crate::startup::AppState;
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    Extension, Json,
};
use service_core::error::AppError;
use service_core::middleware::tracing::RequestId;
use validator::Validate;

/// `POST /api/diagnosis`
///
/// The body is decoded by hand so that empty and malformed payloads both end
/// up as a 400 with the service's JSON error shape.
pub async fn diagnose(
    State(state): State<AppState>,
    request_id: Option<Extension<RequestId>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<DiagnosisResponse>, AppError> {
    let request_id = request_id.map(|Extension(id)| id.0).unwrap_or_default();
    let body = body.map_err(body_rejection)?;

    if body.iter().all(u8::is_ascii_whitespace) {
        tracing::warn!(request_id = %request_id, "Rejected diagnosis request with empty body");
        return Err(AppError::BadRequest(anyhow::anyhow!("Request body is empty")));
    }

    let request: DiagnosisRequest = serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!(request_id = %request_id, error = %e, "Rejected malformed diagnosis request");
        AppError::BadRequest(anyhow::anyhow!("Invalid request body: {}", e))
    })?;
    request.validate()?;

    let outcome = run_diagnosis(&state.engine, &request.symptoms);
    let diagnosis = outcome.result;

    tracing::info!(
        request_id = %request_id,
        symptoms = request.symptoms.len(),
        unknown_symptoms = outcome.unknown_symptoms,
        issues = diagnosis.issues.len(),
        estimated_cost = diagnosis.estimated_cost,
        "Diagnosis computed"
    );

    let summary = format_summary(&diagnosis);

    Ok(Json(DiagnosisResponse { diagnosis, summary }))
}

fn body_rejection(rejection: BytesRejection) -> AppError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(rejection.body_text())
    } else {
        AppError::BadRequest(anyhow::anyhow!(
            "Failed to read request body: {}",
            rejection.body_text()
        ))
    }
}

/// Any method other than POST (and OPTIONS, answered by the CORS layer).
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed { allow: "POST" }
}

/// `GET /api/symptoms`
pub async fn list_symptoms(State(state): State<AppState>) -> Json<SymptomCatalogueResponse> {
    Json(SymptomCatalogueResponse {
        symptoms: state.engine.catalogue(),
    })
}
