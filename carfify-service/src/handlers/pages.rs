use crate::dtos::ReportForm;
use crate::models::DiagnosisResult;
use crate::services::{format_summary, run_diagnosis, CatalogueEntry};
use crate::startup::AppState;
use askama::Template;
use axum::{extract::State, response::IntoResponse};
use axum_extra::extract::{Form, FormRejection};
use service_core::error::AppError;
use validator::Validate;

pub const APP_NAME: &str = "Carfify";

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub app_name: &'static str,
    pub version: &'static str,
    pub frontend_origin: String,
    pub symptoms: Vec<CatalogueEntry>,
}

pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    IndexTemplate {
        app_name: APP_NAME,
        version: env!("CARGO_PKG_VERSION"),
        frontend_origin: state.config.frontend_origin.clone(),
        symptoms: state.engine.catalogue(),
    }
}

#[derive(Template)]
#[template(path = "report.html")]
pub struct ReportTemplate {
    pub app_name: &'static str,
    pub diagnosis: DiagnosisResult,
    pub summary: String,
}

pub async fn report(
    State(state): State<AppState>,
    form: Result<Form<ReportForm>, FormRejection>,
) -> Result<ReportTemplate, AppError> {
    let Form(form) = form
        .map_err(|e| AppError::BadRequest(anyhow::anyhow!("Invalid form submission: {}", e)))?;
    form.validate()?;

    let diagnosis = run_diagnosis(&state.engine, &form.symptoms).result;

    let summary = format_summary(&diagnosis);

    Ok(ReportTemplate {
        app_name: APP_NAME,
        diagnosis,
        summary,
    })
}
