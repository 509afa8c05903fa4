//! Route handlers.
//!
//! Each handler parses its path or query input, runs one analytics query and returns the view
//! as JSON. Failures become [`ApiError`] responses.

use crate::error::ApiError;
use crate::AppState;
use api_shared::{
    AppointmentsByDateRes, AverageActualRes, DayPrescription, DoctorAppointments,
    DoctorListEntry, Episode, ErrorRes, HealthRes, HealthService, HealthTrendRes, MonthlyRisk,
    MonthlyVitals, PatientDashboardRes, PatientListEntry, PrescriptionTrackingRes,
    RecommendationsRes, RiskWeightageRes, TotalCountsRes,
};
use axum::extract::{Path, Query, State};
use axum::response::Json;
use serde::Deserialize;
use std::collections::BTreeMap;
use vitals_types::{PatientId, ReportDate};

type ApiResult<T> = Result<Json<T>, ApiError>;

fn patient_id(raw: &str) -> Result<PatientId, ApiError> {
    PatientId::parse(raw).map_err(|e| ApiError::BadRequest(e.to_string()))
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct DateQuery {
    /// Calendar day, `YYYY-MM-DD`.
    pub date: Option<String>,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Liveness probe.
#[axum::debug_handler]
pub async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/api/patient/total_counts",
    responses(
        (status = 200, description = "Population headline counts", body = TotalCountsRes),
        (status = 500, description = "Record store failure", body = ErrorRes)
    )
)]
/// Total patients and readings, patients registered this year, and the risk band breakdown
/// of each patient's latest reading.
#[axum::debug_handler]
pub async fn total_counts(State(state): State<AppState>) -> ApiResult<TotalCountsRes> {
    Ok(Json(state.analytics.total_counts().await?))
}

#[utoipa::path(
    get,
    path = "/api/patient/patients_list",
    responses(
        (status = 200, description = "One row per patient", body = [PatientListEntry]),
        (status = 500, description = "Record store failure", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn patients_list(State(state): State<AppState>) -> ApiResult<Vec<PatientListEntry>> {
    Ok(Json(state.analytics.patients_list().await?))
}

#[utoipa::path(
    get,
    path = "/api/doctors/doctors_list",
    responses(
        (status = 200, description = "Every doctor", body = [DoctorListEntry]),
        (status = 500, description = "Record store failure", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn doctors_list(State(state): State<AppState>) -> ApiResult<Vec<DoctorListEntry>> {
    Ok(Json(state.analytics.doctors_list().await?))
}

#[utoipa::path(
    get,
    path = "/api/patient/appointments_by_date",
    params(DateQuery),
    responses(
        (status = 200, description = "Appointments per doctor, or a message when there are none", body = AppointmentsByDateRes),
        (status = 400, description = "Missing or malformed date", body = ErrorRes),
        (status = 500, description = "Record store failure", body = ErrorRes)
    )
)]
/// Appointment counts per doctor for one day.
///
/// # Errors
/// Returns `400 Bad Request` if `date` is missing or not `YYYY-MM-DD`.
#[axum::debug_handler]
pub async fn appointments_by_date(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> ApiResult<AppointmentsByDateRes> {
    let date = ReportDate::parse(query.date.unwrap_or_default())
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;
    Ok(Json(state.analytics.appointments_by_date(date).await?))
}

#[utoipa::path(
    get,
    path = "/api/patient/monthly_reports",
    responses(
        (status = 200, description = "Appointments per doctor this month, busiest first", body = [DoctorAppointments]),
        (status = 500, description = "Record store failure", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn monthly_reports(State(state): State<AppState>) -> ApiResult<Vec<DoctorAppointments>> {
    Ok(Json(state.analytics.monthly_reports().await?))
}

#[utoipa::path(
    get,
    path = "/api/patient/dashboard/{patientid}",
    params(("patientid" = String, Path, description = "Numeric patient id")),
    responses(
        (status = 200, description = "Latest vitals by time", body = PatientDashboardRes),
        (status = 400, description = "Non-numeric patient id", body = ErrorRes),
        (status = 404, description = "Unknown patient, no readings or no valid timestamps", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn patient_dashboard(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> ApiResult<PatientDashboardRes> {
    let id = patient_id(&raw)?;
    Ok(Json(state.analytics.patient_dashboard(id).await?))
}

#[utoipa::path(
    get,
    path = "/api/patient/patient_dashboard_risk/{patientid}",
    params(("patientid" = String, Path, description = "Numeric patient id")),
    responses(
        (status = 200, description = "Average risk per calendar month", body = [MonthlyRisk]),
        (status = 400, description = "Non-numeric patient id", body = ErrorRes),
        (status = 404, description = "Unknown patient", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn dashboard_risk(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> ApiResult<Vec<MonthlyRisk>> {
    let id = patient_id(&raw)?;
    Ok(Json(state.analytics.dashboard_risk(id).await?))
}

#[utoipa::path(
    get,
    path = "/api/patient/patient_health_trend/{patientid}",
    params(("patientid" = String, Path, description = "Numeric patient id")),
    responses(
        (status = 200, description = "Average vitals keyed by month name", body = BTreeMap<String, MonthlyVitals>),
        (status = 400, description = "Non-numeric patient id", body = ErrorRes),
        (status = 404, description = "Unknown patient", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn health_trend(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> ApiResult<HealthTrendRes> {
    let id = patient_id(&raw)?;
    Ok(Json(state.analytics.health_trend(id).await?))
}

#[utoipa::path(
    get,
    path = "/api/patient/average_actual/{patientid}",
    params(("patientid" = String, Path, description = "Numeric patient id")),
    responses(
        (status = 200, description = "Latest vitals next to healthy reference values", body = AverageActualRes),
        (status = 400, description = "Non-numeric patient id", body = ErrorRes),
        (status = 404, description = "Unknown patient or no readings", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn average_actual(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> ApiResult<AverageActualRes> {
    let id = patient_id(&raw)?;
    Ok(Json(state.analytics.average_actual(id).await?))
}

#[utoipa::path(
    get,
    path = "/api/patient/risk_scores_weightage/{patientid}",
    params(("patientid" = String, Path, description = "Numeric patient id")),
    responses(
        (status = 200, description = "Deviation from healthy range per vital", body = RiskWeightageRes),
        (status = 400, description = "Non-numeric patient id", body = ErrorRes),
        (status = 404, description = "Unknown patient, no readings or no valid timestamps", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn risk_weightage(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> ApiResult<RiskWeightageRes> {
    let id = patient_id(&raw)?;
    Ok(Json(state.analytics.risk_weightage(id).await?))
}

#[utoipa::path(
    get,
    path = "/api/patient/recommendations/{patientid}",
    params(("patientid" = String, Path, description = "Numeric patient id")),
    responses(
        (status = 200, description = "Diet, exercise and routine plans", body = RecommendationsRes),
        (status = 400, description = "Non-numeric patient id", body = ErrorRes),
        (status = 404, description = "Unknown patient or no readings", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn recommendations(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> ApiResult<RecommendationsRes> {
    let id = patient_id(&raw)?;
    Ok(Json(state.analytics.recommendations(id).await?))
}

#[utoipa::path(
    get,
    path = "/api/patient/episodes/{patientid}",
    params(("patientid" = String, Path, description = "Numeric patient id")),
    responses(
        (status = 200, description = "Every reading, newest first", body = [Episode]),
        (status = 400, description = "Non-numeric patient id", body = ErrorRes),
        (status = 404, description = "Unknown patient or no readings", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn episodes(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> ApiResult<Vec<Episode>> {
    let id = patient_id(&raw)?;
    Ok(Json(state.analytics.episodes(id).await?))
}

#[utoipa::path(
    get,
    path = "/api/patient/{patientid}/prescription_tracking",
    params(("patientid" = String, Path, description = "Numeric patient id")),
    responses(
        (status = 200, description = "Per reading, per day plans", body = BTreeMap<String, BTreeMap<String, DayPrescription>>),
        (status = 400, description = "Non-numeric patient id", body = ErrorRes),
        (status = 404, description = "Unknown patient or no readings", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn prescription_tracking(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> ApiResult<PrescriptionTrackingRes> {
    let id = patient_id(&raw)?;
    Ok(Json(state.analytics.prescription_tracking(id).await?))
}
