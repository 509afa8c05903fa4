//! # API REST
//!
//! REST API for vitals analytics.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS, error status codes)
//!
//! Uses `api-shared` for response views and `vitals-core` for the queries themselves.

#![warn(rust_2018_idioms)]

pub mod error;
pub mod handlers;

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use vitals_core::AnalyticsService;

pub use error::ApiError;

/// Application state shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub analytics: AnalyticsService,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        handlers::total_counts,
        handlers::patients_list,
        handlers::doctors_list,
        handlers::appointments_by_date,
        handlers::monthly_reports,
        handlers::patient_dashboard,
        handlers::dashboard_risk,
        handlers::health_trend,
        handlers::average_actual,
        handlers::risk_weightage,
        handlers::recommendations,
        handlers::episodes,
        handlers::prescription_tracking,
    ),
    components(schemas(
        api_shared::HealthRes,
        api_shared::ErrorRes,
        api_shared::RiskSummary,
        api_shared::TotalCountsRes,
        api_shared::PatientListEntry,
        api_shared::DoctorListEntry,
        api_shared::DoctorAppointments,
        api_shared::InfoMessage,
        api_shared::AppointmentsByDateRes,
        api_shared::PatientDashboardRes,
        api_shared::MonthlyRisk,
        api_shared::MonthlyVitals,
        api_shared::ActualVitals,
        api_shared::HealthyVitals,
        api_shared::AverageActualRes,
        api_shared::RiskPercent,
        api_shared::RiskWeightageRes,
        api_shared::RecommendationsRes,
        api_shared::Episode,
        api_shared::DayPrescription,
    ))
)]
pub struct ApiDoc;

/// Build the full application router over `analytics`.
pub fn router(analytics: AnalyticsService) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/patient/total_counts", get(handlers::total_counts))
        .route("/api/patient/patients_list", get(handlers::patients_list))
        .route("/api/doctors/doctors_list", get(handlers::doctors_list))
        .route(
            "/api/patient/appointments_by_date",
            get(handlers::appointments_by_date),
        )
        .route("/api/patient/monthly_reports", get(handlers::monthly_reports))
        .route(
            "/api/patient/dashboard/:patientid",
            get(handlers::patient_dashboard),
        )
        .route(
            "/api/patient/patient_dashboard_risk/:patientid",
            get(handlers::dashboard_risk),
        )
        .route(
            "/api/patient/patient_health_trend/:patientid",
            get(handlers::health_trend),
        )
        .route(
            "/api/patient/average_actual/:patientid",
            get(handlers::average_actual),
        )
        .route(
            "/api/patient/risk_scores_weightage/:patientid",
            get(handlers::risk_weightage),
        )
        .route(
            "/api/patient/recommendations/:patientid",
            get(handlers::recommendations),
        )
        .route("/api/patient/episodes/:patientid", get(handlers::episodes))
        .route(
            "/api/patient/:patientid/prescription_tracking",
            get(handlers::prescription_tracking),
        )
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(AppState { analytics })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::{TimeZone, Utc};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;
    use vitals_core::repositories::memory::MemoryStore;

    const PER_PATIENT: [&str; 8] = [
        "/api/patient/dashboard/{}",
        "/api/patient/patient_dashboard_risk/{}",
        "/api/patient/patient_health_trend/{}",
        "/api/patient/average_actual/{}",
        "/api/patient/risk_scores_weightage/{}",
        "/api/patient/recommendations/{}",
        "/api/patient/episodes/{}",
        "/api/patient/{}/prescription_tracking",
    ];

    fn fixture() -> Value {
        json!({
            "patients": [
                {
                    "patientid": 11, "name": "Ravi", "gender": "M",
                    "registered_at": "2024-02-10T09:00:00Z",
                    "medications": {
                        "r1": {"time": "2024-01-05T10:00:00Z", "riskrate": 80, "heartrate": "50 bpm",
                                "SpO2": "93%", "bp": "140/90", "Stress": 6,
                                "Diet_PLAN": {"DAY1": "soup"},
                                "meeting_details": {"doctor_id": 1, "meeting_datetime": "2024-05-02T10:00:00"}},
                        "r2": {"time": "2024-02-01T10:00:00Z", "riskrate": 20, "heartrate": "72 bpm",
                                "SpO2": "96%", "bp": "118/79", "Stress": 2, "type": "routine",
                                "Diet_PLAN": {"DAY1": "salad"},
                                "Exercise_PLAN": {"DAY2": "swim"},
                                "meeting_details": {"doctor_id": 2, "meeting_datetime": "2024-05-02T15:30:00"}}
                    }
                },
                {"patientid": 12, "name": "Empty", "gender": "F"}
            ],
            "doctors": [
                {"doctor_id": 1, "name": "Dr Zed", "specialisation": "Cardiology"},
                {"doctor_id": 2, "name": "Dr Amin", "specialisation": "Neurology"}
            ]
        })
    }

    fn app() -> Router {
        let store = MemoryStore::from_json_str(&fixture().to_string()).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 5, 20, 12, 0, 0).unwrap();
        let analytics = AnalyticsService::with_clock(Arc::new(store), Arc::new(move || now));
        router(analytics)
    }

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = app().oneshot(req).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let value = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn health_is_alive() {
        let (status, body) = get_json("/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
    }

    #[tokio::test]
    async fn total_counts_summarises_population() {
        let (status, body) = get_json("/api/patient/total_counts").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_patients"], 2);
        assert_eq!(body["total_appointments"], 2);
        assert_eq!(body["new_patients"], 1);
        assert_eq!(
            body["risk_summary"],
            json!({"low_risk": 1, "mid_risk": 0, "high_risk": 0})
        );
    }

    #[tokio::test]
    async fn lists_patients_and_doctors() {
        let (status, body) = get_json("/api/patient/patients_list").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["si_no"], 1);
        assert_eq!(body[0]["patient_id"], "11");
        assert_eq!(body[0]["risk_score"], 20);
        assert_eq!(body[1]["last_updated"], Value::Null);

        let (status, body) = get_json("/api/doctors/doctors_list").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([
                {"name": "Dr Zed", "specialisation": "Cardiology"},
                {"name": "Dr Amin", "specialisation": "Neurology"}
            ])
        );
    }

    #[tokio::test]
    async fn appointments_by_date_sorts_by_doctor_name() {
        let (status, body) = get_json("/api/patient/appointments_by_date?date=2024-05-02").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["doctor_name"], "Dr Amin");
        assert_eq!(body[1]["doctor_name"], "Dr Zed");
        assert_eq!(body[1]["appointment_count"], 1);
    }

    #[tokio::test]
    async fn appointments_by_date_without_matches_returns_message() {
        let (status, body) = get_json("/api/patient/appointments_by_date?date=2024-05-03").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"message": "No doctor appointments found for this date."})
        );
    }

    #[tokio::test]
    async fn appointments_by_date_rejects_bad_dates() {
        for uri in [
            "/api/patient/appointments_by_date?date=05/02/2024",
            "/api/patient/appointments_by_date",
        ] {
            let (status, body) = get_json(uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["detail"], "Invalid date format. Use YYYY-MM-DD");
        }
    }

    #[tokio::test]
    async fn monthly_reports_cover_current_month() {
        let (status, body) = get_json("/api/patient/monthly_reports").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 2);
        assert_eq!(body[0]["appointment_count"], 1);
    }

    #[tokio::test]
    async fn dashboard_and_plans_use_their_own_latest_reading() {
        let (status, body) = get_json("/api/patient/dashboard/11").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["patientid"], 11);
        assert_eq!(body["riskrate"], 20);
        assert_eq!(body["SpO2"], "96%");

        let (_, body) = get_json("/api/patient/recommendations/11").await;
        assert_eq!(body["Diet_PLAN"]["DAY1"], "salad");

        let (_, body) = get_json("/api/patient/average_actual/11").await;
        assert_eq!(body["actual"]["heartrate"], 72.0);
        assert_eq!(body["average"], json!({"heartrate": 80, "SpO2": 97.5, "bp": "120/80"}));
    }

    #[tokio::test]
    async fn risk_weightage_scores_latest_reading() {
        let (status, body) = get_json("/api/patient/risk_scores_weightage/11").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["heartrate"]["risk_percent"], 0.0);
        assert_eq!(body["SpO2"]["risk_percent"], 0.0);
        assert_eq!(body["blood_pressure"]["risk_percent"], 0.0);
    }

    #[tokio::test]
    async fn trends_cover_twelve_months() {
        let (status, body) = get_json("/api/patient/patient_dashboard_risk/11").await;
        assert_eq!(status, StatusCode::OK);
        let months = body.as_array().unwrap();
        assert_eq!(months.len(), 12);
        assert_eq!(months[0], json!({"month": "January", "average_riskrate": 80.0}));
        assert_eq!(months[11]["average_riskrate"], Value::Null);

        let (status, body) = get_json("/api/patient/patient_health_trend/11").await;
        assert_eq!(status, StatusCode::OK);
        let trend = body.as_object().unwrap();
        assert_eq!(trend.len(), 12);
        assert!(trend.contains_key("January") && trend.contains_key("December"));
        assert_eq!(body["February"]["systolic"], 118.0);
        assert_eq!(body["February"]["Stress"], 2.0);
    }

    #[tokio::test]
    async fn episodes_and_prescriptions_list_every_reading() {
        let (status, body) = get_json("/api/patient/episodes/11").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["sno"], 1);
        assert_eq!(body[0]["type"], "routine");
        assert_eq!(body[1]["time"], "2024-01-05T10:00:00Z");

        let (status, body) = get_json("/api/patient/11/prescription_tracking").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["r2"]["DAY2"]["Exercise"], "swim");
        assert_eq!(body["r1"]["DAY7"], json!({"Diet": null, "Exercise": null, "Routine": null}));
    }

    #[tokio::test]
    async fn non_numeric_patient_id_is_bad_request_everywhere() {
        for pattern in PER_PATIENT {
            let uri = pattern.replace("{}", "abc");
            let (status, body) = get_json(&uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body["detail"], "patientid must be a number", "{uri}");
        }
    }

    #[tokio::test]
    async fn unknown_patient_is_not_found_everywhere() {
        for pattern in PER_PATIENT {
            let uri = pattern.replace("{}", "999");
            let (status, body) = get_json(&uri).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
            assert_eq!(body["detail"], "Patient not found", "{uri}");
        }
    }

    #[tokio::test]
    async fn patient_without_readings_is_not_found() {
        let (status, body) = get_json("/api/patient/dashboard/12").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "No medication records found");

        let (status, body) = get_json("/api/patient/episodes/12").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "No medications found for this patient");
    }

    #[tokio::test]
    async fn serves_openapi_document() {
        let (status, body) = get_json("/api-docs/openapi.json").await;
        assert_eq!(status, StatusCode::OK);
        let paths = body["paths"].as_object().unwrap();
        assert!(paths.contains_key("/api/patient/{patientid}/prescription_tracking"));
        assert_eq!(paths.len(), 14);
    }
}
