//! Error to HTTP response mapping.

use api_shared::ErrorRes;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use vitals_core::CoreError;

/// Handler errors with their HTTP status.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Internal Server Error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let ApiError::Internal(detail) = &self {
            tracing::error!(detail, "analytics query failed");
        }
        let body = ErrorRes {
            detail: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidInput(msg) => ApiError::BadRequest(msg),
            CoreError::PatientNotFound
            | CoreError::NoReadings
            | CoreError::NoMedicationRecords
            | CoreError::NoValidTimestamps => ApiError::NotFound(err.to_string()),
            CoreError::Mongo(_) | CoreError::FixtureRead(_) | CoreError::FixtureParse(_) => {
                ApiError::Internal(err.to_string())
            }
        }
    }
}
