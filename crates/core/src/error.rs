use vitals_types::{PatientIdError, ReportDateError};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("Patient not found")]
    PatientNotFound,
    #[error("No medications found for this patient")]
    NoReadings,
    /// The dashboard words the empty case differently from the other per-patient views.
    #[error("No medication records found")]
    NoMedicationRecords,
    #[error("No valid medication timestamps")]
    NoValidTimestamps,

    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),
    #[error("failed to read fixture file: {0}")]
    FixtureRead(std::io::Error),
    #[error("failed to parse fixture file: {0}")]
    FixtureParse(serde_json::Error),
}

impl From<PatientIdError> for CoreError {
    fn from(err: PatientIdError) -> Self {
        CoreError::InvalidInput(err.to_string())
    }
}

impl From<ReportDateError> for CoreError {
    fn from(err: ReportDateError) -> Self {
        CoreError::InvalidInput(err.to_string())
    }
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
