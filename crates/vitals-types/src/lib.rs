//! Validated request values shared by the API and CLI layers.
//!
//! Path and query parameters arrive as free text. These newtypes are the only way to turn that
//! text into something the analytics layer accepts, so a malformed value is rejected once at the
//! edge rather than deep inside a query.

use chrono::NaiveDate;

/// Errors that can occur when parsing a patient identifier.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PatientIdError {
    /// The input was not a base-10 integer.
    #[error("patientid must be a number")]
    NotANumber,
}

/// Errors that can occur when parsing a report date.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ReportDateError {
    /// The input did not match `YYYY-MM-DD` or named an impossible date.
    #[error("Invalid date format. Use YYYY-MM-DD")]
    InvalidFormat,
}

/// External patient identifier (`patientid` in the record store).
///
/// This is the integer the dashboards address patients by. It is distinct from the store's own
/// document key, which never leaves the storage layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PatientId(i64);

impl PatientId {
    /// Wraps an already-validated integer.
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Parses a patient identifier from text.
    ///
    /// Leading and trailing whitespace is ignored, matching how identifiers are pasted into the
    /// dashboards. Anything else that is not an integer is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`PatientIdError::NotANumber`] if the trimmed input is not an `i64`.
    pub fn parse(input: impl AsRef<str>) -> Result<Self, PatientIdError> {
        input
            .as_ref()
            .trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| PatientIdError::NotANumber)
    }

    /// Returns the raw integer value.
    pub fn value(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for PatientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PatientId {
    type Err = PatientIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// A calendar day in `YYYY-MM-DD` form, used to select appointments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportDate(NaiveDate);

impl ReportDate {
    /// Parses a strict `YYYY-MM-DD` date.
    ///
    /// # Errors
    ///
    /// Returns [`ReportDateError::InvalidFormat`] for any other shape, or for dates that do not
    /// exist (e.g. `2024-02-30`).
    pub fn parse(input: impl AsRef<str>) -> Result<Self, ReportDateError> {
        NaiveDate::parse_from_str(input.as_ref(), "%Y-%m-%d")
            .map(Self)
            .map_err(|_| ReportDateError::InvalidFormat)
    }

    /// Returns the underlying date.
    pub fn date(self) -> NaiveDate {
        self.0
    }
}

impl std::fmt::Display for ReportDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl std::str::FromStr for ReportDate {
    type Err = ReportDateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// A vital-sign value exactly as it is stored on a reading.
///
/// Devices and manual entry disagree on representation, so the same field can hold `72`,
/// `72.5`, `"72 bpm"` or `"120/80"`. The value is kept as-is so endpoints that echo stored
/// vitals return them untouched; numeric interpretation lives in the core normalisation layer.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Measurement {
    Integer(i64),
    Real(f64),
    Text(String),
}

impl Measurement {
    /// Returns the text form, if this value was stored as a string.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Measurement::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<i64> for Measurement {
    fn from(v: i64) -> Self {
        Measurement::Integer(v)
    }
}

impl From<f64> for Measurement {
    fn from(v: f64) -> Self {
        Measurement::Real(v)
    }
}

impl From<&str> for Measurement {
    fn from(v: &str) -> Self {
        Measurement::Text(v.to_string())
    }
}
