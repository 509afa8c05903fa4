//! JSON response views.
//!
//! Field names follow the wire contract the dashboards already consume, which mixes casing
//! (`SpO2`, `Respiratoryrate`, `Diet_PLAN`). Rust field names are snake_case and renamed on
//! the wire.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;
use vitals_types::Measurement;

/// A 7-day plan as stored on a reading: `DAY1..DAY7` to a free-form description.
pub type DayPlan = BTreeMap<String, serde_json::Value>;

/// Per reading key, `DAY1..DAY7` to that day's prescription.
pub type PrescriptionTrackingRes = BTreeMap<String, BTreeMap<String, DayPrescription>>;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Error body returned for every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub detail: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RiskSummary {
    pub low_risk: u64,
    pub mid_risk: u64,
    pub high_risk: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TotalCountsRes {
    pub total_patients: u64,
    /// Total readings across all patients.
    pub total_appointments: u64,
    /// Patients registered in the current calendar year.
    pub new_patients: u64,
    pub risk_summary: RiskSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PatientListEntry {
    pub si_no: usize,
    pub patient_id: String,
    pub name: String,
    pub gender: String,
    pub last_updated: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub risk_score: Option<Measurement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DoctorListEntry {
    pub name: String,
    pub specialisation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DoctorAppointments {
    pub doctor_name: String,
    pub specialisation: String,
    pub appointment_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct InfoMessage {
    pub message: String,
}

/// Appointments for one day: the per-doctor counts, or a message when there are none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum AppointmentsByDateRes {
    Doctors(Vec<DoctorAppointments>),
    Empty(InfoMessage),
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PatientDashboardRes {
    pub patientid: i64,
    pub name: Option<String>,
    pub gender: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub bp: Option<Measurement>,
    #[schema(value_type = Option<Object>)]
    pub age: Option<Measurement>,
    #[schema(value_type = Option<Object>)]
    pub heartrate: Option<Measurement>,
    #[serde(rename = "SpO2")]
    #[schema(value_type = Option<Object>)]
    pub spo2: Option<Measurement>,
    #[serde(rename = "Stress")]
    #[schema(value_type = Option<Object>)]
    pub stress: Option<Measurement>,
    #[serde(rename = "Respiratoryrate")]
    #[schema(value_type = Option<Object>)]
    pub respiratory_rate: Option<Measurement>,
    #[schema(value_type = Option<Object>)]
    pub riskrate: Option<Measurement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MonthlyRisk {
    pub month: String,
    pub average_riskrate: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MonthlyVitals {
    pub heartrate: Option<f64>,
    #[serde(rename = "SpO2")]
    pub spo2: Option<f64>,
    #[serde(rename = "Stress")]
    pub stress: Option<f64>,
    pub systolic: Option<f64>,
    pub diastolic: Option<f64>,
}

/// Twelve months of averaged vitals.
///
/// Serialised as a JSON object keyed by month name, in calendar order.
#[derive(Debug, Clone, PartialEq)]
pub struct HealthTrendRes {
    pub months: Vec<(String, MonthlyVitals)>,
}

impl HealthTrendRes {
    pub fn get(&self, month: &str) -> Option<&MonthlyVitals> {
        self.months
            .iter()
            .find(|(name, _)| name == month)
            .map(|(_, vitals)| vitals)
    }
}

impl Serialize for HealthTrendRes {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.months.len()))?;
        for (month, vitals) in &self.months {
            map.serialize_entry(month, vitals)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ActualVitals {
    pub heartrate: Option<f64>,
    #[serde(rename = "SpO2")]
    pub spo2: Option<f64>,
    #[schema(value_type = Option<Object>)]
    pub bp: Option<Measurement>,
}

/// Reference values for a healthy adult.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct HealthyVitals {
    pub heartrate: u32,
    #[serde(rename = "SpO2")]
    pub spo2: f64,
    pub bp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct AverageActualRes {
    pub actual: ActualVitals,
    pub average: HealthyVitals,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RiskPercent {
    pub risk_percent: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RiskWeightageRes {
    pub heartrate: RiskPercent,
    #[serde(rename = "SpO2")]
    pub spo2: RiskPercent,
    pub blood_pressure: RiskPercent,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RecommendationsRes {
    #[serde(rename = "Diet_PLAN")]
    #[schema(value_type = Option<Object>)]
    pub diet_plan: Option<DayPlan>,
    #[serde(rename = "Exercise_PLAN")]
    #[schema(value_type = Option<Object>)]
    pub exercise_plan: Option<DayPlan>,
    #[serde(rename = "Routine_PLAN")]
    #[schema(value_type = Option<Object>)]
    pub routine_plan: Option<DayPlan>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Episode {
    #[schema(value_type = Option<Object>)]
    pub heartrate: Option<Measurement>,
    #[serde(rename = "SpO2")]
    #[schema(value_type = Option<Object>)]
    pub spo2: Option<Measurement>,
    #[serde(rename = "Respiratoryrate")]
    #[schema(value_type = Option<Object>)]
    pub respiratory_rate: Option<Measurement>,
    #[schema(value_type = Option<Object>)]
    pub bp: Option<Measurement>,
    #[schema(value_type = Option<Object>)]
    pub riskrate: Option<Measurement>,
    pub time: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub sno: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DayPrescription {
    #[serde(rename = "Diet")]
    #[schema(value_type = Option<Object>)]
    pub diet: Option<serde_json::Value>,
    #[serde(rename = "Exercise")]
    #[schema(value_type = Option<Object>)]
    pub exercise: Option<serde_json::Value>,
    #[serde(rename = "Routine")]
    #[schema(value_type = Option<Object>)]
    pub routine: Option<serde_json::Value>,
}
