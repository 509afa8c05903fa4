//! Documents read from the record store.
//!
//! The store holds legacy data written by several clients over time. Deserialisation is
//! therefore lenient at the field level: a field holding an unexpected shape reads as absent
//! instead of failing the whole patient document.

use api_shared::DayPlan;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use vitals_types::Measurement;

/// Readings keyed by their opaque per-event key.
///
/// Iteration is in key order. Keys carry no chronological meaning.
pub type Readings = BTreeMap<String, Reading>;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "StoredPatient")]
pub struct Patient {
    pub patientid: Option<i64>,
    pub name: Option<String>,
    pub gender: Option<String>,
    pub registered_at: Option<String>,
    /// Readings that could be read. Entries of any other shape are left out.
    pub medications: Readings,
    /// Number of entries in the stored `medications` map, readable or not.
    pub reading_count: usize,
}

/// Patient document as stored, before unreadable readings are dropped.
#[derive(Deserialize)]
struct StoredPatient {
    #[serde(default, deserialize_with = "lenient")]
    patientid: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    gender: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    registered_at: Option<String>,
    #[serde(default, deserialize_with = "lenient_or_default")]
    medications: BTreeMap<String, StoredReading>,
}

impl From<StoredPatient> for Patient {
    fn from(stored: StoredPatient) -> Self {
        let reading_count = stored.medications.len();
        let medications = stored
            .medications
            .into_iter()
            .filter_map(|(key, StoredReading(reading))| Some((key, reading?)))
            .collect();
        Patient {
            patientid: stored.patientid,
            name: stored.name,
            gender: stored.gender,
            registered_at: stored.registered_at,
            medications,
            reading_count,
        }
    }
}

/// One entry of the stored `medications` map. Only a map is a reading; strings, numbers and
/// arrays are kept as unreadable entries.
struct StoredReading(Option<Reading>);

impl<'de> Deserialize<'de> for StoredReading {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        if !value.is_object() {
            return Ok(StoredReading(None));
        }
        Ok(StoredReading(Reading::deserialize(value).ok()))
    }
}

/// One clinical observation event.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Reading {
    #[serde(default, deserialize_with = "lenient")]
    pub time: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub heartrate: Option<Measurement>,
    #[serde(rename = "SpO2", default, deserialize_with = "lenient")]
    pub spo2: Option<Measurement>,
    #[serde(rename = "Stress", default, deserialize_with = "lenient")]
    pub stress: Option<Measurement>,
    #[serde(rename = "Respiratoryrate", default, deserialize_with = "lenient")]
    pub respiratory_rate: Option<Measurement>,
    #[serde(default, deserialize_with = "lenient")]
    pub bp: Option<Measurement>,
    #[serde(default, deserialize_with = "lenient")]
    pub age: Option<Measurement>,
    #[serde(default, deserialize_with = "lenient")]
    pub riskrate: Option<Measurement>,
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub kind: Option<String>,
    #[serde(rename = "Diet_PLAN", default, deserialize_with = "lenient")]
    pub diet_plan: Option<DayPlan>,
    #[serde(rename = "Exercise_PLAN", default, deserialize_with = "lenient")]
    pub exercise_plan: Option<DayPlan>,
    #[serde(rename = "Routine_PLAN", default, deserialize_with = "lenient")]
    pub routine_plan: Option<DayPlan>,
    #[serde(default, deserialize_with = "lenient")]
    pub meeting_details: Option<MeetingDetails>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MeetingDetails {
    #[serde(default, deserialize_with = "lenient")]
    pub doctor_id: Option<DoctorId>,
    #[serde(default, deserialize_with = "lenient")]
    pub meeting_datetime: Option<String>,
}

/// Doctor identifier. Stored as either a number or a string depending on the writer.
///
/// The two forms are distinct keys: `7` and `"7"` name different doctors, as they would in an
/// exact-match store query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, Deserialize)]
#[serde(untagged)]
pub enum DoctorId {
    Number(i64),
    Text(String),
}

impl DoctorId {
    /// `0` and `""` are placeholders meaning "no doctor assigned".
    pub fn is_blank(&self) -> bool {
        match self {
            DoctorId::Number(n) => *n == 0,
            DoctorId::Text(s) => s.is_empty(),
        }
    }
}

impl std::fmt::Display for DoctorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DoctorId::Number(n) => write!(f, "{n}"),
            DoctorId::Text(s) => write!(f, "{s}"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Doctor {
    #[serde(default, deserialize_with = "lenient")]
    pub doctor_id: Option<DoctorId>,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub specialisation: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Loose<T> {
    Known(T),
    Other(IgnoredAny),
}

/// Reads `T` when the stored value has the expected shape, `None` otherwise.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(match Option::<Loose<T>>::deserialize(deserializer)? {
        Some(Loose::Known(value)) => Some(value),
        Some(Loose::Other(_)) | None => None,
    })
}

fn lenient_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(lenient(deserializer)?.unwrap_or_default())
}
