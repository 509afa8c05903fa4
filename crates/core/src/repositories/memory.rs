//! In-memory record store.
//!
//! Fixture files use the same document shape as the production collections:
//!
//! ```json
//! {
//!   "patients": [{"patientid": 1, "name": "...", "medications": {"k1": {"time": "..."}}}],
//!   "doctors": [{"doctor_id": 7, "name": "...", "specialisation": "..."}]
//! }
//! ```

use super::RecordStore;
use crate::error::{CoreError, CoreResult};
use crate::model::{Doctor, DoctorId, Patient};
use serde::Deserialize;
use std::path::Path;
use vitals_types::PatientId;

#[derive(Debug, Default, Deserialize)]
struct Fixture {
    #[serde(default)]
    patients: Vec<Patient>,
    #[serde(default)]
    doctors: Vec<Doctor>,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    patients: Vec<Patient>,
    doctors: Vec<Doctor>,
}

impl MemoryStore {
    pub fn new(patients: Vec<Patient>, doctors: Vec<Doctor>) -> Self {
        Self { patients, doctors }
    }

    /// Parse a fixture document from a JSON string.
    pub fn from_json_str(json: &str) -> CoreResult<Self> {
        let fixture: Fixture = serde_json::from_str(json).map_err(CoreError::FixtureParse)?;
        Ok(Self::new(fixture.patients, fixture.doctors))
    }

    /// Load a fixture document from disk.
    pub fn from_fixture(path: &Path) -> CoreResult<Self> {
        let json = std::fs::read_to_string(path).map_err(CoreError::FixtureRead)?;
        Self::from_json_str(&json)
    }

    pub fn patient_count(&self) -> usize {
        self.patients.len()
    }
}

#[async_trait::async_trait]
impl RecordStore for MemoryStore {
    async fn count_patients(&self) -> CoreResult<u64> {
        Ok(self.patients.len() as u64)
    }

    async fn patients(&self) -> CoreResult<Vec<Patient>> {
        Ok(self.patients.clone())
    }

    async fn find_patient(&self, id: PatientId) -> CoreResult<Option<Patient>> {
        Ok(self
            .patients
            .iter()
            .find(|p| p.patientid == Some(id.value()))
            .cloned())
    }

    async fn doctors(&self) -> CoreResult<Vec<Doctor>> {
        Ok(self.doctors.clone())
    }

    async fn find_doctor(&self, id: &DoctorId) -> CoreResult<Option<Doctor>> {
        Ok(self
            .doctors
            .iter()
            .find(|d| d.doctor_id.as_ref() == Some(id))
            .cloned())
    }
}
